//! Dotted firmware version numbers

use core::str::FromStr;

/// Maximum numeric components in a version
const MAX_PARTS: usize = 4;

/// Version such as `1.0.10`, compared numerically part by part
///
/// Missing trailing parts count as zero, so `1.2` equals `1.2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Version {
    parts: [u32; MAX_PARTS],
}

/// Version string was empty, non-numeric or had too many parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidVersion;

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            parts: [major, minor, patch, 0],
        }
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);
        if s.is_empty() {
            return Err(InvalidVersion);
        }

        let mut parts = [0u32; MAX_PARTS];
        for (i, part) in s.split('.').enumerate() {
            let slot = parts.get_mut(i).ok_or(InvalidVersion)?;
            *slot = part.parse().map_err(|_| InvalidVersion)?;
        }
        Ok(Self { parts })
    }
}

/// Check whether `candidate` is strictly newer than `current`
///
/// Unparseable versions are never considered newer.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (candidate.parse::<Version>(), current.parse::<Version>()) {
        (Ok(candidate), Ok(current)) => candidate > current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_not_lexical() {
        assert!(is_newer("1.0.10", "1.0.9"));
        assert!(!is_newer("1.0.9", "1.0.10"));
        assert!(is_newer("2.0", "1.99.99"));
    }

    #[test]
    fn test_equal_versions_not_newer() {
        assert!(!is_newer("1.0.10", "1.0.10"));
        assert!(!is_newer("1.2", "1.2.0"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("v1.0.10".parse::<Version>(), Ok(Version::new(1, 0, 10)));
        assert_eq!(" 3.1 ".parse::<Version>(), Ok(Version::new(3, 1, 0)));
        assert_eq!("".parse::<Version>(), Err(InvalidVersion));
        assert_eq!("1.x".parse::<Version>(), Err(InvalidVersion));
        assert_eq!("1.2.3.4.5".parse::<Version>(), Err(InvalidVersion));
    }

    #[test]
    fn test_garbage_never_newer() {
        assert!(!is_newer("latest", "1.0.0"));
        assert!(!is_newer("9.9.9", "bogus"));
    }
}
