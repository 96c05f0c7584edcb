//! Compact 8x8 bitmap layers
//!
//! A layer is written as 16 hex characters, two per row, row 0 first. The
//! most significant bit of each row byte is column 0 (leftmost).

use super::AssetError;
use crate::frame::MATRIX_SIZE;

/// Number of hex characters in an encoded layer
pub const LAYER_HEX_LEN: usize = 16;

/// One 8x8 on/off layer, row 0 in the most significant byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelLayer(u64);

impl PixelLayer {
    pub const EMPTY: PixelLayer = PixelLayer(0);

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Decode a 16 character hex string (either case)
    pub fn from_hex(hex: &str) -> Result<Self, AssetError> {
        let bytes = hex.as_bytes();
        if bytes.len() != LAYER_HEX_LEN {
            return Err(AssetError::InvalidLength);
        }

        let mut bits = 0u64;
        for pair in bytes.chunks_exact(2) {
            let hi = hex_value(pair[0])?;
            let lo = hex_value(pair[1])?;
            bits = (bits << 8) | ((hi << 4) | lo) as u64;
        }
        Ok(Self(bits))
    }

    fn mask(row: u8, col: u8) -> u64 {
        let bit = (MATRIX_SIZE as u8 - 1 - row) as u32 * 8 + (7 - col) as u32;
        1u64 << bit
    }

    /// Check a single cell; out of range cells are never set
    pub fn is_set(self, row: u8, col: u8) -> bool {
        if row as usize >= MATRIX_SIZE || col as usize >= MATRIX_SIZE {
            return false;
        }
        self.0 & Self::mask(row, col) != 0
    }

    /// Copy of this layer with one more cell lit; out of range is a no-op
    pub fn with_pixel(self, row: u8, col: u8) -> Self {
        if row as usize >= MATRIX_SIZE || col as usize >= MATRIX_SIZE {
            return self;
        }
        Self(self.0 | Self::mask(row, col))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lit cells as `(row, col)`, row-major, row 0 and column 0 first
    pub fn pixels(self) -> Pixels {
        Pixels {
            bits: self.0,
            index: 0,
        }
    }
}

/// Iterator over the lit cells of a [`PixelLayer`]
#[derive(Debug, Clone)]
pub struct Pixels {
    bits: u64,
    index: u8,
}

impl Iterator for Pixels {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < 64 {
            let i = self.index;
            self.index += 1;
            if self.bits & (1u64 << (63 - i)) != 0 {
                return Some((i / 8, i % 8));
            }
        }
        None
    }
}

fn hex_value(c: u8) -> Result<u8, AssetError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(AssetError::InvalidHexDigit),
    }
}
