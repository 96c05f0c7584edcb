//! Colour values and the per-channel arithmetic used by the compositor

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Amount added (highlight) or removed (shadow) per channel
pub const SHADE_STEP: u8 = 40;

/// Lowest channel value produced by the soft colour wheel
const WHEEL_FLOOR: u16 = 10;

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Apply `f` to each channel
    pub fn map(self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Highlight shade: every channel raised by [`SHADE_STEP`], clamped at 255
    pub fn lighten(self) -> Self {
        self.map(|c| c.saturating_add(SHADE_STEP))
    }

    /// Shadow shade: every channel lowered by [`SHADE_STEP`], clamped at 0
    pub fn darken(self) -> Self {
        self.map(|c| c.saturating_sub(SHADE_STEP))
    }

    /// Scale every channel by `brightness`
    pub fn scale(self, brightness: Brightness) -> Self {
        self.map(|c| brightness.apply(c))
    }

    /// Linear blend towards `other`; `t` is clamped to 0..=1
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Soft colour wheel
    ///
    /// Maps `position` (0-254, larger values wrap) onto a red → green → blue
    /// cycle whose channels never drop below a small floor, which keeps the
    /// rainbow pastel instead of saturated.
    pub fn wheel(position: u8) -> Self {
        let pos = (position % 255) as u16;
        let ramp = |x: u16| -> u8 { (WHEEL_FLOOR + x * (255 - WHEEL_FLOOR) / 255) as u8 };
        let floor = WHEEL_FLOOR as u8;

        if pos < 85 {
            Self::new(ramp(pos * 3), ramp(255 - pos * 3), floor)
        } else if pos < 170 {
            let pos = pos - 85;
            Self::new(ramp(255 - pos * 3), floor, ramp(pos * 3))
        } else {
            let pos = pos - 170;
            Self::new(floor, ramp(pos * 3), ramp(255 - pos * 3))
        }
    }
}

/// Global dimming factor in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Brightness(f32);

impl Brightness {
    pub const FULL: Brightness = Brightness(1.0);
    pub const OFF: Brightness = Brightness(0.0);

    /// Create a brightness factor, clamping into `0.0..=1.0`
    ///
    /// NaN is treated as fully off.
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::OFF;
        }
        Self(factor.clamp(0.0, 1.0))
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    /// Scale one channel: `round(channel * factor)`, clamped to 0..=255
    pub fn apply(self, channel: u8) -> u8 {
        // Channels are non-negative, so +0.5 then truncate rounds half up.
        (channel as f32 * self.0 + 0.5).clamp(0.0, 255.0) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(0.2)
    }
}
