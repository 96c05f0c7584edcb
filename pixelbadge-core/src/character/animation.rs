//! Looping pixel animations
//!
//! An animation rests on frame 0 until `interval_ms` has passed since its
//! trigger, then plays its frames once per interval.

use heapless::Vec;

use super::pattern::PixelLayer;
use super::AssetError;
use crate::color::Rgb;
use crate::time::elapsed_ms;

/// Maximum frames per animation
pub const MAX_FRAMES: usize = 8;

/// Maximum length of an animation name
pub const MAX_ANIMATION_NAME_LEN: usize = 16;

/// Asset form of an animation
#[derive(Debug, Clone, Copy)]
pub struct AnimationDef {
    pub name: &'static str,
    pub interval_ms: u32,
    pub frame_duration_ms: u32,
    /// Frames as 16 character hex layers
    pub frames: &'static [&'static str],
    pub color: Rgb,
    /// Play forward then backward
    pub reverse: bool,
}

/// Decoded animation with its runtime trigger
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    name: heapless::String<MAX_ANIMATION_NAME_LEN>,
    interval_ms: u32,
    frame_duration_ms: u32,
    frames: Vec<PixelLayer, MAX_FRAMES>,
    color: Rgb,
    reverse: bool,
    last_trigger_ms: u32,
}

impl Animation {
    /// Decode an animation definition, triggered at `now_ms`
    pub fn build(def: &AnimationDef, now_ms: u32) -> Result<Self, AssetError> {
        if def.frames.is_empty() {
            return Err(AssetError::NoFrames);
        }
        if def.frames.len() > MAX_FRAMES {
            return Err(AssetError::TooManyFrames);
        }
        if def.interval_ms == 0 || def.frame_duration_ms == 0 {
            return Err(AssetError::ZeroDuration);
        }

        let mut name = heapless::String::new();
        name.push_str(def.name)
            .map_err(|_| AssetError::NameTooLong)?;

        let mut frames = Vec::new();
        for hex in def.frames {
            frames
                .push(PixelLayer::from_hex(hex)?)
                .map_err(|_| AssetError::TooManyFrames)?;
        }

        Ok(Self {
            name,
            interval_ms: def.interval_ms,
            frame_duration_ms: def.frame_duration_ms,
            frames,
            color: def.color,
            reverse: def.reverse,
            last_trigger_ms: now_ms,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Move the trigger forward by whole intervals
    ///
    /// Keeps the trigger within two intervals of `now_ms` so the elapsed
    /// time never reaches the 2^31 ms limit of tick differences. The frame
    /// shown at any later time is unchanged.
    pub fn rebase(&mut self, now_ms: u32) {
        let elapsed = elapsed_ms(now_ms, self.last_trigger_ms);
        let whole = elapsed / self.interval_ms;
        if whole > 1 {
            let advance = (whole - 1) * self.interval_ms;
            self.last_trigger_ms = self.last_trigger_ms.wrapping_add(advance);
        }
    }

    /// Number of steps in one playthrough
    fn steps(&self) -> u32 {
        let n = self.frames.len() as u32;
        if self.reverse && n > 1 {
            2 * n - 1
        } else {
            n
        }
    }

    /// Index of the frame to show at `now_ms`
    pub fn frame_index(&self, now_ms: u32) -> usize {
        let elapsed = elapsed_ms(now_ms, self.last_trigger_ms);
        if elapsed < self.interval_ms {
            return 0;
        }

        let t = elapsed % self.interval_ms;
        let steps = self.steps();
        let active_span = self.frame_duration_ms.saturating_mul(steps);
        if t >= active_span {
            return 0;
        }

        let step = (t / self.frame_duration_ms).min(steps - 1);
        let n = self.frames.len() as u32;
        let index = if step < n { step } else { 2 * n - 2 - step };
        index as usize
    }

    /// Layer to draw at `now_ms`
    pub fn current_frame(&self, now_ms: u32) -> PixelLayer {
        self.frames
            .get(self.frame_index(now_ms))
            .copied()
            .unwrap_or(PixelLayer::EMPTY)
    }
}
