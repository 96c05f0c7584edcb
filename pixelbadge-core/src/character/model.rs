//! Character sprites and the compositor that draws them
//!
//! A character is a flat list of coloured-by-rule pixels plus a set of
//! animations overlaid on top. Well-formed character data never lights one
//! coordinate in more than one base layer; overlapping base pixels are not
//! supported.

use heapless::Vec;

use super::animation::{Animation, AnimationDef};
use super::pattern::PixelLayer;
use super::AssetError;
use crate::color::{Brightness, Rgb};
use crate::frame::{Frame, MATRIX_SIZE};

/// Maximum animations per character
pub const MAX_ANIMATIONS: usize = 4;

/// Maximum fixed-colour pixels per character
pub const MAX_FIXED_PIXELS: usize = 32;

/// Body, highlight and shadow layers plus fixed pixels
pub const MAX_PIXELS: usize = 3 * 64 + MAX_FIXED_PIXELS;

/// Maximum length of a character id
pub const MAX_ID_LEN: usize = 16;

/// Maximum length of a character display name
pub const MAX_NAME_LEN: usize = 24;

/// Stable character identifier, the only thing persisted
pub type CharacterId = heapless::String<MAX_ID_LEN>;

/// Status colours
pub const AVAILABLE_COLOR: Rgb = Rgb::GREEN;
pub const BUSY_COLOR: Rgb = Rgb::RED;

/// Rainbow hue distance between neighbouring diagonals
const RAINBOW_HUE_STEP: u32 = 6;

/// Asset form of a character
#[derive(Debug, Clone, Copy)]
pub struct CharacterDef {
    pub id: &'static str,
    pub name: &'static str,
    pub body: Option<&'static str>,
    pub highlight: Option<&'static str>,
    pub shadow: Option<&'static str>,
    /// Fixed pixels as `(col, row, colour)`
    pub fixed: &'static [(u8, u8, Rgb)],
    pub animations: &'static [AnimationDef],
}

/// How a pixel gets its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelKind {
    Body,
    Highlight,
    Shadow,
    /// Always drawn in its own colour
    Fixed(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    pub row: u8,
    pub col: u8,
    pub kind: PixelKind,
}

/// Base colouring rule for non-fixed pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tint {
    /// Solid green
    Available,
    /// Solid red
    Busy,
    /// Moving rainbow
    Social,
    /// Solid white, used outside status display
    Plain,
    /// Every non-fixed pixel in one colour
    Override(Rgb),
}

impl Tint {
    fn base_color(self) -> Rgb {
        match self {
            Tint::Available => AVAILABLE_COLOR,
            Tint::Busy => BUSY_COLOR,
            Tint::Override(color) => color,
            Tint::Social | Tint::Plain => Rgb::WHITE,
        }
    }
}

/// Rainbow phase at `now_ms`, advancing 3 hue steps every 12 ms
pub fn rainbow_offset(now_ms: u32) -> u32 {
    (now_ms / 12 * 3) % 255
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Character {
    id: CharacterId,
    name: heapless::String<MAX_NAME_LEN>,
    pixels: Vec<Pixel, MAX_PIXELS>,
    animations: Vec<Animation, MAX_ANIMATIONS>,
}

impl Character {
    /// Decode a definition into a fresh instance, animations triggered at `now_ms`
    pub fn build(def: &CharacterDef, now_ms: u32) -> Result<Self, AssetError> {
        let mut id = CharacterId::new();
        id.push_str(def.id).map_err(|_| AssetError::IdTooLong)?;
        if id.is_empty() {
            return Err(AssetError::EmptyId);
        }
        let mut name = heapless::String::new();
        name.push_str(def.name)
            .map_err(|_| AssetError::NameTooLong)?;

        let mut pixels = Vec::new();
        let layers = [
            (def.body, PixelKind::Body),
            (def.highlight, PixelKind::Highlight),
            (def.shadow, PixelKind::Shadow),
        ];
        for (hex, kind) in layers {
            let Some(hex) = hex else { continue };
            for (row, col) in PixelLayer::from_hex(hex)?.pixels() {
                pixels
                    .push(Pixel { row, col, kind })
                    .map_err(|_| AssetError::TooManyPixels)?;
            }
        }

        if def.fixed.len() > MAX_FIXED_PIXELS {
            return Err(AssetError::TooManyPixels);
        }
        for &(col, row, color) in def.fixed {
            if row as usize >= MATRIX_SIZE || col as usize >= MATRIX_SIZE {
                return Err(AssetError::PixelOutOfRange);
            }
            pixels
                .push(Pixel {
                    row,
                    col,
                    kind: PixelKind::Fixed(color),
                })
                .map_err(|_| AssetError::TooManyPixels)?;
        }

        if def.animations.len() > MAX_ANIMATIONS {
            return Err(AssetError::TooManyAnimations);
        }
        let mut animations: Vec<Animation, MAX_ANIMATIONS> = Vec::new();
        for anim_def in def.animations {
            if animations.iter().any(|a| a.name() == anim_def.name) {
                return Err(AssetError::DuplicateAnimation);
            }
            animations
                .push(Animation::build(anim_def, now_ms)?)
                .map_err(|_| AssetError::TooManyAnimations)?;
        }

        Ok(Self {
            id,
            name,
            pixels,
            animations,
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Advance animation triggers so they keep running over long uptimes
    pub fn tick(&mut self, now_ms: u32) {
        for anim in self.animations.iter_mut() {
            anim.rebase(now_ms);
        }
    }

    /// Composite the character into `frame`
    ///
    /// Pure for a given `now_ms`: the same inputs always produce the same
    /// frame. Rows are shifted down by `row_offset`; anything pushed off the
    /// matrix is dropped.
    pub fn render(
        &self,
        frame: &mut Frame,
        tint: Tint,
        brightness: Brightness,
        row_offset: i8,
        now_ms: u32,
    ) {
        frame.clear();

        let base = tint.base_color();
        let hue_offset = rainbow_offset(now_ms);

        for pixel in self.pixels.iter() {
            let row = pixel.row as i16 + row_offset as i16;
            let col = pixel.col as i16;
            if !(0..MATRIX_SIZE as i16).contains(&row) {
                continue;
            }

            let color = match (pixel.kind, tint) {
                (PixelKind::Fixed(color), _) => color,
                (_, Tint::Social) => {
                    let hue = (hue_offset + (row as u32 + col as u32) * RAINBOW_HUE_STEP) % 255;
                    Rgb::wheel(hue as u8)
                }
                (PixelKind::Highlight, _) => base.lighten(),
                (PixelKind::Shadow, _) => base.darken(),
                (PixelKind::Body, _) => base,
            };
            frame.set_pixel(row, col, color.scale(brightness));
        }

        for anim in self.animations.iter() {
            let color = anim.color().scale(brightness);
            for (r, c) in anim.current_frame(now_ms).pixels() {
                frame.set_pixel(r as i16 + row_offset as i16, c as i16, color);
            }
        }
    }
}
