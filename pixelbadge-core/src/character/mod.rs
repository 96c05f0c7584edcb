//! Pixel-art characters
//!
//! Characters are authored as compact hex layers ([`CharacterDef`]) and
//! decoded into a renderable [`Character`] whenever one becomes active.

pub mod animation;
pub mod catalog;
pub mod model;
pub mod pattern;

pub use animation::{Animation, AnimationDef, MAX_FRAMES};
pub use catalog::{Catalog, CHARACTERS};
pub use model::{
    Character, CharacterDef, CharacterId, Pixel, PixelKind, Tint, MAX_ANIMATIONS,
    MAX_FIXED_PIXELS,
};
pub use pattern::PixelLayer;

/// Malformed character asset data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// Hex layer is not exactly 16 characters
    InvalidLength,
    /// Hex layer contains a non-hex character
    InvalidHexDigit,
    /// Fixed pixel outside the 8x8 grid
    PixelOutOfRange,
    /// Animation with no frames
    NoFrames,
    /// More frames than an animation can hold
    TooManyFrames,
    /// More animations than a character can hold
    TooManyAnimations,
    /// More pixels than a character can hold
    TooManyPixels,
    /// Interval or frame duration of zero
    ZeroDuration,
    /// Two animations share a name
    DuplicateAnimation,
    /// Character id is empty
    EmptyId,
    /// Character id too long to persist
    IdTooLong,
    /// Display or animation name too long
    NameTooLong,
    /// Two characters share an id
    DuplicateId,
    /// Catalog has no characters
    EmptyCatalog,
}
