//! Board-agnostic core logic for the pixel badge firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Compact 8x8 pattern decoding and the character catalog
//! - Animation timing and the per-tick compositor
//! - Whole-frame effects (spinner, progress bar, scrolling banner)
//! - Mode state machine and button press interpretation
//! - Controller driving the main loop through collaborator traits
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod character;
pub mod color;
pub mod config;
pub mod controller;
pub mod effects;
pub mod frame;
pub mod input;
pub mod schedule;
pub mod state;
pub mod text;
pub mod time;
pub mod traits;
pub mod version;

pub use color::{Brightness, Rgb};
pub use controller::{Board, Controller};
pub use frame::{Frame, MATRIX_SIZE, PIXEL_COUNT};
