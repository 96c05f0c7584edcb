//! RP2040-specific HAL for the pixel badge firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `pixelbadge-hal` traits, plus RP2040-specific functionality:
//!
//! - PIO-driven WS2812 output for the 8x8 matrix
//! - GPIO input for the badge button
//! - Flash storage driver (implements `pixelbadge_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod leds;

// Re-export shared traits from pixelbadge-hal for convenience
pub use pixelbadge_hal::{FlashStorage as FlashStorageTrait, InputPin, StorageKey};
