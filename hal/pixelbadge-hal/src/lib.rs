//! Pixelbadge Hardware Abstraction Layer
//!
//! This crate defines the board-level abstraction traits that chip-specific
//! HALs implement. The badge application logic in `pixelbadge-core` never
//! touches these directly; the firmware adapts them to the core's
//! collaborator traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixelbadge-firmware                    │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │ pixelbadge-core  │   │ pixelbadge-hal   │
//! │ (badge logic)    │   │ (this crate)     │
//! └──────────────────┘   └──────────────────┘
//!                                 │
//!                                 ▼
//!                        ┌──────────────────┐
//!                        │ pixelbadge-hal-  │
//!                        │     rp2040       │
//!                        └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (the badge button)
//! - [`flash::FlashStorage`] - Persistent key-value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::InputPin;
