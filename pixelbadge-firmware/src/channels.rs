//! Inter-task communication channels
//!
//! The controller runs synchronously in the main task; LED output and
//! flash writes are async and live in their own tasks behind these signals.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use pixelbadge_core::character::CharacterId;
use pixelbadge_hal_rp2040::leds::LED_COUNT;
use smart_leds::RGB8;

/// Latest frame to push to the matrix; older frames are dropped
pub static FRAME_SIGNAL: Signal<CriticalSectionRawMutex, [RGB8; LED_COUNT]> = Signal::new();

/// Character id to persist (updated by the controller)
pub static SELECTION_SAVE: Signal<CriticalSectionRawMutex, CharacterId> = Signal::new();
