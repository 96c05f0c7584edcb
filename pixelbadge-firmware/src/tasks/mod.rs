//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod leds;
pub mod storage;

pub use leds::led_task;
pub use storage::storage_task;
