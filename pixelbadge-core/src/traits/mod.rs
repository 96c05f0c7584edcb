//! Collaborator traits
//!
//! These traits define the interface between the badge logic and the
//! board: LEDs, button, clocks, persistence, network and reset.

pub mod clock;
pub mod display;
pub mod input;
pub mod network;
pub mod storage;
pub mod system;

pub use clock::{Clock, WallTime};
pub use display::LedMatrix;
pub use input::Button;
pub use network::{DownloadProgress, Release, UpdateError, UpdateTransport};
pub use storage::{SelectionStore, StoreError};
pub use system::SystemControl;
