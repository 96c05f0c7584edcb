//! Configuration and selection persistence
//!
//! Loads badge configuration and the selected character from flash.
//! Falls back to built-in defaults if flash is empty or unreadable.

pub mod loader;

pub use loader::{save_selection, BadgePersistence, PersistError};
