//! Persisted character selection

use crate::character::CharacterId;

/// Errors from the selection store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash operation failed
    Flash,
    /// Value could not be encoded or decoded
    Serialize,
}

/// Remembers the selected character across power cycles
pub trait SelectionStore {
    /// Previously saved id, `None` when nothing was saved or it is unreadable
    fn load(&mut self) -> Option<CharacterId>;

    fn save(&mut self, id: &str) -> Result<(), StoreError>;
}
