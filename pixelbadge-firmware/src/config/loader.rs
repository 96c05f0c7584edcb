//! Configuration persistence
//!
//! Loads badge configuration and the selected character from flash.
//! Both are stored as postcard bytes.

use defmt::*;

use pixelbadge_core::character::CharacterId;
use pixelbadge_core::config::{BadgeConfig, ConfigError};
use pixelbadge_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey, MAX_RECORD_SIZE};
use pixelbadge_hal_rp2040::FlashStorageTrait;

/// Persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Serialization failed
    Serialize,
    /// Stored configuration fails validation
    Invalid(ConfigError),
}

impl From<FlashError> for PersistError {
    fn from(e: FlashError) -> Self {
        PersistError::Flash(e)
    }
}

/// Boot-time reader for persisted badge data
pub struct BadgePersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> BadgePersistence<'d> {
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Hand the flash back once loading is done
    pub fn into_storage(self) -> Rp2040FlashStorage<'d> {
        self.storage
    }

    /// Load the configuration, or the built-in defaults
    pub async fn load_config(&mut self) -> BadgeConfig {
        match self.load_config_inner().await {
            Ok(config) => {
                info!("Loaded configuration from flash");
                config
            }
            Err(PersistError::Flash(FlashError::NotFound)) => {
                info!("No configuration in flash, using defaults");
                BadgeConfig::default()
            }
            Err(e) => {
                warn!("Failed to load configuration: {:?}, using defaults", e);
                BadgeConfig::default()
            }
        }
    }

    async fn load_config_inner(&mut self) -> Result<BadgeConfig, PersistError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self
            .storage
            .read(StorageKey::BadgeConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of configuration from flash", len);

        let config: BadgeConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| PersistError::Deserialize)?;
        config.validate().map_err(PersistError::Invalid)?;
        Ok(config)
    }

    /// Load the saved character id, if any
    pub async fn load_selection(&mut self) -> Option<CharacterId> {
        match self.load_selection_inner().await {
            Ok(id) => {
                info!("Saved character: {}", id.as_str());
                Some(id)
            }
            Err(PersistError::Flash(FlashError::NotFound)) => {
                debug!("No saved character");
                None
            }
            Err(e) => {
                warn!("Failed to load saved character: {:?}", e);
                None
            }
        }
    }

    async fn load_selection_inner(&mut self) -> Result<CharacterId, PersistError> {
        let mut buffer = [0u8; MAX_ID_RECORD_SIZE];
        let len = self
            .storage
            .read(StorageKey::SelectedCharacter, &mut buffer)
            .await?;
        postcard::from_bytes(&buffer[..len]).map_err(|_| PersistError::Deserialize)
    }
}

/// Length prefix plus the longest id
const MAX_ID_RECORD_SIZE: usize = 32;

/// Write the selected character id
pub async fn save_selection(
    storage: &mut Rp2040FlashStorage<'_>,
    id: &CharacterId,
) -> Result<(), PersistError> {
    let mut buffer = [0u8; MAX_ID_RECORD_SIZE];
    let bytes = postcard::to_slice(id, &mut buffer).map_err(|_| PersistError::Serialize)?;
    storage
        .write(StorageKey::SelectedCharacter, bytes)
        .await
        .map_err(PersistError::from)
}
