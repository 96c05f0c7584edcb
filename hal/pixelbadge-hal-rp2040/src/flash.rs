//! Flash storage driver for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage
//! in the last 32KB of flash.
//!
//! Implements the `FlashStorage` trait from `pixelbadge-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use pixelbadge_hal::flash::{FlashError, StorageKey};

/// 2MB flash on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
/// Eight erase sectors for badge data
pub const DATA_PARTITION_SIZE: usize = 8 * ERASE_SIZE;
pub const DATA_PARTITION_START: usize = FLASH_SIZE - DATA_PARTITION_SIZE;

/// Largest record the badge stores (the serialized configuration)
pub const MAX_RECORD_SIZE: usize = 512;

/// Flash range for the data partition
pub const DATA_RANGE: core::ops::Range<u32> = (DATA_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// RP2040 flash storage implementation
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl pixelbadge_hal::FlashStorage for Rp2040FlashStorage<'_> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut data_buffer = [0u8; MAX_RECORD_SIZE + 16];

        let result = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            DATA_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some(data)) => {
                let len = data.len();
                if buffer.len() < len {
                    return Err(FlashError::BufferTooSmall);
                }
                buffer[..len].copy_from_slice(data);
                Ok(len)
            }
            Ok(None) => Err(FlashError::NotFound),
            Err(_) => Err(FlashError::Storage),
        }
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > MAX_RECORD_SIZE {
            return Err(FlashError::BufferTooSmall);
        }
        let mut data_buffer = [0u8; MAX_RECORD_SIZE + 16];

        map::store_item(
            &mut self.flash,
            DATA_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        )
        .await
        .map_err(|_| FlashError::Storage)
    }
}
