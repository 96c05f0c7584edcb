//! Storage task
//!
//! Owns the flash and writes the selected character whenever the
//! controller saves one. Flash writes take milliseconds, so they stay out
//! of the main loop.

use defmt::*;
use pixelbadge_hal_rp2040::flash::Rp2040FlashStorage;

use crate::channels::SELECTION_SAVE;
use crate::config::save_selection;

#[embassy_executor::task]
pub async fn storage_task(mut storage: Rp2040FlashStorage<'static>) {
    info!("Storage task started");

    loop {
        let id = SELECTION_SAVE.wait().await;

        match save_selection(&mut storage, &id).await {
            Ok(()) => info!("Saved character {}", id.as_str()),
            Err(e) => warn!("Failed to save character {}: {:?}", id.as_str(), e),
        }
    }
}
