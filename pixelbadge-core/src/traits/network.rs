//! Firmware update transport
//!
//! Everything below "fetch bytes from a URL" lives behind this trait:
//! radio bring-up, credentials, HTTP, and writing the new image.

use heapless::String;

use crate::config::{MAX_URL_LEN, MAX_VERSION_LEN};

/// Errors from the update transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// No network credentials configured
    NoCredentials,
    /// Connection did not come up in time
    ConnectTimeout,
    /// Connection attempt was refused or failed
    ConnectFailed,
    /// Server answered with a non-success status
    Http(u16),
    /// Transfer broke off
    Transfer,
    /// Release metadata could not be parsed
    InvalidRelease,
    /// New image could not be stored or swapped in
    Storage,
    /// This board has no update transport
    Unavailable,
}

/// Published firmware release
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Release {
    pub version: String<MAX_VERSION_LEN>,
    /// Location of the firmware image
    pub url: String<MAX_URL_LEN>,
}

/// Download progress report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DownloadProgress {
    pub downloaded: u32,
    /// Total size if the server announced one
    pub total: Option<u32>,
}

impl DownloadProgress {
    /// Completed fraction, 0.0 when the total is unknown
    pub fn fraction(&self) -> f32 {
        match self.total {
            Some(total) if total > 0 => (self.downloaded as f32 / total as f32).min(1.0),
            _ => 0.0,
        }
    }
}

pub trait UpdateTransport {
    /// Begin connecting; completion is observed through [`is_connected`](Self::is_connected)
    fn start_connection(&mut self) -> Result<(), UpdateError>;

    fn is_connected(&mut self) -> bool;

    fn disconnect(&mut self);

    /// Fetch and parse the release metadata at `url`
    fn fetch_release(&mut self, url: &str) -> Result<Release, UpdateError>;

    /// Download the image at `url` into staging storage
    ///
    /// Blocks until done, reporting progress through `progress` as it goes.
    fn download(
        &mut self,
        url: &str,
        progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<(), UpdateError>;

    /// Make the staged image the one that boots next
    fn install(&mut self) -> Result<(), UpdateError>;
}
