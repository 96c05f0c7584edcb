//! Self-update session
//!
//! Tracks what the update flow has already done in its current phase so
//! that each step runs exactly once across repeated polls.

use crate::effects::BORDER_LEN;
use crate::time::elapsed_ms;
use crate::traits::{DownloadProgress, Release, UpdateError};

/// Length of one half of an error flash (off or red)
pub const ERROR_FLASH_MS: u32 = 200;

/// Number of off/red flashes
pub const ERROR_FLASHES: u32 = 3;

/// Red hold after the last flash
pub const ERROR_HOLD_MS: u32 = 500;

/// Why the device is resetting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetReason {
    /// Running firmware is current
    UpToDate,
    /// New firmware installed
    Installed,
    /// Update failed
    Failed,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpdateSession {
    started_ms: u32,
    phase_started_ms: u32,
    /// One-shot work for the current phase has run
    step_done: bool,
    release: Option<Release>,
    progress: Option<DownloadProgress>,
    error: Option<UpdateError>,
}

impl UpdateSession {
    pub fn new(now_ms: u32) -> Self {
        Self {
            started_ms: now_ms,
            phase_started_ms: now_ms,
            step_done: false,
            release: None,
            progress: None,
            error: None,
        }
    }

    /// Start a new phase
    pub fn enter_phase(&mut self, now_ms: u32) {
        self.phase_started_ms = now_ms;
        self.step_done = false;
    }

    pub fn phase_elapsed_ms(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.phase_started_ms)
    }

    /// Border position of the spinner head, one step per `step_ms`
    ///
    /// Runs continuously across phases so the spinner never jumps.
    pub fn spinner_position(&self, now_ms: u32, step_ms: u32) -> usize {
        (elapsed_ms(now_ms, self.started_ms) / step_ms.max(1)) as usize % BORDER_LEN
    }

    pub fn step_done(&self) -> bool {
        self.step_done
    }

    pub fn mark_step_done(&mut self) {
        self.step_done = true;
    }

    pub fn release(&self) -> Option<&Release> {
        self.release.as_ref()
    }

    pub fn set_release(&mut self, release: Release) {
        self.release = Some(release);
    }

    pub fn progress(&self) -> Option<DownloadProgress> {
        self.progress
    }

    pub fn set_progress(&mut self, progress: DownloadProgress) {
        self.progress = Some(progress);
    }

    pub fn error(&self) -> Option<UpdateError> {
        self.error
    }

    pub fn fail(&mut self, error: UpdateError) {
        self.error = Some(error);
    }

    /// Total length of the error display
    pub const fn error_display_ms() -> u32 {
        ERROR_FLASHES * 2 * ERROR_FLASH_MS + ERROR_HOLD_MS
    }

    /// Whether the error flash shows red at `now_ms`
    ///
    /// Each flash is an off half followed by a red half; after the last one
    /// red stays on until the reset.
    pub fn error_flash_on(&self, now_ms: u32) -> bool {
        let t = self.phase_elapsed_ms(now_ms);
        if t >= ERROR_FLASHES * 2 * ERROR_FLASH_MS {
            return true;
        }
        (t / ERROR_FLASH_MS) % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_flash_sequence() {
        let session = UpdateSession::new(1000);
        let on: heapless::Vec<bool, 8> = (0..8)
            .map(|half| session.error_flash_on(1000 + half * ERROR_FLASH_MS + 10))
            .collect();
        assert_eq!(&on[..], &[false, true, false, true, false, true, true, true]);
        assert_eq!(UpdateSession::error_display_ms(), 1700);
    }

    #[test]
    fn test_phase_resets_step() {
        let mut session = UpdateSession::new(0);
        session.mark_step_done();
        assert!(session.step_done());
        session.enter_phase(500);
        assert!(!session.step_done());
        assert_eq!(session.phase_elapsed_ms(700), 200);
        // Spinner keeps counting from session start
        assert_eq!(session.spinner_position(700, 100), 7);
        assert_eq!(session.spinner_position(3000, 100), 2);
    }

    #[test]
    fn test_failure_recorded() {
        let mut session = UpdateSession::new(0);
        assert_eq!(session.error(), None);
        session.fail(UpdateError::Http(404));
        assert_eq!(session.error(), Some(UpdateError::Http(404)));
    }
}
