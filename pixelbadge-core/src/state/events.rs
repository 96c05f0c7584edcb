//! Events that trigger mode transitions
//!
//! The controller also reports every applied event back to its caller,
//! which is where logging happens.

use super::update::ResetReason;
use crate::traits::{StoreError, UpdateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Button events
    /// Button released before the long-press threshold
    ShortPress,
    /// Button held past the long-press threshold
    LongPress,

    // Boot gestures
    /// Button was down at power-on
    BootHeld,
    /// Boot hold lasted long enough to request an update
    BootUpdateHold,

    // Timer events
    /// Intro animation or intro colour finished
    IntroFinished,
    /// No input during Pomodoro setup
    SetupTimedOut,
    /// Pomodoro countdown reached zero
    TimerFinished,

    // Scheduled events
    /// Nightly maintenance window reached
    MaintenanceWindow,
    /// Bonus phase added to the status cycle
    BonusStarted,
    /// Bonus phase removed from the status cycle
    BonusEnded,

    // Update flow
    /// Network connection is up
    Connected,
    /// Fetched release will be installed
    UpdateAvailable,
    /// Image downloaded
    Downloaded,
    /// Update step failed
    UpdateFailed(UpdateError),
    /// Device reset requested; the controller halts afterwards
    Reset(ResetReason),

    // Persistence
    /// Selected character written to storage
    SelectionSaved,
    /// Selected character could not be written
    SaveFailed(StoreError),
}

impl Event {
    /// Check if this event came from the button
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            Event::ShortPress | Event::LongPress | Event::BootHeld | Event::BootUpdateHold
        )
    }

    /// Check if this event came from the wall-clock schedule
    pub fn is_scheduled_event(&self) -> bool {
        matches!(
            self,
            Event::MaintenanceWindow | Event::BonusStarted | Event::BonusEnded
        )
    }

    /// Check if this event indicates a failure
    pub fn is_error_event(&self) -> bool {
        matches!(self, Event::UpdateFailed(_) | Event::SaveFailed(_))
    }
}
