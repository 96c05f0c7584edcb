//! Configuration type definitions
//!
//! Defaults reproduce the stock badge behaviour. A configuration may be
//! stored in flash as postcard-serialized binary data to override them.

use heapless::String;

use crate::color::Brightness;
use crate::schedule::{BonusWindow, MaintenanceWindow};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum update URL length
pub const MAX_URL_LEN: usize = 128;

/// Maximum version string length
pub const MAX_VERSION_LEN: usize = 16;

/// Release metadata location
pub const DEFAULT_UPDATE_URL: &str =
    "http://raw.githubusercontent.com/underverket/dnd/main/firmware.json";

/// Version of this firmware
pub const FIRMWARE_VERSION: &str = "1.0.10";

fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Invalid configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A duration that must be non-zero is zero
    ZeroDuration,
    /// Pomodoro step is zero or larger than the maximum
    InvalidPomodoroRange,
    /// Hour, minute or weekday out of range
    InvalidTime,
    /// Empty update URL or version
    MissingUpdateSource,
}

/// Button and transition timings, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Hold time that turns a press into a long press
    pub long_press_ms: u32,
    /// Boot hold that enters the update flow
    pub boot_update_hold_ms: u32,
    /// Character slide-in on entering the default mode
    pub default_intro_ms: u32,
    /// Pomodoro intro colour before setup
    pub pomodoro_intro_ms: u32,
    /// Idle time in setup before the timer starts
    pub pomodoro_setup_timeout_ms: u32,
    /// Spinner advance interval
    pub spinner_step_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 700,
            boot_update_hold_ms: 4000,
            default_intro_ms: 600,
            pomodoro_intro_ms: 1000,
            pomodoro_setup_timeout_ms: 5000,
            spinner_step_ms: 100,
        }
    }
}

/// Pomodoro duration choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PomodoroConfig {
    /// Duration added per short press, also the starting duration
    pub step_minutes: u16,
    /// Longest duration before wrapping back to one step
    pub max_minutes: u16,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            step_minutes: 15,
            max_minutes: 300,
        }
    }
}

/// Wall-clock driven checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConfig {
    /// How often the maintenance window is checked
    pub maintenance_check_ms: u32,
    pub maintenance: MaintenanceWindow,
    /// How often the bonus window is checked
    pub bonus_check_ms: u32,
    pub bonus: BonusWindow,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            maintenance_check_ms: 60_000,
            maintenance: MaintenanceWindow::default(),
            bonus_check_ms: 10_000,
            bonus: BonusWindow::default(),
        }
    }
}

/// Self-update settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UpdateConfig {
    /// Where release metadata is fetched from
    pub url: String<MAX_URL_LEN>,
    /// Version of the running firmware
    pub current_version: String<MAX_VERSION_LEN>,
    /// Install the fetched release even when it is not newer
    pub force_update: bool,
    /// Network connection timeout
    pub connect_timeout_ms: u32,
    /// Minimum time the checking spinner is shown
    pub check_hold_ms: u32,
    /// Time the installing spinner is shown before reset
    pub install_hold_ms: u32,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            url: bounded(DEFAULT_UPDATE_URL),
            current_version: bounded(FIRMWARE_VERSION),
            force_update: true,
            connect_timeout_ms: 10_000,
            check_hold_ms: 2000,
            install_hold_ms: 2000,
        }
    }
}

/// Complete badge configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BadgeConfig {
    /// Global LED brightness, 0.0 to 1.0
    pub brightness: f32,
    pub timing: TimingConfig,
    pub pomodoro: PomodoroConfig,
    pub schedule: ScheduleConfig,
    pub update: UpdateConfig,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            brightness: 0.2,
            timing: TimingConfig::default(),
            pomodoro: PomodoroConfig::default(),
            schedule: ScheduleConfig::default(),
            update: UpdateConfig::default(),
        }
    }
}

impl BadgeConfig {
    /// Brightness clamped into range
    pub fn brightness(&self) -> Brightness {
        Brightness::new(self.brightness)
    }

    /// Check values that would stall or break the state machine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        if t.long_press_ms == 0 || t.default_intro_ms == 0 || t.spinner_step_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        let s = &self.schedule;
        if s.maintenance_check_ms == 0 || s.bonus_check_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        let p = &self.pomodoro;
        if p.step_minutes == 0 || p.step_minutes > p.max_minutes {
            return Err(ConfigError::InvalidPomodoroRange);
        }

        if !s.maintenance.is_valid() || !s.bonus.is_valid() {
            return Err(ConfigError::InvalidTime);
        }

        if self.update.url.is_empty() || self.update.current_version.is_empty() {
            return Err(ConfigError::MissingUpdateSource);
        }
        Ok(())
    }
}
