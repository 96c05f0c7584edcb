//! Wall-clock driven checks
//!
//! Two periodic checks run off the monotonic clock and consult the wall
//! clock only when they are due: a nightly maintenance window that starts an
//! update check once per day, and a weekly bonus window that adds the
//! banner to the default mode's status cycle.

use crate::config::ScheduleConfig;
use crate::time::has_elapsed;
use crate::traits::WallTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Daily window in which a maintenance update check starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaintenanceWindow {
    pub hour: u8,
    /// Window closes at this minute of `hour`
    pub end_minute: u8,
}

impl Default for MaintenanceWindow {
    fn default() -> Self {
        Self {
            hour: 3,
            end_minute: 45,
        }
    }
}

impl MaintenanceWindow {
    pub fn contains(&self, t: &WallTime) -> bool {
        t.hour == self.hour && t.minute < self.end_minute
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.end_minute <= 60
    }
}

/// Weekly window spanning midnight, from `start_weekday` at `start_hour`
/// until `end_weekday` at `end_hour`
///
/// Weekdays count from Monday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BonusWindow {
    pub start_weekday: u8,
    pub start_hour: u8,
    pub end_weekday: u8,
    pub end_hour: u8,
}

impl Default for BonusWindow {
    /// Friday 15:00 until Saturday 02:00
    fn default() -> Self {
        Self {
            start_weekday: 4,
            start_hour: 15,
            end_weekday: 5,
            end_hour: 2,
        }
    }
}

impl BonusWindow {
    pub fn contains(&self, t: &WallTime) -> bool {
        if self.start_weekday == self.end_weekday {
            return t.weekday == self.start_weekday
                && t.hour >= self.start_hour
                && t.hour < self.end_hour;
        }
        (t.weekday == self.start_weekday && t.hour >= self.start_hour)
            || (t.weekday == self.end_weekday && t.hour < self.end_hour)
    }

    pub fn is_valid(&self) -> bool {
        self.start_weekday < 7 && self.end_weekday < 7 && self.start_hour < 24 && self.end_hour < 24
    }
}

/// Periodic check timers and the "already checked today" marker
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Schedule {
    config: ScheduleConfig,
    last_maintenance_check_ms: u32,
    last_bonus_check_ms: u32,
    last_maintenance_day: Option<(u16, u8, u8)>,
}

impl Schedule {
    pub fn new(config: ScheduleConfig, now_ms: u32) -> Self {
        Self {
            config,
            last_maintenance_check_ms: now_ms,
            last_bonus_check_ms: now_ms,
            last_maintenance_day: None,
        }
    }

    /// Run the maintenance check if it is due
    ///
    /// Returns `true` at most once per calendar day, when the wall clock is
    /// synchronized and inside the window. `wall_time` is only called when
    /// the check interval has elapsed.
    pub fn maintenance_due(
        &mut self,
        now_ms: u32,
        wall_time: impl FnOnce() -> Option<WallTime>,
    ) -> bool {
        if !has_elapsed(now_ms, self.last_maintenance_check_ms, self.config.maintenance_check_ms) {
            return false;
        }
        self.last_maintenance_check_ms = now_ms;

        let Some(t) = wall_time() else {
            return false;
        };
        if !self.config.maintenance.contains(&t) || self.last_maintenance_day == Some(t.date()) {
            return false;
        }
        self.last_maintenance_day = Some(t.date());
        true
    }

    /// Run the bonus check if it is due
    ///
    /// Returns `Some(inside_window)` when the check ran against a
    /// synchronized clock, `None` otherwise.
    pub fn bonus_check(
        &mut self,
        now_ms: u32,
        wall_time: impl FnOnce() -> Option<WallTime>,
    ) -> Option<bool> {
        if !has_elapsed(now_ms, self.last_bonus_check_ms, self.config.bonus_check_ms) {
            return None;
        }
        self.last_bonus_check_ms = now_ms;
        wall_time().map(|t| self.config.bonus.contains(&t))
    }
}
