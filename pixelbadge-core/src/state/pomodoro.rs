//! Pomodoro timer session

use crate::config::PomodoroConfig;
use crate::time::has_elapsed;

const MS_PER_MINUTE: u32 = 60_000;

/// Timers and chosen duration for one visit to the Pomodoro mode
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PomodoroSession {
    config: PomodoroConfig,
    duration_minutes: u16,
    /// Start of the current phase; in setup, time of the last adjustment
    phase_started_ms: u32,
}

impl PomodoroSession {
    pub fn new(config: PomodoroConfig, now_ms: u32) -> Self {
        Self {
            config,
            duration_minutes: config.step_minutes,
            phase_started_ms: now_ms,
        }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.duration_minutes
    }

    /// Intro colour starts
    pub fn enter_intro(&mut self, now_ms: u32) {
        self.phase_started_ms = now_ms;
    }

    /// Setup starts with one step selected
    pub fn enter_setup(&mut self, now_ms: u32) {
        self.duration_minutes = self.config.step_minutes;
        self.phase_started_ms = now_ms;
    }

    /// Add one step, wrapping past the maximum; restarts the idle timeout
    pub fn increase(&mut self, now_ms: u32) {
        let next = self.duration_minutes.saturating_add(self.config.step_minutes);
        self.duration_minutes = if next > self.config.max_minutes {
            self.config.step_minutes
        } else {
            next
        };
        self.phase_started_ms = now_ms;
    }

    /// Countdown starts
    pub fn start(&mut self, now_ms: u32) {
        self.phase_started_ms = now_ms;
    }

    /// Check if `duration_ms` has passed since the phase started
    pub fn phase_elapsed(&self, now_ms: u32, duration_ms: u32) -> bool {
        has_elapsed(now_ms, self.phase_started_ms, duration_ms)
    }

    /// Check if the countdown has run its full duration
    pub fn is_finished(&self, now_ms: u32) -> bool {
        self.phase_elapsed(now_ms, self.duration_minutes as u32 * MS_PER_MINUTE)
    }
}
