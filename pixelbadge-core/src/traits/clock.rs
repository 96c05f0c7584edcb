//! Monotonic and wall-clock time

/// Local calendar time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// Monday = 0 through Sunday = 6
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    /// `(year, month, day)`, used to remember "already done today"
    pub fn date(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

/// Time source for the main loop
pub trait Clock {
    /// Free-running millisecond counter, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;

    /// Local wall-clock time, `None` until synchronized
    ///
    /// Timezone and daylight-saving adjustments are the implementation's
    /// concern.
    fn wall_time(&self) -> Option<WallTime>;
}
