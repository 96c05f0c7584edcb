//! Millisecond tick arithmetic
//!
//! The badge runs off a free-running `u32` millisecond counter that wraps
//! roughly every 49.7 days. Every timer in the crate compares ticks through
//! these helpers so that comparisons stay correct across the wrap.

/// Signed difference `now - earlier` on the wrapping tick counter
///
/// Results are correct as long as the two ticks are less than 2^31 ms
/// (about 24.8 days) apart.
pub fn ticks_diff(now: u32, earlier: u32) -> i32 {
    now.wrapping_sub(earlier) as i32
}

/// Milliseconds elapsed since `since`, clamped to zero
///
/// A `since` slightly in the future (clock jitter, a timer restarted later
/// in the same tick) counts as "just now" rather than as a huge interval.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    ticks_diff(now, since).max(0) as u32
}

/// Check whether at least `duration_ms` has passed since `since`
pub fn has_elapsed(now: u32, since: u32, duration_ms: u32) -> bool {
    elapsed_ms(now, since) >= duration_ms
}
