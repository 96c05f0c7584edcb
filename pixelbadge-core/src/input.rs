//! Button press interpretation
//!
//! Turns the sampled level of a single button into short and long presses.
//! A long press fires while the button is still held, once; the release that
//! follows it does not also count as a short press.

use crate::time::elapsed_ms;

/// Interpreted button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Released before the long-press threshold
    Short,
    /// Held past the long-press threshold
    Long,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressDetector {
    long_press_ms: u32,
    pressed_at: Option<u32>,
    long_press_handled: bool,
    suppressed: bool,
}

impl PressDetector {
    pub fn new(long_press_ms: u32) -> Self {
        Self {
            long_press_ms,
            pressed_at: None,
            long_press_handled: false,
            suppressed: false,
        }
    }

    /// Ignore the current hold entirely, until the button is released
    pub fn suppress_until_release(&mut self) {
        self.suppressed = true;
        self.pressed_at = None;
        self.long_press_handled = false;
    }

    /// Feed one sample of the button level
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<Press> {
        if self.suppressed {
            if !pressed {
                self.suppressed = false;
            }
            return None;
        }

        match (pressed, self.pressed_at) {
            (true, None) => {
                self.pressed_at = Some(now_ms);
                self.long_press_handled = false;
                None
            }
            (true, Some(start)) => {
                if !self.long_press_handled && elapsed_ms(now_ms, start) >= self.long_press_ms {
                    self.long_press_handled = true;
                    Some(Press::Long)
                } else {
                    None
                }
            }
            (false, Some(start)) => {
                self.pressed_at = None;
                let handled = core::mem::replace(&mut self.long_press_handled, false);
                // Crossed the threshold between samples; not a short press
                if handled || elapsed_ms(now_ms, start) >= self.long_press_ms {
                    None
                } else {
                    Some(Press::Short)
                }
            }
            (false, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(detector: &mut PressDetector, samples: &[(bool, u32)]) -> heapless::Vec<Press, 8> {
        samples
            .iter()
            .filter_map(|&(pressed, now)| detector.update(pressed, now))
            .collect()
    }

    #[test]
    fn test_short_press_on_release() {
        let mut d = PressDetector::new(700);
        let presses = run(&mut d, &[(true, 0), (true, 300), (false, 690)]);
        assert_eq!(&presses[..], &[Press::Short]);
    }

    #[test]
    fn test_release_past_threshold_is_not_short() {
        let mut d = PressDetector::new(700);
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(true, 695), None);
        assert_eq!(d.update(false, 705), None);
        // Detector is ready for the next press
        assert_eq!(d.update(true, 1000), None);
        assert_eq!(d.update(false, 1100), Some(Press::Short));
    }

    #[test]
    fn test_long_press_fires_once_while_held() {
        let mut d = PressDetector::new(700);
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(true, 699), None);
        assert_eq!(d.update(true, 700), Some(Press::Long));
        assert_eq!(d.update(true, 2000), None);
        // Release after long press is not a short press
        assert_eq!(d.update(false, 2100), None);
        // Next press starts fresh
        assert_eq!(d.update(true, 3000), None);
        assert_eq!(d.update(false, 3100), Some(Press::Short));
    }

    #[test]
    fn test_suppressed_hold_is_ignored() {
        let mut d = PressDetector::new(700);
        d.suppress_until_release();
        assert_eq!(d.update(true, 0), None);
        assert_eq!(d.update(true, 5000), None);
        assert_eq!(d.update(false, 5100), None);
        assert_eq!(d.update(true, 6000), None);
        assert_eq!(d.update(false, 6100), Some(Press::Short));
    }

    #[test]
    fn test_press_across_tick_wrap() {
        let mut d = PressDetector::new(700);
        let start = u32::MAX - 100;
        assert_eq!(d.update(true, start), None);
        assert_eq!(d.update(true, start.wrapping_add(50)), None);
        assert_eq!(d.update(true, start.wrapping_add(700)), Some(Press::Long));
    }
}
