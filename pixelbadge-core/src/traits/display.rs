//! LED matrix output

use crate::color::Rgb;
use crate::frame::PIXEL_COUNT;

/// Sink for finished frames
///
/// Pixels arrive in row-major order with brightness already applied. The
/// driver is responsible for any wiring-order remapping and timing.
pub trait LedMatrix {
    fn write(&mut self, pixels: &[Rgb; PIXEL_COUNT]);
}
