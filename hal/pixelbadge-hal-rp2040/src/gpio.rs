//! GPIO input for RP2040

use embassy_rp::gpio::Input;

/// Button input pin
///
/// Thin wrapper so the embassy pin can implement the shared trait.
pub struct Rp2040Input<'d> {
    pin: Input<'d>,
}

impl<'d> Rp2040Input<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl pixelbadge_hal::InputPin for Rp2040Input<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
