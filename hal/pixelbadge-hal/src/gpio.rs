//! GPIO pin abstractions
//!
//! Provides the digital input trait implemented by chip-specific HALs.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin whose asserted level is low
///
/// The badge button pulls the line to ground when pressed, with the
/// internal pull-up holding it high otherwise.
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wrap a pin whose asserted level is low
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Check if the input is asserted (pin reads low)
    pub fn is_asserted(&self) -> bool {
        self.pin.is_low()
    }
}
