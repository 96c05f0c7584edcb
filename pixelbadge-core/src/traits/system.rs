//! Device control

pub trait SystemControl {
    /// Restart the device
    ///
    /// Does not return on hardware. Host doubles may return, after which
    /// the controller stays halted.
    fn reset(&mut self);
}
