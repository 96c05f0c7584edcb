//! Button input

/// The single user button
pub trait Button {
    /// Current level, `true` while held down
    ///
    /// Implementations hide the electrical polarity; the usual wiring is an
    /// active-low pin with a pull-up.
    fn is_pressed(&mut self) -> bool;
}
