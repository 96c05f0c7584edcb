//! Whole-frame effects used outside character rendering

use crate::color::{Brightness, Rgb};
use crate::frame::{Frame, MATRIX_SIZE};

pub use crate::text::scroll_text;

/// Number of pixels around the matrix edge
pub const BORDER_LEN: usize = 4 * (MATRIX_SIZE - 1);

/// Pixels in the spinner's fading trail
pub const SPINNER_TRAIL: usize = 5;

/// Spinner and progress background, as a fraction of the base colour
const BACKGROUND_LEVEL: f32 = 0.1;

/// Spinner head, as a fraction of the base colour
const SPINNER_LEVEL: f32 = 0.4;

/// Truncating channel scale
fn dim(color: Rgb, level: f32) -> Rgb {
    color.map(|c| (c as f32 * level) as u8)
}

/// Border cell at `position`, walking clockwise from the top-left corner
///
/// Top row left to right, right column down, bottom row right to left,
/// then left column up. Positions wrap modulo [`BORDER_LEN`].
pub fn border_pixel(position: usize) -> (i16, i16) {
    let last = (MATRIX_SIZE - 1) as i16;
    let p = (position % BORDER_LEN) as i16;
    match p {
        p if p <= last => (0, p),
        p if p <= 2 * last => (p - last, last),
        p if p <= 3 * last => (last, 3 * last - p),
        p => (4 * last - p, 0),
    }
}

/// Fill the whole frame with `color` dimmed by `brightness`
pub fn fill_scaled(frame: &mut Frame, color: Rgb, brightness: Brightness) {
    frame.fill(color.scale(brightness));
}

/// Dim background with a bright head running round the border
pub fn spinner(frame: &mut Frame, color: Rgb, position: usize) {
    let background = dim(color, BACKGROUND_LEVEL);
    let head = dim(color, SPINNER_LEVEL);
    frame.fill(background);

    for i in 0..SPINNER_TRAIL {
        let pos = (position % BORDER_LEN + BORDER_LEN - i) % BORDER_LEN;
        let weight = (SPINNER_TRAIL - i) as f32 / SPINNER_TRAIL as f32;
        let (row, col) = border_pixel(pos);
        frame.set_pixel(row, col, background.lerp(head, weight));
    }
}

/// Columns filled left to right in proportion to `progress` (0.0 to 1.0)
pub fn progress_bar(frame: &mut Frame, color: Rgb, progress: f32) {
    frame.fill(dim(color, BACKGROUND_LEVEL));

    let progress = if progress.is_nan() { 0.0 } else { progress };
    let filled = ((progress.max(0.0) * MATRIX_SIZE as f32) as usize).min(MATRIX_SIZE);
    for row in 0..MATRIX_SIZE as i16 {
        for col in 0..filled as i16 {
            frame.set_pixel(row, col, color);
        }
    }
}
