//! 64-pixel frame buffer
//!
//! Index layout is row-major: `row * 8 + col`, matching the serpentine-free
//! wiring of the matrix. The frame does no colour math of its own; callers
//! hand it final (already dimmed) colours.

use crate::color::Rgb;
use crate::traits::LedMatrix;

/// Width and height of the matrix
pub const MATRIX_SIZE: usize = 8;

/// Total pixel count
pub const PIXEL_COUNT: usize = MATRIX_SIZE * MATRIX_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pixels: [Rgb; PIXEL_COUNT],
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb::BLACK; PIXEL_COUNT],
        }
    }

    fn index(row: i16, col: i16) -> Option<usize> {
        let size = MATRIX_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(row as usize * MATRIX_SIZE + col as usize)
        } else {
            None
        }
    }

    /// Set one pixel; coordinates outside the matrix are ignored
    pub fn set_pixel(&mut self, row: i16, col: i16, color: Rgb) {
        if let Some(i) = Self::index(row, col) {
            self.pixels[i] = color;
        }
    }

    /// Read one pixel; coordinates outside the matrix read as black
    pub fn pixel(&self, row: i16, col: i16) -> Rgb {
        Self::index(row, col)
            .map(|i| self.pixels[i])
            .unwrap_or(Rgb::BLACK)
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels = [color; PIXEL_COUNT];
    }

    pub fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }

    pub fn pixels(&self) -> &[Rgb; PIXEL_COUNT] {
        &self.pixels
    }

    /// Number of non-black pixels
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != Rgb::BLACK).count()
    }

    /// Push the buffer to the LED driver
    pub fn flush<M: LedMatrix + ?Sized>(&self, matrix: &mut M) {
        matrix.write(&self.pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capture(Option<[Rgb; PIXEL_COUNT]>);

    impl LedMatrix for Capture {
        fn write(&mut self, pixels: &[Rgb; PIXEL_COUNT]) {
            self.0 = Some(*pixels);
        }
    }

    #[test]
    fn test_row_major_indexing() {
        let mut frame = Frame::new();
        frame.set_pixel(1, 2, Rgb::RED);
        assert_eq!(frame.pixels()[10], Rgb::RED);
        assert_eq!(frame.pixel(1, 2), Rgb::RED);
        assert_eq!(frame.lit_count(), 1);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut frame = Frame::new();
        frame.set_pixel(-1, 0, Rgb::RED);
        frame.set_pixel(8, 0, Rgb::RED);
        frame.set_pixel(0, 8, Rgb::RED);
        assert_eq!(frame.lit_count(), 0);
        assert_eq!(frame.pixel(9, 9), Rgb::BLACK);
    }

    #[test]
    fn test_flush_writes_buffer() {
        let mut frame = Frame::new();
        frame.fill(Rgb::BLUE);
        let mut capture = Capture(None);
        frame.flush(&mut capture);
        assert_eq!(capture.0, Some([Rgb::BLUE; PIXEL_COUNT]));

        frame.clear();
        assert_eq!(frame.lit_count(), 0);
    }
}
