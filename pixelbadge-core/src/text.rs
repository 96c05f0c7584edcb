//! Scrolling banner text
//!
//! A tiny 6-row font covering the letters of the weekend banner. Glyph rows
//! are stored MSB-first with column 0 in bit 7, already shifted so the
//! leftmost lit column is column 0.

use crate::color::{Brightness, Rgb};
use crate::frame::{Frame, MATRIX_SIZE};

/// Banner shown in bonus mode
pub const BONUS_TEXT: &str = "FRIYAY!";

/// Milliseconds per one-column scroll step
pub const SCROLL_STEP_MS: u32 = 100;

/// Glyph rows start one row below the top edge
const TEXT_TOP_ROW: i16 = 1;

/// Hue distance between neighbouring diagonals of the background
const BACKGROUND_HUE_STEP: u32 = 8;

const GLYPH_ROWS: usize = 6;

#[derive(Debug, Clone, Copy)]
struct Glyph {
    width: u8,
    rows: [u8; GLYPH_ROWS],
}

fn glyph(c: char) -> Option<Glyph> {
    let (width, rows) = match c {
        'F' => (4, [0xF0, 0x80, 0x80, 0xC0, 0x80, 0x80]),
        'R' => (4, [0xF0, 0x90, 0x90, 0xE0, 0xA0, 0x90]),
        'I' => (1, [0x80; GLYPH_ROWS]),
        'Y' => (5, [0x88, 0x88, 0x70, 0x20, 0x20, 0x20]),
        'A' => (5, [0x70, 0x88, 0x88, 0xF8, 0x88, 0x88]),
        '!' => (1, [0x80, 0x80, 0x80, 0x80, 0x00, 0x80]),
        _ => return None,
    };
    Some(Glyph { width, rows })
}

/// Columns for one full pass: glyphs, 1 px gaps and a blank screen width
///
/// Characters without a glyph are skipped.
pub fn scroll_period(text: &str) -> u32 {
    let glyphs: u32 = text
        .chars()
        .filter_map(glyph)
        .map(|g| g.width as u32 + 1)
        .sum();
    glyphs + MATRIX_SIZE as u32
}

/// Scroll position `elapsed_ms` after the banner started
pub fn scroll_position(text: &str, elapsed_ms: u32) -> u32 {
    (elapsed_ms / SCROLL_STEP_MS) % scroll_period(text)
}

/// Draw `text` over a moving diagonal rainbow
///
/// `position` 0 places the first glyph just off the right edge; each step
/// moves the text one column left.
pub fn scroll_text(frame: &mut Frame, text: &str, position: u32, now_ms: u32, brightness: Brightness) {
    let hue_offset = now_ms / 15;
    for row in 0..MATRIX_SIZE as i16 {
        for col in 0..MATRIX_SIZE as i16 {
            let hue = (hue_offset + (row + col) as u32 * BACKGROUND_HUE_STEP) % 256;
            frame.set_pixel(row, col, Rgb::wheel(hue as u8).scale(brightness));
        }
    }

    let text_color = Rgb::WHITE.scale(brightness);
    let mut x = MATRIX_SIZE as i32 - position as i32;
    for g in text.chars().filter_map(glyph) {
        for (r, bits) in g.rows.iter().enumerate() {
            for c in 0..g.width {
                if bits & (0x80 >> c) != 0 {
                    let col = x + c as i32;
                    if (0..MATRIX_SIZE as i32).contains(&col) {
                        frame.set_pixel(TEXT_TOP_ROW + r as i16, col as i16, text_color);
                    }
                }
            }
        }
        x += g.width as i32 + 1;
    }
}
