//! Minimal 4x5 bitmap font. Each glyph is 4 pixels wide, 5 rows tall.
//! Bits are MSB-left within each u8 (only top 4 bits used). Digits cover the
//! counters; the few capitals spell the boot banner.

use crate::video::{Color, Rect, Region};

const GLYPHS: &[(&[u8; 5], u8)] = &[
    (&[0x60, 0x90, 0x90, 0x90, 0x60], b'0'),
    (&[0x20, 0x60, 0x20, 0x20, 0x70], b'1'),
    (&[0x60, 0x90, 0x20, 0x40, 0xF0], b'2'),
    (&[0x60, 0x90, 0x20, 0x90, 0x60], b'3'),
    (&[0x90, 0x90, 0xF0, 0x10, 0x10], b'4'),
    (&[0xF0, 0x80, 0xE0, 0x10, 0xE0], b'5'),
    (&[0x60, 0x80, 0xE0, 0x90, 0x60], b'6'),
    (&[0xF0, 0x10, 0x20, 0x40, 0x40], b'7'),
    (&[0x60, 0x90, 0x60, 0x90, 0x60], b'8'),
    (&[0x60, 0x90, 0x70, 0x10, 0x60], b'9'),
    (&[0x00, 0x00, 0x00, 0x00, 0x40], b'.'),
    (&[0x00, 0x00, 0x00, 0x00, 0x00], b' '),
    (&[0xE0, 0x90, 0xE0, 0x90, 0xE0], b'B'),
    (&[0x90, 0xA0, 0xC0, 0xA0, 0x90], b'K'),
    (&[0x60, 0x90, 0x90, 0x90, 0x60], b'O'),
    (&[0xF0, 0x40, 0x40, 0x40, 0x40], b'T'),
];

const BLANK: [u8; 5] = [0x00; 5];

pub const GLYPH_W: u32 = 4;
pub const GLYPH_H: u32 = 5;

/// Horizontal distance between glyph origins at scale 1 (glyph + 1px gap).
pub const ADVANCE: u32 = GLYPH_W + 1;

fn glyph_for(ch: u8) -> &'static [u8; 5] {
    GLYPHS
        .iter()
        .find(|&&(_, c)| c == ch)
        .map(|&(data, _)| data)
        .unwrap_or(&BLANK)
}

/// Width in pixels of `text` at `scale`, including the trailing gap.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.len() as u32 * ADVANCE * scale
}

/// Draw `text` with its top-left corner at (`x`, `y`), each font pixel
/// becoming a `scale`×`scale` block. Unknown characters render blank.
pub fn draw_text(region: &mut Region<'_>, x: i32, y: i32, text: &str, scale: u32, color: Color) {
    let step = (ADVANCE * scale) as i32;
    for (ci, ch) in text.bytes().enumerate() {
        let gx = x + ci as i32 * step;
        for (row, &bits) in glyph_for(ch).iter().enumerate() {
            let py = y + (row as u32 * scale) as i32;
            for col in 0..GLYPH_W {
                if bits & (0x80 >> col) != 0 {
                    let px = gx + (col * scale) as i32;
                    region.fill_rect(Rect::new(px, py, scale, scale), color);
                }
            }
        }
    }
}
