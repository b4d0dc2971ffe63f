//! 5x7 bitmap font
//!
//! Only the characters the diagram uses are present. Each glyph is five
//! column bytes, bit 0 being the top row.

use crate::canvas::Canvas;

/// Glyph width in pixels
pub const GLYPH_WIDTH: i32 = 5;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: i32 = 7;

/// Horizontal advance per character (glyph plus one blank column)
pub const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

struct Glyph {
    ch: char,
    columns: [u8; 5],
}

const fn g(ch: char, columns: [u8; 5]) -> Glyph {
    Glyph { ch, columns }
}

const FONT_5X7: &[Glyph] = &[
    g(' ', [0x00, 0x00, 0x00, 0x00, 0x00]),
    g('/', [0x20, 0x10, 0x08, 0x04, 0x02]),
    g('0', [0x3E, 0x51, 0x49, 0x45, 0x3E]),
    g('1', [0x00, 0x42, 0x7F, 0x40, 0x00]),
    g('2', [0x42, 0x61, 0x51, 0x49, 0x46]),
    g('A', [0x7E, 0x11, 0x11, 0x11, 0x7E]),
    g('D', [0x7F, 0x41, 0x41, 0x22, 0x1C]),
    g('I', [0x00, 0x41, 0x7F, 0x41, 0x00]),
    g('J', [0x20, 0x40, 0x41, 0x3F, 0x01]),
    g('M', [0x7F, 0x04, 0x18, 0x04, 0x7F]),
    g('N', [0x7F, 0x08, 0x10, 0x20, 0x7F]),
    g('O', [0x3E, 0x41, 0x41, 0x41, 0x3E]),
    g('R', [0x7F, 0x09, 0x19, 0x29, 0x46]),
    g('T', [0x01, 0x01, 0x7F, 0x01, 0x01]),
    g('X', [0x63, 0x14, 0x08, 0x14, 0x63]),
    g('Y', [0x07, 0x08, 0x70, 0x08, 0x07]),
];

/// Column bitmaps for a character, if the font has it
pub fn glyph(ch: char) -> Option<&'static [u8; 5]> {
    FONT_5X7.iter().find(|g| g.ch == ch).map(|g| &g.columns)
}

/// Draw `text` with its top-left corner at (`x`, `y`)
///
/// Every source pixel becomes a `scale` x `scale` block (a scale of 0 is
/// treated as 1). Characters missing from the font draw nothing but still
/// advance the cursor. Returns the x position after the last character.
pub fn draw_text<C: Canvas + ?Sized>(canvas: &mut C, x: i32, y: i32, text: &str, scale: u8) -> i32 {
    let k = i32::from(scale.max(1));
    let mut cursor = x;

    for ch in text.chars() {
        if let Some(columns) = glyph(ch) {
            for (cx, column) in (0..).zip(columns.iter()) {
                for row in 0..GLYPH_HEIGHT {
                    if (*column >> row) & 1 == 0 {
                        continue;
                    }
                    for dx in 0..k {
                        for dy in 0..k {
                            canvas.set_pixel(cursor + cx * k + dx, y + row * k + dy, true);
                        }
                    }
                }
            }
        }
        cursor += GLYPH_ADVANCE * k;
    }

    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('1'), Some(&[0x00, 0x42, 0x7F, 0x40, 0x00]));
        assert!(glyph('a').is_none());
        assert!(glyph('?').is_none());
    }

    #[test]
    fn test_diagram_characters_are_mapped() {
        for ch in "AND NAND OR NOR XOR XNOR MAJ MIN NOT Y /Y Y1 Y2 01".chars() {
            assert!(glyph(ch).is_some(), "missing glyph {:?}", ch);
        }
    }

    #[test]
    fn test_draw_single_glyph() {
        let mut fb = Framebuffer::new();
        let end = draw_text(&mut fb, 10, 20, "1", 1);
        assert_eq!(end, 16);
        // Middle column of '1' is a full stroke
        for row in 0..GLYPH_HEIGHT {
            assert!(fb.pixel(12, 20 + row));
        }
        // Nothing right of the glyph
        assert!(!fb.pixel(15, 23));
    }

    #[test]
    fn test_unknown_character_keeps_advance() {
        let mut known = Framebuffer::new();
        let mut unknown = Framebuffer::new();
        draw_text(&mut known, 0, 0, " 1", 1);
        let end = draw_text(&mut unknown, 0, 0, "?1", 1);
        assert_eq!(end, 2 * GLYPH_ADVANCE);
        assert_eq!(known, unknown);
    }

    #[test]
    fn test_scale_replicates_pixels() {
        let mut fb = Framebuffer::new();
        let end = draw_text(&mut fb, 0, 0, "T", 2);
        assert_eq!(end, 12);
        // Top bar of 'T' spans all five columns, two pixels tall
        for x in 0..10 {
            assert!(fb.pixel(x, 0) && fb.pixel(x, 1));
        }
        assert!(!fb.pixel(0, 2));
        // Stem is two pixels wide down the full height
        for y in 0..14 {
            assert!(fb.pixel(4, y) && fb.pixel(5, y));
        }
    }

    #[test]
    fn test_zero_scale_draws_at_one() {
        let mut a = Framebuffer::new();
        let mut b = Framebuffer::new();
        draw_text(&mut a, 3, 3, "NOR", 0);
        draw_text(&mut b, 3, 3, "NOR", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_slash_rises_to_the_right() {
        let mut fb = Framebuffer::new();
        draw_text(&mut fb, 0, 0, "/", 1);
        assert!(fb.pixel(0, 5));
        assert!(fb.pixel(4, 1));
        assert!(!fb.pixel(0, 1));
    }
}
