//! Proportional 8-pixel font
//!
//! Glyphs are stored column by column in page layout: one byte per column,
//! bit 0 is the top row. Each glyph is only as wide as its ink, and
//! [`Canvas::draw_string`](crate::Canvas::draw_string) adds the font's
//! spacing between glyphs.
//!
//! ```
//! use page_display::{Font, ProportionalFont};
//!
//! let font = ProportionalFont;
//! assert_eq!(font.height(), 8);
//! assert_eq!(font.glyph('T').map(<[u8]>::len), Some(5));
//! assert_eq!(font.glyph('\u{e9}'), None);
//! ```

/// Column-encoded bitmap font of at most 8 rows
pub trait Font {
    /// Glyph height in pixels
    fn height(&self) -> u8;

    /// Blank columns inserted after each glyph
    fn spacing(&self) -> u8 {
        1
    }

    /// Column bytes of `c`, or `None` when the font has no glyph for it
    fn glyph(&self, c: char) -> Option<&[u8]>;

    /// Advance used for characters without a glyph
    fn space_width(&self) -> u8 {
        self.glyph(' ').map_or(self.height() / 2, |g| g.len() as u8)
    }
}

/// Printable ASCII (`' '..='~'`), 1 to 8 columns per glyph
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProportionalFont;

const FIRST: char = ' ';
const LAST: char = '~';

impl Font for ProportionalFont {
    fn height(&self) -> u8 {
        8
    }

    fn glyph(&self, c: char) -> Option<&[u8]> {
        if !(FIRST..=LAST).contains(&c) {
            return None;
        }
        Some(GLYPHS[c as usize - FIRST as usize])
    }
}

#[rustfmt::skip]
static GLYPHS: [&[u8]; 95] = [
    &[0x00, 0x00], // ' '
    &[0xBE], // '!'
    &[0x06, 0x00, 0x06], // '"'
    &[0x28, 0xFE, 0x28, 0xFE, 0x28], // '#'
    &[0x48, 0x54, 0xFE, 0x54, 0x24], // '$'
    &[0x46, 0x26, 0x10, 0xC8, 0xC4], // '%'
    &[0x6C, 0x92, 0xAC, 0x40, 0xA0], // '&'
    &[0x06], // "'"
    &[0x38, 0x44, 0x82], // '('
    &[0x82, 0x44, 0x38], // ')'
    &[0x28, 0x10, 0x28], // '*'
    &[0x10, 0x38, 0x10], // '+'
    &[0xC0], // ','
    &[0x10, 0x10, 0x10], // '-'
    &[0x80], // '.'
    &[0xC0, 0x38, 0x06], // '/'
    &[0x7C, 0xA2, 0x92, 0x8A, 0x7C], // '0'
    &[0x84, 0xFE, 0x80], // '1'
    &[0x84, 0xC2, 0xA2, 0x92, 0x8C], // '2'
    &[0x44, 0x82, 0x92, 0x92, 0x6C], // '3'
    &[0x30, 0x28, 0x24, 0xFE, 0x20], // '4'
    &[0x5E, 0x8A, 0x8A, 0x8A, 0x72], // '5'
    &[0x7C, 0x92, 0x92, 0x92, 0x64], // '6'
    &[0x02, 0x02, 0xF2, 0x0A, 0x06], // '7'
    &[0x6C, 0x92, 0x92, 0x92, 0x6C], // '8'
    &[0x4C, 0x92, 0x92, 0x92, 0x7C], // '9'
    &[0x44], // ':'
    &[0xC4], // ';'
    &[0x10, 0x28, 0x44, 0x82], // '<'
    &[0x28, 0x28, 0x28, 0x28], // '='
    &[0x82, 0x44, 0x28, 0x10], // '>'
    &[0x04, 0x02, 0xA2, 0x12, 0x0C], // '?'
    &[0x38, 0x44, 0x92, 0xAA, 0xAA, 0xBA, 0x24, 0x18], // '@'
    &[0xF8, 0x14, 0x12, 0x14, 0xF8], // 'A'
    &[0xFE, 0x92, 0x92, 0x6C], // 'B'
    &[0x7C, 0x82, 0x82, 0x44], // 'C'
    &[0xFE, 0x82, 0x82, 0x7C], // 'D'
    &[0xFE, 0x92, 0x92, 0x82], // 'E'
    &[0xFE, 0x12, 0x12, 0x02], // 'F'
    &[0x7C, 0x82, 0x92, 0x92, 0xF4], // 'G'
    &[0xFE, 0x10, 0x10, 0xFE], // 'H'
    &[0x82, 0xFE, 0x82], // 'I'
    &[0x40, 0x80, 0x80, 0x7E], // 'J'
    &[0xFE, 0x10, 0x28, 0x44, 0x82], // 'K'
    &[0xFE, 0x80, 0x80, 0x80], // 'L'
    &[0xFE, 0x04, 0x08, 0x04, 0xFE], // 'M'
    &[0xFE, 0x04, 0x18, 0x60, 0xFE], // 'N'
    &[0x7C, 0x82, 0x82, 0x7C], // 'O'
    &[0xFE, 0x12, 0x12, 0x0C], // 'P'
    &[0x7C, 0x82, 0xA2, 0x42, 0xBC], // 'Q'
    &[0xFE, 0x12, 0x32, 0xCC], // 'R'
    &[0x4C, 0x92, 0x92, 0x64], // 'S'
    &[0x02, 0x02, 0xFE, 0x02, 0x02], // 'T'
    &[0x7E, 0x80, 0x80, 0x7E], // 'U'
    &[0x0E, 0x30, 0xC0, 0x30, 0x0E], // 'V'
    &[0x3E, 0xC0, 0x38, 0xC0, 0x3E], // 'W'
    &[0xC6, 0x28, 0x10, 0x28, 0xC6], // 'X'
    &[0x06, 0x08, 0xF0, 0x08, 0x06], // 'Y'
    &[0xC2, 0xA2, 0x92, 0x8A, 0x86], // 'Z'
    &[0xFE, 0x82, 0x82], // '['
    &[0x06, 0x38, 0xC0], // '\\'
    &[0x82, 0x82, 0xFE], // ']'
    &[0x04, 0x02, 0x04], // '^'
    &[0x80, 0x80, 0x80], // '_'
    &[0x02, 0x04], // '`'
    &[0x70, 0x88, 0x88, 0xF8], // 'a'
    &[0xFE, 0x88, 0x88, 0x70], // 'b'
    &[0x70, 0x88, 0x88, 0x88], // 'c'
    &[0x70, 0x88, 0x88, 0xFE], // 'd'
    &[0x70, 0xA8, 0xA8, 0x30], // 'e'
    &[0xFC, 0x12, 0x02], // 'f'
    &[0x10, 0xA8, 0xA8, 0x78], // 'g'
    &[0xFE, 0x10, 0x08, 0xF0], // 'h'
    &[0xFA], // 'i'
    &[0x80, 0x7A], // 'j'
    &[0xFE, 0x20, 0x50, 0x88], // 'k'
    &[0xFE], // 'l'
    &[0xF8, 0x08, 0xF0, 0x08, 0xF0], // 'm'
    &[0xF8, 0x10, 0x08, 0xF0], // 'n'
    &[0x70, 0x88, 0x88, 0x70], // 'o'
    &[0xF8, 0x28, 0x28, 0x10], // 'p'
    &[0x10, 0x28, 0x28, 0xF8], // 'q'
    &[0xF8, 0x10, 0x08], // 'r'
    &[0x90, 0xA8, 0xA8, 0x48], // 's'
    &[0x08, 0x7C, 0x88], // 't'
    &[0x78, 0x80, 0x80, 0xF8], // 'u'
    &[0x18, 0x60, 0x80, 0x60, 0x18], // 'v'
    &[0x38, 0xC0, 0x30, 0xC0, 0x38], // 'w'
    &[0x88, 0x50, 0x20, 0x50, 0x88], // 'x'
    &[0x18, 0xA0, 0xA0, 0x78], // 'y'
    &[0xC8, 0xA8, 0x98], // 'z'
    &[0x10, 0x6C, 0x82], // '{'
    &[0xFE], // '|'
    &[0x82, 0x6C, 0x10], // '}'
    &[0x10, 0x08, 0x10, 0x20, 0x10], // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_ascii_is_covered() {
        let font = ProportionalFont;
        for c in ' '..='~' {
            let glyph = font.glyph(c).unwrap();
            assert!(!glyph.is_empty(), "{c:?}");
            assert!(glyph.len() <= 8, "{c:?}");
        }
    }

    #[test]
    fn test_missing_glyphs() {
        let font = ProportionalFont;
        assert_eq!(font.glyph('\n'), None);
        assert_eq!(font.glyph('\u{7f}'), None);
        assert_eq!(font.glyph('\u{b0}'), None);
        assert_eq!(font.space_width(), 2);
    }

    #[test]
    fn test_glyph_shapes() {
        let font = ProportionalFont;
        // 'T': top bar with a full-height stem in the middle
        assert_eq!(font.glyph('T'), Some(&[0x02, 0x02, 0xFE, 0x02, 0x02][..]));
        assert_eq!(font.glyph('.'), Some(&[0x80][..]));
        assert_eq!(font.glyph('1').map(<[u8]>::len), Some(3));
    }
}
