//! Built-in 5×7 bitmap faces.
//!
//! Two faces ship with the crate:
//!
//! * [`BitmapFont::terminal`] covers printable ASCII and is the default face
//!   for manuscript text, banner and footer.
//! * [`BitmapFont::matrix`] covers the falling-code alphabet
//!   ([`MATRIX_GLYPHS`]): the digits `0`/`1` and a handful of katakana.
//!
//! Neither face has a `.notdef` glyph. Asking for an uncovered character is
//! reported to the caller, which picks its own fallback.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Glyph cell width in font units.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph cell height in font units.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per glyph in font units (one column of spacing).
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Alphabet of the falling-code background.
pub const MATRIX_GLYPHS: &str = "01ブラックハットネオハッカー";

/// One glyph, stored column-major: bit 0 of each column is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    columns: [u8; GLYPH_WIDTH as usize],
}

impl Glyph {
    const fn from_columns(columns: [u8; GLYPH_WIDTH as usize]) -> Self {
        Self { columns }
    }

    /// Build from seven `#`/`.` rows of five cells each.
    fn from_rows(rows: [&str; GLYPH_HEIGHT as usize]) -> Self {
        let mut columns = [0u8; GLYPH_WIDTH as usize];
        for (row, line) in rows.iter().enumerate() {
            for (col, cell) in line.chars().take(GLYPH_WIDTH as usize).enumerate() {
                if cell == '#' {
                    columns[col] |= 1 << row;
                }
            }
        }
        Self { columns }
    }

    /// Whether the cell at (`col`, `row`) is lit.
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        col < GLYPH_WIDTH && row < GLYPH_HEIGHT && self.columns[col as usize] & (1 << row) != 0
    }

    /// Lit cells as `(col, row)` pairs.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..GLYPH_WIDTH).flat_map(move |c| {
            (0..GLYPH_HEIGHT).filter_map(move |r| self.is_set(c, r).then_some((c, r)))
        })
    }
}

/// A fixed-pitch bitmap face.
#[derive(Debug)]
pub struct BitmapFont {
    name: &'static str,
    glyphs: HashMap<char, Glyph>,
}

impl BitmapFont {
    /// The printable-ASCII face.
    pub fn terminal() -> &'static BitmapFont {
        &TERMINAL
    }

    /// The falling-code face.
    pub fn matrix() -> &'static BitmapFont {
        &MATRIX
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn covers(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// First character of `text` the face cannot draw.
    pub fn first_missing(&self, text: &str) -> Option<char> {
        text.chars().find(|&c| !self.covers(c))
    }
}

// Printable ASCII 0x20..=0x7E, column-major.
const ASCII_COLUMNS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x00, 0x7F, 0x41, 0x41], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x41, 0x41, 0x7F, 0x00, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x02, 0x01, 0x02, 0x04, 0x02], // ~
];

#[rustfmt::skip]
const KATAKANA_ROWS: [(char, [&str; 7]); 10] = [
    ('ブ', ["...##", "####.", "...#.", "...#.", "..#..", ".#...", "#...."]),
    ('ラ', [".###.", ".....", "#####", "....#", "...#.", "..#..", ".#..."]),
    ('ッ', [".....", ".....", "#.#.#", "#.#.#", "....#", "...#.", "..#.."]),
    ('ク', [".#...", ".####", "#...#", "....#", "...#.", "..#..", ".#..."]),
    ('ハ', [".....", ".#.#.", ".#.#.", "#...#", "#...#", "#...#", "....."]),
    ('ト', [".#...", ".#...", ".##..", ".#.#.", ".#...", ".#...", ".#..."]),
    ('ネ', ["..#..", "#####", "...#.", "..#..", ".###.", "#.#.#", "..#.."]),
    ('オ', ["...#.", "#####", "...#.", "..##.", ".#.#.", "#..#.", "..##."]),
    ('カ', ["..#..", "#####", "..#.#", "..#.#", ".#..#", ".#..#", "#..#."]),
    ('ー', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
];

fn ascii_glyphs() -> impl Iterator<Item = (char, Glyph)> {
    ASCII_COLUMNS
        .iter()
        .zip(' '..='~')
        .map(|(cols, ch)| (ch, Glyph::from_columns(*cols)))
}

static TERMINAL: Lazy<BitmapFont> = Lazy::new(|| BitmapFont {
    name: "terminal",
    glyphs: ascii_glyphs().collect(),
});

static MATRIX: Lazy<BitmapFont> = Lazy::new(|| {
    let digits = ascii_glyphs().filter(|(ch, _)| matches!(ch, '0' | '1'));
    let kana = KATAKANA_ROWS
        .iter()
        .map(|(ch, rows)| (*ch, Glyph::from_rows(*rows)));
    BitmapFont {
        name: "matrix",
        glyphs: digits.chain(kana).collect(),
    }
});
