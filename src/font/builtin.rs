//! The Helvetica family from the PDF standard 14 fonts.
//!
//! Every conforming PDF reader ships these, so nothing gets embedded: the document only
//! names the font and we carry the advance widths (from Adobe's AFM files, in 1/1000 em)
//! to measure text the same way the reader will draw it. Text is encoded with
//! `WinAnsiEncoding`, which matches Latin-1 for the printable ranges we emit.

use crate::units::Pt;

const ASCENDER: f32 = 718.0;

/// Byte written in place of characters WinAnsi can't represent
const SUBSTITUTE: u8 = b'?';

/// One of the built-in Helvetica faces
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl BuiltinFont {
    /// Look a font up by its PostScript name, ignoring case
    pub fn from_name(name: &str) -> Option<BuiltinFont> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Some(BuiltinFont::Helvetica),
            "helvetica-bold" => Some(BuiltinFont::HelveticaBold),
            "helvetica-oblique" => Some(BuiltinFont::HelveticaOblique),
            "helvetica-boldoblique" => Some(BuiltinFont::HelveticaBoldOblique),
            _ => None,
        }
    }

    /// The PostScript name the PDF refers to the font by
    pub fn base_name(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }

    /// Encode text as WinAnsi bytes
    pub fn encode(self, text: &str) -> Vec<u8> {
        text.chars().map(encode_char).collect()
    }

    /// Advance width of already-encoded bytes
    pub fn width_of_encoded(self, bytes: &[u8], size: Pt) -> Pt {
        let units: u32 = bytes.iter().map(|&b| self.advance(b) as u32).sum();
        size * (units as f32 / 1000.0)
    }

    pub fn text_width(self, text: &str, size: Pt) -> Pt {
        self.width_of_encoded(&self.encode(text), size)
    }

    pub fn ascent(self, size: Pt) -> Pt {
        size * (ASCENDER / 1000.0)
    }

    fn advance(self, byte: u8) -> u16 {
        let table = if self.is_bold() { &BOLD } else { &REGULAR };
        match byte {
            0x20..=0x7e => table[(byte - 0x20) as usize],
            0xa0 => table[0],
            0xa1..=0xff => latin1_advance(byte, table),
            _ => table[(SUBSTITUTE - 0x20) as usize],
        }
    }
}

fn encode_char(ch: char) -> u8 {
    match ch as u32 {
        c @ (0x20..=0x7e | 0xa0..=0xff) => c as u8,
        // tabs print as spaces
        0x09 => b' ',
        _ => SUBSTITUTE,
    }
}

/// Accented Latin-1 letters are as wide as the letter they decorate; the remaining
/// symbols get a typical figure width.
fn latin1_advance(byte: u8, table: &[u16; 95]) -> u16 {
    let ascii = |c: u8| table[(c - 0x20) as usize];
    match byte {
        0xc0..=0xc5 => ascii(b'A'),
        0xc6 => 1000,
        0xc7 => ascii(b'C'),
        0xc8..=0xcb => ascii(b'E'),
        0xcc..=0xcf => 278,
        0xd0 => ascii(b'D'),
        0xd1 => ascii(b'N'),
        0xd2..=0xd6 | 0xd8 => ascii(b'O'),
        0xd7 | 0xf7 => 584,
        0xd9..=0xdc => ascii(b'U'),
        0xdd => ascii(b'Y'),
        0xde => ascii(b'P'),
        0xdf => 611,
        0xe0..=0xe5 => ascii(b'a'),
        0xe6 => 889,
        0xe7 => ascii(b'c'),
        0xe8..=0xeb => ascii(b'e'),
        0xec..=0xef => 278,
        0xf0 => ascii(b'o'),
        0xf1 => ascii(b'n'),
        0xf2..=0xf6 | 0xf8 => ascii(b'o'),
        0xf9..=0xfc => ascii(b'u'),
        0xfd | 0xff => ascii(b'y'),
        0xfe => ascii(b'p'),
        _ => 556,
    }
}

/// Helvetica advance widths for 0x20..=0x7E
#[rustfmt::skip]
const REGULAR: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n-z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for 0x20..=0x7E
#[rustfmt::skip]
const BOLD: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A-M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a-m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n-z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];
