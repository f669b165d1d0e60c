//! Fonts, and the text-width oracle that wrapping and measuring are built on.

mod builtin;
mod truetype;

pub use builtin::BuiltinFont;
pub use truetype::TrueTypeFont;

use crate::{
    refs::{ObjectReferences, RefType},
    LabelError, Pt,
};
use id_arena::Id;
use pdf_writer::{Name, Pdf};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Anything that can tell how wide a run of text is. Wrapping, measuring and drawing
/// must all consult the same measure for a given font, otherwise labels drift out of
/// their boxes.
pub trait TextMeasure {
    /// The horizontal advance of `text` set at `size`
    fn text_width(&self, text: &str, size: Pt) -> Pt;

    /// Distance from the baseline to the top of the font at `size`
    fn ascent(&self, size: Pt) -> Pt;
}

/// How a label's font is chosen in configuration: by standard font name, or by a
/// TrueType / OpenType file to embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSpec {
    Standard(String),
    File(PathBuf),
}

impl FontSpec {
    pub fn standard<S: ToString>(name: S) -> FontSpec {
        FontSpec::Standard(name.to_string())
    }
}

/// A font that can be both measured and written into a document
pub enum Font {
    Builtin(BuiltinFont),
    TrueType(TrueTypeFont),
}

impl Font {
    /// One of the standard Helvetica faces, by PostScript name
    pub fn standard(name: &str) -> Result<Font, LabelError> {
        BuiltinFont::from_name(name)
            .map(Font::Builtin)
            .ok_or_else(|| LabelError::UnknownFont(name.to_string()))
    }

    /// Load a TrueType / OpenType font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, LabelError> {
        TrueTypeFont::load(bytes).map(Font::TrueType)
    }

    /// Resolve a configured font. Any failure here is fatal for the request: without a
    /// working measure no label can be laid out.
    pub fn from_spec(spec: &FontSpec) -> Result<Font, LabelError> {
        match spec {
            FontSpec::Standard(name) => Font::standard(name),
            FontSpec::File(path) => Font::load(std::fs::read(path)?),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Font::Builtin(font) => font.base_name().to_string(),
            Font::TrueType(font) => font.postscript_name(),
        }
    }

    /// Encode text into the bytes a content stream shows for this font
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Font::Builtin(font) => font.encode(text),
            Font::TrueType(font) => font.encode(text),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        match self {
            Font::Builtin(font) => {
                let font_id = refs.allocate(RefType::Font(font_index));
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Font::TrueType(font) => font.write(refs, font_index, writer),
        }
    }
}

impl TextMeasure for Font {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        match self {
            Font::Builtin(font) => font.text_width(text, size),
            Font::TrueType(font) => font.text_width(text, size),
        }
    }

    fn ascent(&self, size: Pt) -> Pt {
        match self {
            Font::Builtin(font) => font.ascent(size),
            Font::TrueType(font) => font.ascent(size),
        }
    }
}

/// A font registered with a document: the id text runs refer to it by, and the font
/// itself for measuring
#[derive(Clone, Copy)]
pub struct FontRef<'a> {
    pub id: Id<Font>,
    pub font: &'a Font,
}

impl TextMeasure for FontRef<'_> {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        self.font.text_width(text, size)
    }

    fn ascent(&self, size: Pt) -> Pt {
        self.font.ascent(size)
    }
}
