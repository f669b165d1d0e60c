use crate::{
    refs::{ObjectReferences, RefType},
    LabelError, Pt,
};
use owned_ttf_parser::{name_id, AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A TrueType / OpenType face, embedded in its entirety in the generated PDF.
///
/// Text is written as 2-byte glyph IDs (`Identity-H`), so any character the face
/// covers can be printed. Characters it doesn't cover fall back to U+FFFD, then `?`,
/// then the `.notdef` glyph, and that fallback is shared between measuring and
/// drawing.
pub struct TrueTypeFont {
    face: OwnedFace,
}

impl TrueTypeFont {
    /// Parse a font from raw bytes. Faces without a unicode character map are rejected,
    /// as there would be no way to measure text with them.
    pub fn load(bytes: Vec<u8>) -> Result<TrueTypeFont, LabelError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let font = TrueTypeFont { face };
        if font.unicode_map().is_empty() {
            return Err(LabelError::FontWithoutCmap(font.postscript_name()));
        }
        Ok(font)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// A name usable as a PDF `BaseFont`: the PostScript name if the face has one,
    /// otherwise the full name with spaces removed.
    pub fn postscript_name(&self) -> String {
        let lookup = |id: u16| {
            self.face()
                .names()
                .into_iter()
                .find(|name| name.name_id == id && name.is_unicode())
                .and_then(|name| name.to_string())
        };
        lookup(name_id::POST_SCRIPT_NAME)
            .or_else(|| lookup(name_id::FULL_NAME))
            .map(|name| name.chars().filter(|c| !c.is_whitespace()).collect())
            .unwrap_or_else(|| "EmbeddedFont".to_string())
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    pub fn glyph(&self, ch: char) -> GlyphId {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .unwrap_or(GlyphId(0))
    }

    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| {
                scaling
                    * self
                        .face()
                        .glyph_hor_advance(self.glyph(ch))
                        .unwrap_or_default() as f32
            })
            .sum()
    }

    /// Big-endian glyph IDs, ready for an `Identity-H` text string
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| self.glyph(ch).0.to_be_bytes())
            .collect()
    }

    /// glyph id -> first character mapped to it, over every unicode cmap subtable
    fn unicode_map(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let glyph = subtable.glyph_index(codepoint).filter(|g| g.0 > 0);
                if let (Ok(ch), Some(glyph)) = (char::try_from(codepoint), glyph) {
                    map.entry(glyph.0).or_insert(ch);
                }
            });
        }
        map
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let base_name = self.postscript_name();
        let font_id = refs.allocate(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &base_name, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_name.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        base_name: &str,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, base_name, writer);
        let id = refs.allocate(RefType::CidFont(font_index));

        // widths are in 1/1000 text space units
        let scaling = 1000.0 / self.face().units_per_em() as f32;
        let advance =
            |g: u16| self.face().glyph_hor_advance(GlyphId(g)).unwrap_or_default() as f32 * scaling;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_name.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(advance(0));
        cid_font
            .widths()
            .consecutive(0, (0..self.face().number_of_glyphs()).map(advance));
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        base_name: &str,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.allocate(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let id = refs.allocate(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_name.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * scaling,
            bbox.y_min as f32 * scaling,
            bbox.x_max as f32 * scaling,
            bbox.y_max as f32 * scaling,
        ));
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // not recorded in TrueType; 80 is what most writers emit for regular weights
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.allocate(RefType::ToUnicode(font_index));
        let cmap = to_unicode_cmap(&self.unicode_map());
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);
        id
    }
}

/// Build a ToUnicode CMap so text copied out of the PDF comes back as characters
/// rather than glyph numbers. `bfchar` sections hold at most 100 entries.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for chunk in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (glyph, ch) in chunk {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{u:04x}"))
                .collect();
            cmap.push_str(&format!("<{glyph:04x}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmap_chunks_and_encodes_utf16() {
        let glyphs: BTreeMap<u16, char> = (1..=150u16)
            .map(|g| (g, 'a'))
            .chain(std::iter::once((151, '😀')))
            .collect();
        let cmap = to_unicode_cmap(&glyphs);
        assert!(cmap.contains("100 beginbfchar"));
        assert!(cmap.contains("51 beginbfchar"));
        assert!(cmap.contains("<0001> <0061>"));
        assert!(cmap.contains("<0097> <d83dde00>"));
    }

    const MONO: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

    fn mono() -> TrueTypeFont {
        TrueTypeFont::load(MONO.to_vec()).expect("bundled font loads")
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn measures_with_the_face_advances() {
        let font = mono();
        assert_eq!(font.postscript_name(), "DejaVuSansMono");

        let m = font.text_width("M", Pt(10.0));
        assert!(m > Pt(0.0));
        // every glyph of a monospaced face has the same advance
        assert!((font.text_width("Main St", Pt(10.0)) - m * 7.0).abs() < Pt(1e-3));
        assert!((font.text_width("M", Pt(20.0)) - m * 2.0).abs() < Pt(1e-3));

        let ascent = font.ascent(Pt(10.0));
        assert!(ascent > Pt(5.0) && ascent < Pt(10.0));
    }

    #[test]
    fn encodes_big_endian_glyph_ids() {
        let font = mono();
        let (a, e) = (font.glyph('A'), font.glyph('é'));
        assert_ne!(a, GlyphId(0));
        assert_ne!(e, GlyphId(0));
        assert_ne!(a, e);

        let mut expected = a.0.to_be_bytes().to_vec();
        expected.extend(e.0.to_be_bytes());
        assert_eq!(font.encode("Aé"), expected);
    }

    #[test]
    fn uncovered_characters_fall_back_consistently() {
        let font = mono();
        let fallback = font
            .face()
            .glyph_index('\u{FFFD}')
            .or_else(|| font.face().glyph_index('?'))
            .expect("face has a replacement glyph");

        let missing = '\u{10FFFD}';
        assert_eq!(font.glyph(missing), fallback);
        assert_eq!(font.encode("\u{10FFFD}"), fallback.0.to_be_bytes().to_vec());
        // measured as the glyph that gets drawn
        let advance = font.face().glyph_hor_advance(fallback).unwrap_or_default() as f32;
        let expected = Pt(10.0) * (advance / font.face().units_per_em() as f32);
        assert!((font.text_width("\u{10FFFD}", Pt(10.0)) - expected).abs() < Pt(1e-3));
    }

    #[test]
    fn writes_an_embedded_type0_font() {
        let font = mono();
        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        font.write(&mut refs, 0, &mut pdf);
        let bytes = pdf.finish();

        for key in [
            &b"/Subtype /Type0"[..],
            b"/Encoding /Identity-H",
            b"/Subtype /CIDFontType2",
            b"/BaseFont /DejaVuSansMono",
            b"/FontFile2",
            b"/ToUnicode",
        ] {
            assert!(contains(&bytes, key), "missing {}", String::from_utf8_lossy(key));
        }
        for kind in [
            RefType::Font(0),
            RefType::CidFont(0),
            RefType::FontDescriptor(0),
            RefType::FontData(0),
            RefType::ToUnicode(0),
        ] {
            assert!(refs.get(kind).is_some(), "{kind:?} not allocated");
        }
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(matches!(
            TrueTypeFont::load(b"definitely not a font".to_vec()),
            Err(LabelError::FaceParsing(_))
        ));
    }
}
