use crate::content::render_ops;
use crate::draw::DrawOp;
use crate::font::Font;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::LabelError;
use id_arena::Arena;
use pdf_writer::{Filter, Finish, Name, Pdf};

/// One sheet of labels: its size and the drawing instructions on it
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// A blank page of the given size
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            ops: Vec::default(),
        }
    }

    pub fn add_ops<I: IntoIterator<Item = DrawOp>>(&mut self, ops: I) {
        self.ops.extend(ops);
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), LabelError> {
        let id = refs.get_or_allocate(RefType::Page(page_index));
        let parent = refs.get_or_allocate(RefType::PageTree);
        let content_id = refs.allocate(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let font_ref = refs
                .get(RefType::Font(font_id.index()))
                .ok_or(LabelError::FontMissing(font_id.index()))?;
            resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_ops(&self.ops, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer.stream(content_id, &compressed).filter(Filter::FlateDecode);

        Ok(())
    }
}
