//! The whole pipeline: pasted text in, a finished PDF label sheet out.

use crate::address::{parse_addresses, ParseWarning};
use crate::document::Document;
use crate::draw::emit_layout;
use crate::font::Font;
use crate::info::Info;
use crate::layout::{measure_label, LabelFonts, LayoutConfig, LayoutEngine};
use crate::page::Page;
use crate::LabelError;
use chrono::{DateTime, Local};

/// What the rendered sheet is for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Shown in place, no filename
    #[default]
    Preview,
    /// Downloaded or saved under a timestamped filename
    Generate,
}

/// A rendered PDF and what went into it
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    pub bytes: Vec<u8>,
    pub mode: OutputMode,
    /// Set in [OutputMode::Generate] only
    pub filename: Option<String>,
    /// Number of labels drawn
    pub labels: usize,
    /// Number of pages in the PDF, at least one
    pub pages: usize,
    /// Blocks that were dropped while parsing
    pub warnings: Vec<ParseWarning>,
}

impl RenderedSheet {
    /// A `Content-Disposition` value for serving the sheet over HTTP
    pub fn content_disposition(&self) -> String {
        match (&self.mode, &self.filename) {
            (OutputMode::Generate, Some(filename)) => {
                format!("attachment; filename=\"{filename}\"")
            }
            _ => "inline".to_string(),
        }
    }
}

/// `address_labels_YYYYMMDD_HHMMSS.pdf` for the given time
pub fn generated_filename(at: &DateTime<Local>) -> String {
    at.format("address_labels_%Y%m%d_%H%M%S.pdf").to_string()
}

/// Render `text` to a label sheet, stamped with the current time
pub fn render(
    text: &str,
    config: &LayoutConfig,
    mode: OutputMode,
) -> Result<RenderedSheet, LabelError> {
    render_at(text, config, mode, Local::now())
}

/// Render `text` to a label sheet, stamped with `now` (creation date and, when
/// generating, the filename).
///
/// Malformed blocks are dropped and reported in [RenderedSheet::warnings]; text
/// without a single valid block still produces a one-page, blank PDF. Errors are
/// limited to configuration and font problems, which leave nothing to render with.
pub fn render_at(
    text: &str,
    config: &LayoutConfig,
    mode: OutputMode,
    now: DateTime<Local>,
) -> Result<RenderedSheet, LabelError> {
    let engine = LayoutEngine::new(config.clone())?;
    let parsed = parse_addresses(text);

    let mut doc = Document::default();
    let style = &config.style;
    let name_id = doc.add_font(Font::from_spec(&style.name_font)?);
    let body_id = if style.body_font == style.name_font {
        name_id
    } else {
        doc.add_font(Font::from_spec(&style.body_font)?)
    };

    let (layout, pages) = {
        let name = doc.font(name_id)?;
        let body = doc.font(body_id)?;
        let fonts = LabelFonts {
            name: &name,
            body: &body,
        };

        let measured = parsed
            .records
            .iter()
            .map(|record| {
                measure_label(record, fonts, style, config.padding, engine.content_width())
            })
            .collect();
        let layout = engine.place(measured);
        let pages = emit_layout(&layout, style, config.padding, fonts);
        (layout, pages)
    };

    for ops in pages {
        let mut page = Page::new(config.page_width, config.page_height);
        page.add_ops(ops);
        doc.add_page(page);
    }

    let mut info = Info::labels(layout.label_count());
    info.created_at(now.fixed_offset());
    doc.set_info(info);

    let mut bytes = Vec::new();
    doc.write(&mut bytes)?;

    let filename = match mode {
        OutputMode::Preview => None,
        OutputMode::Generate => Some(generated_filename(&now)),
    };

    tracing::info!(
        labels = layout.label_count(),
        pages = layout.page_count(),
        dropped = parsed.warnings.len(),
        bytes = bytes.len(),
        ?mode,
        "rendered label sheet"
    );

    Ok(RenderedSheet {
        bytes,
        mode,
        filename,
        labels: layout.label_count(),
        pages: layout.page_count(),
        warnings: parsed.warnings,
    })
}
