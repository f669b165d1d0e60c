use crate::address::AddressRecord;
use crate::font::TextMeasure;
use crate::layout::{wrap_text, LabelStyle, WrappedText};
use crate::units::Pt;

/// The two faces a label is set in
pub struct LabelFonts<'a, M: TextMeasure + ?Sized> {
    pub name: &'a M,
    pub body: &'a M,
}

impl<M: TextMeasure + ?Sized> Clone for LabelFonts<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: TextMeasure + ?Sized> Copy for LabelFonts<'_, M> {}

/// A record wrapped to a content width, with the size of the label it needs.
///
/// The wrapped lines are the ones that get drawn, so the measured height and the
/// drawn text can't disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredLabel {
    pub record: AddressRecord,
    pub wrapped_name: WrappedText,
    /// One entry per input address line
    pub wrapped_address: Vec<WrappedText>,
    /// Whether a kind header line is counted (and drawn) above the name
    pub header: bool,
    /// Width the lines were wrapped to
    pub content_width: Pt,
    /// Full label height, padding included
    pub height: Pt,
    /// Full label width, padding included
    pub width: Pt,
}

impl MeasuredLabel {
    /// Number of text lines on the label, header included
    pub fn line_count(&self) -> usize {
        usize::from(self.header)
            + self.wrapped_name.len()
            + self.wrapped_address.iter().map(|w| w.len()).sum::<usize>()
    }
}

/// Height of a label holding `lines` lines of text:
/// `lines × line height + padding above and below`
pub fn label_height(lines: usize, style: &LabelStyle, padding: Pt) -> Pt {
    style.line_height() * lines as f32 + padding * 2.0
}

/// Wrap a record's name and address lines to `content_width` and compute the size of
/// the label holding them. `content_width` must be the width the label is drawn with;
/// [LayoutConfig::content_width](crate::layout::LayoutConfig::content_width) gives it
/// for the configured strategy.
pub fn measure_label<M: TextMeasure + ?Sized>(
    record: &AddressRecord,
    fonts: LabelFonts<'_, M>,
    style: &LabelStyle,
    padding: Pt,
    content_width: Pt,
) -> MeasuredLabel {
    let wrapped_name = wrap_text(&record.name, fonts.name, style.name_size, content_width);
    let wrapped_address: Vec<WrappedText> = record
        .address_lines
        .iter()
        .map(|line| wrap_text(line, fonts.body, style.body_size, content_width))
        .collect();

    let mut label = MeasuredLabel {
        record: record.clone(),
        wrapped_name,
        wrapped_address,
        header: style.kind_header,
        content_width,
        height: Pt(0.0),
        width: content_width + padding * 2.0,
    };
    label.height = label_height(label.line_count(), style, padding);
    label
}
