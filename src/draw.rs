//! Turning placed labels into drawing instructions.
//!
//! Each label is laid out in its own local frame, a box with the origin at its
//! lower-left corner. One [Transform] then carries every instruction of the label onto
//! the page: a plain translation for upright labels, a quarter turn about the cell
//! centre for rotated ones. There is no separate drawing path for rotated labels.

use crate::font::{Font, FontRef, TextMeasure};
use crate::layout::{LabelFonts, LabelStyle, Layout, PlacedLabel, Rotation};
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use id_arena::Id;

/// A font registered with a document, at a size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// One line of text. `origin` is the start of the baseline on the page; the text runs
/// along the direction given by `rotation`.
#[derive(Clone, PartialEq, Debug)]
pub struct TextRun {
    pub text: String,
    pub font: SpanFont,
    pub origin: (Pt, Pt),
    pub rotation: Rotation,
}

/// A single instruction for the drawing sink
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    /// Stroke the outline of a rectangle
    Outline { rect: Rect, line_width: Pt },
    Text(TextRun),
}

/// The transform from a label's local frame to the page, and the local frame's size
fn label_frame(placed: &PlacedLabel) -> (Transform, Pt, Pt) {
    let bounds = placed.bounds();
    match placed.rotation {
        Rotation::Upright => (
            Transform::translate(bounds.x1, bounds.y1),
            placed.width,
            placed.height,
        ),
        Rotation::Quarter => {
            // turned a quarter, the cell's height is the label's width
            let (width, height) = (placed.height, placed.width);
            let (cx, cy) = bounds.centre();
            let transform = Transform::translate(-width / 2.0, -height / 2.0)
                .then(Transform::quarter_turn())
                .with_translate(cx, cy);
            (transform, width, height)
        }
    }
}

/// Instructions for one placed label: its outline (if the style has one), then one
/// text run per line, top to bottom.
pub fn emit_label(
    placed: &PlacedLabel,
    style: &LabelStyle,
    padding: Pt,
    fonts: LabelFonts<'_, FontRef<'_>>,
) -> Vec<DrawOp> {
    let (transform, width, height) = label_frame(placed);
    let label = &placed.label;
    let mut ops = Vec::with_capacity(label.line_count() + 1);

    if style.border {
        let local = Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: width,
            y2: height,
        };
        let corners = local.corners().map(|(x, y)| transform.apply(x, y));
        if let Some(rect) = Rect::bounding(corners) {
            ops.push(DrawOp::Outline {
                rect,
                line_width: style.border_width,
            });
        }
    }

    let header = label.header.then(|| label.record.kind.header().to_string());
    let lines = header
        .into_iter()
        .map(|text| (text, fonts.body, style.body_size))
        .chain(
            label
                .wrapped_name
                .iter()
                .map(|text| (text.clone(), fonts.name, style.name_size)),
        )
        .chain(label.wrapped_address.iter().flat_map(|wrapped| {
            wrapped
                .iter()
                .map(|text| (text.clone(), fonts.body, style.body_size))
        }));

    let line_height = style.line_height();
    for (i, (text, font, size)) in lines.enumerate() {
        let baseline = height - padding - line_height * i as f32 - font.ascent(size);
        ops.push(DrawOp::Text(TextRun {
            text,
            font: SpanFont { id: font.id, size },
            origin: transform.apply(padding, baseline),
            rotation: placed.rotation,
        }));
    }

    ops
}

/// Instructions for every page of a layout
pub fn emit_layout(
    layout: &Layout,
    style: &LabelStyle,
    padding: Pt,
    fonts: LabelFonts<'_, FontRef<'_>>,
) -> Vec<Vec<DrawOp>> {
    layout
        .pages()
        .iter()
        .map(|page| {
            page.iter()
                .flat_map(|placed| emit_label(placed, style, padding, fonts))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{AddressKind, AddressRecord};
    use crate::layout::{measure_label, LayoutConfig, LayoutEngine, Margins};
    use id_arena::Arena;

    struct Fixture {
        fonts: Arena<Font>,
        name: Id<Font>,
        body: Id<Font>,
    }

    impl Fixture {
        fn new() -> Fixture {
            let mut fonts = Arena::new();
            let name = fonts.alloc(Font::standard("Helvetica-Bold").unwrap());
            let body = fonts.alloc(Font::standard("Helvetica").unwrap());
            Fixture { fonts, name, body }
        }

        fn refs(&self) -> (FontRef<'_>, FontRef<'_>) {
            (
                FontRef {
                    id: self.name,
                    font: &self.fonts[self.name],
                },
                FontRef {
                    id: self.body,
                    font: &self.fonts[self.body],
                },
            )
        }
    }

    fn record(kind: AddressKind) -> AddressRecord {
        AddressRecord {
            kind,
            name: "Jane Roe".to_string(),
            address_lines: vec!["221B Baker St".to_string(), "London".to_string()],
        }
    }

    fn run(config: LayoutConfig, kind: AddressKind) -> Vec<DrawOp> {
        let fixture = Fixture::new();
        let (name, body) = fixture.refs();
        let fonts = LabelFonts {
            name: &name,
            body: &body,
        };
        let engine = LayoutEngine::new(config.clone()).unwrap();
        let measured = measure_label(
            &record(kind),
            fonts,
            &config.style,
            config.padding,
            engine.content_width(),
        );
        let layout = engine.place(vec![measured]);
        emit_label(&layout.pages()[0][0], &config.style, config.padding, fonts)
    }

    fn texts(ops: &[DrawOp]) -> Vec<&TextRun> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text(run) => Some(run),
                _ => None,
            })
            .collect()
    }

    fn small_grid() -> LayoutConfig {
        let mut config = LayoutConfig::grid(2, 2);
        config.page_width = Pt(420.0);
        config.page_height = Pt(220.0);
        config.margins = Margins::all(Pt(10.0));
        config.gap = Pt(0.0);
        config
    }

    #[test]
    fn upright_label_lines_run_down_the_box() {
        let ops = run(LayoutConfig::default(), AddressKind::To);
        let config = LayoutConfig::default();

        let DrawOp::Outline { rect, .. } = &ops[0] else {
            panic!("expected the outline first, got {:?}", ops[0]);
        };
        assert_eq!(rect.x1, config.margins.left);
        assert_eq!(rect.y2, config.top());

        let runs = texts(&ops);
        let text: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, vec!["Jane Roe", "221B Baker St", "London"]);
        assert!(runs.iter().all(|r| r.origin.0 == runs[0].origin.0));
        // address lines share a size, so their baselines are exactly a line apart
        let step = runs[1].origin.1 - runs[2].origin.1;
        assert!((step - config.style.line_height()).abs() < Pt(1e-3));
        assert!(runs[0].origin.1 > runs[1].origin.1);
        assert!(runs.iter().all(|r| r.rotation == Rotation::Upright));
        // every baseline sits inside the outline
        assert!(runs.iter().all(|r| r.origin.1 > rect.y1 && r.origin.1 < rect.y2));
    }

    #[test]
    fn kind_header_is_drawn_first() {
        let mut config = LayoutConfig::default();
        config.style.kind_header = true;
        let ops = run(config, AddressKind::From);
        let runs = texts(&ops);
        assert_eq!(runs[0].text, "FROM,");
        assert_eq!(runs[1].text, "Jane Roe");
        assert_eq!(runs.len(), 4);
    }

    #[test]
    fn rotated_label_keeps_its_cell() {
        let upright = run(small_grid(), AddressKind::To);
        let rotated = run(small_grid().with_rotation(true), AddressKind::To);

        // the outline is the same cell either way
        assert_eq!(upright[0], rotated[0]);
        let DrawOp::Outline { rect, .. } = &rotated[0] else {
            panic!("expected an outline");
        };
        assert_eq!(
            *rect,
            Rect {
                x1: Pt(10.0),
                y1: Pt(110.0),
                x2: Pt(210.0),
                y2: Pt(210.0),
            }
        );

        // lines now advance to the right instead of down, starting at the left edge
        let runs = texts(&rotated);
        assert!(runs.iter().all(|r| r.rotation == Rotation::Quarter));
        assert!(runs[1].origin.0 > runs[0].origin.0);
        assert!((runs[2].origin.0 - runs[1].origin.0 - Pt(15.0)).abs() < Pt(1e-3));
        for run in &runs {
            assert!((run.origin.1 - runs[0].origin.1).abs() < Pt(1e-3));
        }
        // text starts `padding` above the bottom of the cell
        assert!((runs[0].origin.1 - Pt(120.0)).abs() < Pt(1e-3));
        assert!(runs.iter().all(|r| r.origin.0 > rect.x1 && r.origin.0 < rect.x2));
    }

    #[test]
    fn borderless_labels_only_have_text() {
        let mut config = LayoutConfig::default();
        config.style.border = false;
        let ops = run(config, AddressKind::To);
        assert!(ops.iter().all(|op| matches!(op, DrawOp::Text(_))));
    }
}
