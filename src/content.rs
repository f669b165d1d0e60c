//! Content stream rendering for drawing instructions.

use crate::draw::{DrawOp, TextRun};
use crate::font::Font;
use crate::layout::Rotation;
use crate::transform::Transform;
use crate::LabelError;
use id_arena::Arena;
use std::io::Write;

/// Renders drawing instructions to a PDF content stream.
///
/// Every instruction is self-contained: outlines are wrapped in their own graphics
/// state and every text run sets its font and text matrix, so instructions can be
/// rendered in any grouping without leaking state into each other.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_ops(ops: &[DrawOp], fonts: &Arena<Font>) -> Result<Vec<u8>, LabelError> {
    let mut content: Vec<u8> = Vec::default();

    for op in ops {
        match op {
            DrawOp::Outline { rect, line_width } => {
                write!(&mut content, "q\n")?;
                write!(&mut content, "{} w\n", line_width.0)?;
                write!(
                    &mut content,
                    "{} {} {} {} re S\n",
                    rect.x1.0,
                    rect.y1.0,
                    rect.width().0,
                    rect.height().0
                )?;
                write!(&mut content, "Q\n")?;
            }
            DrawOp::Text(run) => render_text_run(&mut content, run, fonts)?,
        }
    }

    Ok(content)
}

/// The text matrix that puts a run's baseline at its origin, running in its direction
fn text_matrix(run: &TextRun) -> Transform {
    let (x, y) = run.origin;
    match run.rotation {
        Rotation::Upright => Transform::translate(x, y),
        Rotation::Quarter => Transform::quarter_turn().with_translate(x, y),
    }
}

#[allow(clippy::write_with_newline)]
fn render_text_run(
    content: &mut Vec<u8>,
    run: &TextRun,
    fonts: &Arena<Font>,
) -> Result<(), LabelError> {
    if run.text.is_empty() {
        return Ok(());
    }
    let font = fonts
        .get(run.font.id)
        .ok_or(LabelError::FontMissing(run.font.id.index()))?;

    let [a, b, c, d, e, f] = text_matrix(run).matrix();
    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", run.font.id.index(), run.font.size.0)?;
    write!(content, "{a} {b} {c} {d} {e} {f} Tm\n")?;
    write!(content, "<")?;
    for byte in font.encode(&run.text) {
        write!(content, "{byte:02x}")?;
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SpanFont;
    use crate::rect::Rect;
    use crate::units::Pt;

    fn helvetica() -> (Arena<Font>, id_arena::Id<Font>) {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::standard("Helvetica").unwrap());
        (fonts, id)
    }

    fn run(id: id_arena::Id<Font>, rotation: Rotation) -> DrawOp {
        DrawOp::Text(TextRun {
            text: "Hi".to_string(),
            font: SpanFont { id, size: Pt(11.0) },
            origin: (Pt(20.0), Pt(30.0)),
            rotation,
        })
    }

    fn rendered(ops: &[DrawOp], fonts: &Arena<Font>) -> String {
        String::from_utf8(render_ops(ops, fonts).unwrap()).unwrap()
    }

    #[test]
    fn outlines_are_stroked_rectangles() {
        let (fonts, _) = helvetica();
        let ops = [DrawOp::Outline {
            rect: Rect {
                x1: Pt(10.0),
                y1: Pt(20.0),
                x2: Pt(110.0),
                y2: Pt(70.0),
            },
            line_width: Pt(1.0),
        }];
        assert_eq!(rendered(&ops, &fonts), "q\n1 w\n10 20 100 50 re S\nQ\n");
    }

    #[test]
    fn text_runs_set_font_and_matrix() {
        let (fonts, id) = helvetica();
        assert_eq!(
            rendered(&[run(id, Rotation::Upright)], &fonts),
            "BT\n/F0 11 Tf\n1 0 0 1 20 30 Tm\n<4869> Tj\nET\n"
        );
        assert!(rendered(&[run(id, Rotation::Quarter)], &fonts).contains("0 1 -1 0 20 30 Tm\n"));
    }

    #[test]
    fn unknown_font_is_an_error() {
        let (_, id) = helvetica();
        let empty = Arena::new();
        assert!(matches!(
            render_ops(&[run(id, Rotation::Upright)], &empty),
            Err(LabelError::FontMissing(0))
        ));
    }

    #[test]
    fn nothing_to_draw_is_an_empty_stream() {
        let (fonts, _) = helvetica();
        assert!(render_ops(&[], &fonts).unwrap().is_empty());
    }
}
