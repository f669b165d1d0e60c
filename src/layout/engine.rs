use crate::layout::{LayoutConfig, MeasuredLabel, Strategy};
use crate::rect::Rect;
use crate::units::Pt;
use crate::LabelError;
use serde::Serialize;

/// Orientation of a placed label's content
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Rotation {
    Upright,
    /// A quarter turn counter-clockwise about the label's centre
    Quarter,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Upright => 0,
            Rotation::Quarter => 90,
        }
    }
}

/// A label with its position on the sheet. `(x, y)` is the top-left corner of the
/// label's box in page coordinates (points, origin at the bottom-left of the page).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub label: MeasuredLabel,
    /// 0-based page index
    pub page: usize,
    pub x: Pt,
    pub y: Pt,
    /// Size of the box on the page. For rotated labels this is the cell as it sits
    /// on the page, not the label's own width and height.
    pub width: Pt,
    pub height: Pt,
    pub rotation: Rotation,
}

impl PlacedLabel {
    pub fn bounds(&self) -> Rect {
        Rect::from_top_left(self.x, self.y, self.width, self.height)
    }
}

/// Placed labels grouped by page. There is always at least one page, so an empty
/// input still produces a (blank) document.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pages: Vec<Vec<PlacedLabel>>,
}

impl Layout {
    /// Labels of each page, in placement order
    pub fn pages(&self) -> &[Vec<PlacedLabel>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn label_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Every label, in placement order
    pub fn labels(&self) -> impl Iterator<Item = &PlacedLabel> {
        self.pages.iter().flatten()
    }

    fn push(&mut self, placed: PlacedLabel) {
        while self.pages.len() <= placed.page {
            self.pages.push(Vec::new());
        }
        self.pages[placed.page].push(placed);
    }
}

/// Where label `index` of a fixed grid run lands
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridSlot {
    pub page: usize,
    pub row: usize,
    pub col: usize,
}

/// Labels fill a grid row by row; a new page starts every `columns × rows` labels.
pub fn grid_slot(index: usize, columns: usize, rows: usize) -> GridSlot {
    GridSlot {
        page: index / columns.saturating_mul(rows),
        row: (index / columns) % rows,
        col: index % columns,
    }
}

#[derive(Debug, Copy, Clone)]
enum Placement {
    Flowing {
        column_width: Pt,
    },
    Grid {
        columns: usize,
        rows: usize,
        cell_width: Pt,
        cell_height: Pt,
    },
}

/// Assigns pages and positions to measured labels.
///
/// The engine only moves boxes around: wrapping and measuring happen before, with the
/// content width from [LayoutConfig::content_width], and the chosen strategy doesn't
/// change them.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    placement: Placement,
}

impl LayoutEngine {
    /// Validates the configuration up front, so placement itself can't fail
    pub fn new(config: LayoutConfig) -> Result<LayoutEngine, LabelError> {
        config.validate()?;
        let placement = match (config.strategy, config.cell_size()) {
            (Strategy::Flowing { column_width }, _) => Placement::Flowing { column_width },
            (Strategy::FixedGrid { columns, rows }, Some((cell_width, cell_height))) => {
                Placement::Grid {
                    columns,
                    rows,
                    cell_width,
                    cell_height,
                }
            }
            (Strategy::FixedGrid { columns, rows }, None) => {
                return Err(LabelError::InvalidConfig(format!(
                    "no cell size for a {columns}x{rows} grid"
                )))
            }
        };
        Ok(LayoutEngine { config, placement })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Width text on each label is wrapped to
    pub fn content_width(&self) -> Pt {
        self.config.content_width()
    }

    /// Place labels in order
    pub fn place(&self, labels: Vec<MeasuredLabel>) -> Layout {
        let mut layout = Layout {
            pages: vec![Vec::new()],
        };
        match self.placement {
            Placement::Flowing { column_width } => {
                self.place_flowing(labels, column_width, &mut layout)
            }
            Placement::Grid {
                columns,
                rows,
                cell_width,
                cell_height,
            } => self.place_grid(labels, columns, rows, (cell_width, cell_height), &mut layout),
        }
        tracing::debug!(
            labels = layout.label_count(),
            pages = layout.page_count(),
            "labels placed"
        );
        layout
    }

    /// Stack labels down a column, moving to the next column when the bottom margin
    /// would be crossed and to the next page when there are no columns left.
    ///
    /// Each label causes at most one column advance and one page break, and only when
    /// the current column already holds something; a label taller than a whole column
    /// is placed at the top of a fresh one and allowed to run off the bottom.
    ///
    /// An empty column is never skipped, so an over-tall first label still starts in
    /// the first column of the first page.
    fn place_flowing(&self, labels: Vec<MeasuredLabel>, column_width: Pt, layout: &mut Layout) {
        let config = &self.config;
        let (left, top, bottom) = (config.margins.left, config.top(), config.margins.bottom);

        let mut x = left;
        let mut y = top;
        let mut page = 0;
        let mut column_used = false;

        for label in labels {
            if column_used && y - label.height < bottom {
                x += column_width + config.gap;
                y = top;
                column_used = false;

                if x + column_width > config.right() {
                    x = left;
                    page += 1;
                    tracing::debug!(page, "page break");
                } else {
                    tracing::debug!(page, x = *x, "column advance");
                }
            }

            if label.height > config.usable_height() {
                tracing::warn!(
                    name = %label.record.name,
                    height = *label.height,
                    "label is taller than the page and will overflow"
                );
            }

            let height = label.height;
            layout.push(PlacedLabel {
                page,
                x,
                y,
                width: column_width,
                height,
                rotation: Rotation::Upright,
                label,
            });

            y -= height + config.gap;
            column_used = true;
        }
    }

    fn place_grid(
        &self,
        labels: Vec<MeasuredLabel>,
        columns: usize,
        rows: usize,
        (cell_width, cell_height): (Pt, Pt),
        layout: &mut Layout,
    ) {
        let config = &self.config;
        let (rotation, room) = if config.rotate {
            (Rotation::Quarter, cell_width)
        } else {
            (Rotation::Upright, cell_height)
        };

        for (index, label) in labels.into_iter().enumerate() {
            let slot = grid_slot(index, columns, rows);
            if label.height > room {
                tracing::debug!(
                    name = %label.record.name,
                    height = *label.height,
                    room = *room,
                    "label overflows its cell"
                );
            }

            layout.push(PlacedLabel {
                page: slot.page,
                x: config.margins.left + (cell_width + config.gap) * slot.col as f32,
                y: config.top() - (cell_height + config.gap) * slot.row as f32,
                width: cell_width,
                height: cell_height,
                rotation,
                label,
            });
        }
    }
}
