use crate::font::FontSpec;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::units::{Mm, Pt};
use crate::LabelError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How labels are placed on the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Fixed-width columns filled top to bottom, each label as tall as its content.
    /// Columns are added left to right until the page is full.
    Flowing { column_width: Pt },
    /// A constant `columns` × `rows` grid on every page. Cells share the usable page
    /// area evenly and don't grow with their content.
    FixedGrid { columns: usize, rows: usize },
}

/// Typography of a single label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub name_font: FontSpec,
    pub body_font: FontSpec,
    pub name_size: Pt,
    pub body_size: Pt,
    /// Extra space between lines, on top of the body size
    pub leading: Pt,
    /// Print a "TO," / "FROM," line above the name
    pub kind_header: bool,
    /// Stroke the label's outline
    pub border: bool,
    pub border_width: Pt,
}

impl Default for LabelStyle {
    fn default() -> Self {
        LabelStyle {
            name_font: FontSpec::standard("Helvetica-Bold"),
            body_font: FontSpec::standard("Helvetica"),
            name_size: Pt(13.0),
            body_size: Pt(11.0),
            leading: Pt(4.0),
            kind_header: false,
            border: true,
            border_width: Pt(1.0),
        }
    }
}

impl LabelStyle {
    /// Vertical advance of every line on a label, name lines included
    pub fn line_height(&self) -> Pt {
        self.body_size + self.leading
    }
}

/// Everything that determines label geometry. Nothing in the layout engine reads
/// global state, so two sheets with different configurations can be laid out side by
/// side.
///
/// The default is the classic sheet: A4, 10mm margins, 65mm flowing columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: Pt,
    pub page_height: Pt,
    pub margins: Margins,
    /// Space between a label's border and its text, on every side
    pub padding: Pt,
    /// Space between neighbouring labels, both across and down
    pub gap: Pt,
    pub strategy: Strategy,
    /// Turn grid labels a quarter turn about their cell centre
    pub rotate: bool,
    pub style: LabelStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let (page_width, page_height) = PageSize::A4.dimensions();
        LayoutConfig {
            page_width,
            page_height,
            margins: Margins::all(Mm(10.0)),
            padding: Pt(10.0),
            gap: Pt(10.0),
            strategy: Strategy::Flowing {
                column_width: Mm(65.0).into(),
            },
            rotate: false,
            style: LabelStyle::default(),
        }
    }
}

impl LayoutConfig {
    /// Default configuration with a fixed grid
    pub fn grid(columns: usize, rows: usize) -> LayoutConfig {
        LayoutConfig {
            strategy: Strategy::FixedGrid { columns, rows },
            ..LayoutConfig::default()
        }
    }

    /// Default configuration with flowing columns of the given width
    pub fn flowing<W: Into<Pt>>(column_width: W) -> LayoutConfig {
        LayoutConfig {
            strategy: Strategy::Flowing {
                column_width: column_width.into(),
            },
            ..LayoutConfig::default()
        }
    }

    pub fn with_page_size(mut self, size: PageSize) -> LayoutConfig {
        (self.page_width, self.page_height) = size.dimensions();
        self
    }

    pub fn with_rotation(mut self, rotate: bool) -> LayoutConfig {
        self.rotate = rotate;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<LayoutConfig, LabelError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<LayoutConfig, LabelError> {
        LayoutConfig::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn usable_width(&self) -> Pt {
        self.page_width - self.margins.horizontal()
    }

    pub fn usable_height(&self) -> Pt {
        self.page_height - self.margins.vertical()
    }

    /// y coordinate of the top margin
    pub fn top(&self) -> Pt {
        self.page_height - self.margins.top
    }

    /// x coordinate of the right margin
    pub fn right(&self) -> Pt {
        self.page_width - self.margins.right
    }

    /// Size of one grid cell, or [None] for flowing layouts
    pub fn cell_size(&self) -> Option<(Pt, Pt)> {
        match self.strategy {
            Strategy::FixedGrid { columns, rows } if columns > 0 && rows > 0 => {
                let width =
                    (self.usable_width() - self.gap * (columns - 1) as f32) / columns as f32;
                let height = (self.usable_height() - self.gap * (rows - 1) as f32) / rows as f32;
                Some((width, height))
            }
            _ => None,
        }
    }

    /// Width available to text on a label: the label's extent along its text lines,
    /// less padding on both sides. Rotated grid labels run their lines along the cell's
    /// height.
    pub fn content_width(&self) -> Pt {
        let extent = match (self.strategy, self.cell_size()) {
            (Strategy::Flowing { column_width }, _) => column_width,
            (_, Some((_, height))) if self.rotate => height,
            (_, Some((width, _))) => width,
            (_, None) => Pt(0.0),
        };
        extent - self.padding * 2.0
    }

    /// Reject geometry no label could be placed in
    pub fn validate(&self) -> Result<(), LabelError> {
        self.check().map_err(LabelError::InvalidConfig)
    }

    fn check(&self) -> Result<(), String> {
        let positive = |name: &str, v: Pt| {
            if v.0.is_finite() && v.0 > 0.0 {
                Ok(())
            } else {
                Err(format!("{name} must be positive, got {v}"))
            }
        };
        let non_negative = |name: &str, v: Pt| {
            if v.0.is_finite() && v.0 >= 0.0 {
                Ok(())
            } else {
                Err(format!("{name} must not be negative, got {v}"))
            }
        };

        positive("page width", self.page_width)?;
        positive("page height", self.page_height)?;
        self.margins.validate()?;
        positive("usable page width", self.usable_width())?;
        positive("usable page height", self.usable_height())?;
        non_negative("padding", self.padding)?;
        non_negative("gap", self.gap)?;
        positive("name size", self.style.name_size)?;
        positive("body size", self.style.body_size)?;
        non_negative("leading", self.style.leading)?;
        non_negative("border width", self.style.border_width)?;

        match self.strategy {
            Strategy::Flowing { column_width } => {
                if self.rotate {
                    return Err("rotation is only supported for fixed grids".to_string());
                }
                positive("column width", column_width)?;
                if column_width > self.usable_width() {
                    return Err(format!(
                        "column width {column_width} is wider than the usable page width {}",
                        self.usable_width()
                    ));
                }
            }
            Strategy::FixedGrid { columns, rows } => {
                if columns == 0 || rows == 0 {
                    return Err(format!("a grid needs at least one cell, got {columns}x{rows}"));
                }
                if columns.checked_mul(rows).is_none() {
                    return Err(format!("a {columns}x{rows} grid has too many cells per page"));
                }
                if let Some((width, height)) = self.cell_size() {
                    positive("cell width", width)?;
                    positive("cell height", height)?;
                }
            }
        }

        positive("content width", self.content_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;

    #[test]
    fn default_is_valid() {
        LayoutConfig::default().validate().unwrap();
        LayoutConfig::grid(4, 4).with_rotation(true).validate().unwrap();
    }

    #[test]
    fn grid_cells_share_the_usable_area() {
        let mut config = LayoutConfig::grid(2, 3);
        config.page_width = Pt(220.0);
        config.page_height = Pt(340.0);
        config.margins = Margins::all(Pt(10.0));
        config.gap = Pt(10.0);
        assert_eq!(config.cell_size(), Some((Pt(95.0), Pt(100.0))));

        config.padding = Pt(5.0);
        assert_eq!(config.content_width(), Pt(85.0));
        config.rotate = true;
        assert_eq!(config.content_width(), Pt(90.0));
    }

    #[test]
    fn rejects_impossible_geometry() {
        let too_wide = LayoutConfig::flowing(Pt(10_000.0));
        assert!(matches!(too_wide.validate(), Err(LabelError::InvalidConfig(_))));

        let rotated_columns = LayoutConfig::default().with_rotation(true);
        assert!(rotated_columns.validate().is_err());

        assert!(LayoutConfig::grid(0, 4).validate().is_err());

        let mut padded_away = LayoutConfig::default();
        padded_away.padding = Pt(200.0);
        assert!(padded_away.validate().is_err());
    }

    #[test]
    fn rejects_grids_whose_cell_count_overflows() {
        let mut config = LayoutConfig::grid(usize::MAX, 2);
        config.gap = Pt(0.0);
        config.padding = Pt(0.0);
        // every cell is tiny but still has a positive size
        assert!(config.cell_size().is_some_and(|(w, h)| w > Pt(0.0) && h > Pt(0.0)));
        assert!(matches!(config.validate(), Err(LabelError::InvalidConfig(_))));
        assert!(LayoutEngine::new(config).is_err());

        let json = format!(
            r#"{{ "strategy": {{ "kind": "fixed_grid", "columns": {}, "rows": 3 }}, "gap": 0, "padding": 0 }}"#,
            usize::MAX / 2
        );
        assert!(matches!(
            LayoutConfig::from_json(&json),
            Err(LabelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn loads_partial_json() {
        let config = LayoutConfig::from_json(
            r#"{ "strategy": { "kind": "fixed_grid", "columns": 3, "rows": 8 }, "rotate": true }"#,
        )
        .unwrap();
        assert_eq!(config.strategy, Strategy::FixedGrid { columns: 3, rows: 8 });
        assert!(config.rotate);
        assert_eq!(config.padding, LayoutConfig::default().padding);

        assert!(matches!(
            LayoutConfig::from_json("{ not json"),
            Err(LabelError::Json(_))
        ));
    }
}
