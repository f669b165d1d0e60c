//! Wrapping, measuring and placing address labels.
//!
//! Labels go through three steps, each a pure function of its inputs:
//!
//! - [`wrap_text`](crate::layout::wrap_text) - greedy word wrap against a [`TextMeasure`](crate::font::TextMeasure)
//! - [`measure_label`](crate::layout::measure_label) - wraps a record and computes the height of its label
//! - [`LayoutEngine`](crate::layout::LayoutEngine) - assigns every label a page and position, in
//!   flowing columns or a fixed (optionally rotated) grid
//!
//! All geometry comes from a [`LayoutConfig`](crate::layout::LayoutConfig).
//!
//! # Example
//!
//! ```
//! use label_gen::address::parse_addresses;
//! use label_gen::layout::{measure_label, LabelFonts, LayoutConfig, LayoutEngine};
//! use label_gen::Font;
//!
//! let config = LayoutConfig::grid(3, 8);
//! let name = Font::standard("Helvetica-Bold").expect("standard font");
//! let body = Font::standard("Helvetica").expect("standard font");
//! let fonts = LabelFonts { name: &name, body: &body };
//!
//! let engine = LayoutEngine::new(config.clone()).expect("valid config");
//! let parsed = parse_addresses("John Doe\n123 Main St\nSpringfield");
//! let measured = parsed
//!     .records
//!     .iter()
//!     .map(|r| measure_label(r, fonts, &config.style, config.padding, engine.content_width()))
//!     .collect();
//!
//! let layout = engine.place(measured);
//! assert_eq!(layout.label_count(), 1);
//! ```

mod config;
mod engine;
mod margins;
mod measure;
pub(crate) mod wrap;

pub use config::*;
pub use engine::*;
pub use margins::*;
pub use measure::*;
pub use wrap::*;
