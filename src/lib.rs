//! Turns pasted name and address blocks into paginated, printable PDF label sheets.
//!
//! ```
//! use label_gen::layout::LayoutConfig;
//! use label_gen::{render, OutputMode};
//!
//! let text = "John Doe\n123 Main St\nSpringfield\n\nFrom:\nJane Roe\n221B Baker St";
//! let sheet = render(text, &LayoutConfig::grid(3, 8), OutputMode::Preview)?;
//! assert_eq!(sheet.labels, 2);
//! assert!(sheet.bytes.starts_with(b"%PDF-"));
//! # Ok::<(), label_gen::LabelError>(())
//! ```

pub mod address;

mod content;

mod document;
pub use document::*;

mod draw;
pub use draw::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod sheet;
pub use sheet::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
