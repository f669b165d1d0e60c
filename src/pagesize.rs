//! Named sizes for the print media labels usually go on.
//!
//! All sizes are portrait (width ≤ height), in points.
//!
//! ```
//! use label_gen::pagesize::PageSize;
//! use label_gen::Pt;
//!
//! let (width, height) = PageSize::Letter.dimensions();
//! assert_eq!((width, height), (Pt(612.0), Pt(792.0)));
//! assert_eq!("a4".parse::<PageSize>(), Ok(PageSize::A4));
//! ```

use crate::units::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Common paper sizes for label sheets
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    A3,
    A4,
    A5,
    A6,
    Letter,
    Legal,
}

impl PageSize {
    /// Page dimensions as (width, height) in points
    pub fn dimensions(self) -> (Pt, Pt) {
        match self {
            PageSize::A3 => (Mm(297.0).into(), Mm(420.0).into()),
            PageSize::A4 => (Mm(210.0).into(), Mm(297.0).into()),
            PageSize::A5 => (Mm(148.0).into(), Mm(210.0).into()),
            PageSize::A6 => (Mm(105.0).into(), Mm(148.0).into()),
            PageSize::Letter => (In(8.5).into(), In(11.0).into()),
            PageSize::Legal => (In(8.5).into(), In(14.0).into()),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            "a6" => Ok(PageSize::A6),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(format!("unknown page size `{other}`")),
        }
    }
}
