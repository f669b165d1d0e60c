use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its top-left corner and its size. Page coordinates grow
    /// upwards, so the rectangle extends _down_ from `top`.
    pub fn from_top_left(x: Pt, top: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: top - height,
            x2: x + width,
            y2: top,
        }
    }

    /// Smallest rectangle containing all the given points. Returns [None] for no points.
    pub fn bounding<I: IntoIterator<Item = (Pt, Pt)>>(points: I) -> Option<Rect> {
        let mut points = points.into_iter();
        let (x, y) = points.next()?;
        let mut rect = Rect {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
        };
        for (x, y) in points {
            rect.x1 = rect.x1.min(x);
            rect.y1 = rect.y1.min(y);
            rect.x2 = rect.x2.max(x);
            rect.y2 = rect.y2.max(y);
        }
        Some(rect)
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    pub fn centre(&self) -> (Pt, Pt) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// The four corners, counter-clockwise from the lower-left
    pub fn corners(&self) -> [(Pt, Pt); 4] {
        [
            (self.x1, self.y1),
            (self.x2, self.y1),
            (self.x2, self.y2),
            (self.x1, self.y2),
        ]
    }

    /// Whether the two rectangles share any area. Rectangles that merely touch along
    /// an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::from_top_left(Pt(0.0), Pt(100.0), Pt(50.0), Pt(50.0));
        let below = Rect::from_top_left(Pt(0.0), Pt(50.0), Pt(50.0), Pt(50.0));
        let beside = Rect::from_top_left(Pt(50.0), Pt(100.0), Pt(50.0), Pt(50.0));
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&beside));

        let shifted = Rect::from_top_left(Pt(25.0), Pt(75.0), Pt(50.0), Pt(50.0));
        assert!(a.overlaps(&shifted));
        assert!(shifted.overlaps(&a));
    }

    #[test]
    fn bounding_box_of_points() {
        let r = Rect::bounding([(Pt(3.0), Pt(-1.0)), (Pt(-2.0), Pt(4.0))]).unwrap();
        assert_eq!(r.width(), Pt(5.0));
        assert_eq!(r.height(), Pt(5.0));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }
}
