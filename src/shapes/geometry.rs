/// Shape geometry (position and size).
use crate::common::unit::{
    MAX_COORDINATE_EMU, MIN_COORDINATE_EMU, emu_to_inches, square_emu_to_square_inches,
    try_inches_to_emu,
};
use crate::common::{Error, Result};
use serde::Serialize;

/// Axis-aligned shape rectangle in EMUs.
///
/// Width and height are always positive and every edge lies within
/// [`MIN_COORDINATE_EMU`]`..=`[`MAX_COORDINATE_EMU`]; constructors reject
/// anything else. Edge arithmetic therefore never overflows.
///
/// # Examples
///
/// ```rust
/// use deckwright::shapes::Rect;
///
/// let rect = Rect::new(914400, 914400, 1828800, 914400).unwrap();
/// assert_eq!(rect.right(), 2743200);
/// assert_eq!(rect.bottom(), 1828800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position in EMUs
    left: i64,
    /// Y position in EMUs
    top: i64,
    /// Width in EMUs
    width: i64,
    /// Height in EMUs
    height: i64,
}

impl Rect {
    /// Create a rectangle, validating `width > 0`, `height > 0` and the
    /// coordinate range of all four edges.
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidGeometry(format!(
                "width and height must be positive, got {}x{} EMU",
                width, height
            )));
        }
        let coordinates = MIN_COORDINATE_EMU..=MAX_COORDINATE_EMU;
        let far_edge = |origin: i64, extent: i64| {
            origin
                .checked_add(extent)
                .filter(|edge| coordinates.contains(edge))
        };
        if !coordinates.contains(&left)
            || !coordinates.contains(&top)
            || far_edge(left, width).is_none()
            || far_edge(top, height).is_none()
        {
            return Err(Error::InvalidGeometry(format!(
                "rectangle ({}, {}) {}x{} EMU exceeds the coordinate range",
                left, top, width, height
            )));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Create a rectangle from inch values.
    pub fn from_inches(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(
            try_inches_to_emu("left", left)?,
            try_inches_to_emu("top", top)?,
            try_inches_to_emu("width", width)?,
            try_inches_to_emu("height", height)?,
        )
    }

    #[inline]
    pub fn left(&self) -> i64 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> i64 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// Horizontal center, possibly fractional.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left as f64 + self.width as f64 / 2.0
    }

    /// Vertical center, possibly fractional.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top as f64 + self.height as f64 / 2.0
    }

    /// Area in square EMUs.
    #[inline]
    pub fn area(&self) -> i128 {
        self.width as i128 * self.height as i128
    }

    /// Move the rectangle, keeping its size.
    #[inline]
    pub fn with_origin(self, left: i64, top: i64) -> Self {
        Self { left, top, ..self }
    }

    #[inline]
    pub fn with_left(self, left: i64) -> Self {
        Self { left, ..self }
    }

    #[inline]
    pub fn with_top(self, top: i64) -> Self {
        Self { top, ..self }
    }

    /// Resize the rectangle, keeping its origin.
    pub fn with_size(self, width: i64, height: i64) -> Result<Self> {
        Self::new(self.left, self.top, width, height)
    }

    /// Intersection with another rectangle.
    ///
    /// Returns `None` unless the interiors overlap: rectangles whose edges
    /// merely touch do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if self.right() <= other.left
            || self.left >= other.right()
            || self.bottom() <= other.top
            || self.top >= other.bottom()
        {
            return None;
        }

        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect {
            left,
            top,
            width: right - left,
            height: bottom - top,
        })
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Whether the vertical extents overlap (the shapes sit side by side).
    #[inline]
    pub fn faces_horizontally(&self, other: &Rect) -> bool {
        self.top < other.bottom() && self.bottom() > other.top
    }

    /// Whether the horizontal extents overlap (the shapes are stacked).
    #[inline]
    pub fn faces_vertically(&self, other: &Rect) -> bool {
        self.left < other.right() && self.right() > other.left
    }

    /// Geometry in inches.
    pub fn to_bounds(&self) -> Bounds {
        Bounds {
            left: emu_to_inches(self.left),
            top: emu_to_inches(self.top),
            width: emu_to_inches(self.width),
            height: emu_to_inches(self.height),
        }
    }

    /// Area in square inches.
    pub fn area_inches(&self) -> f64 {
        square_emu_to_square_inches(self.area())
    }
}

/// Rectangle in inches, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A shape's origin in inches, keyed by its index in the shape set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub index: usize,
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub(crate) fn of(index: usize, rect: &Rect) -> Self {
        Self {
            index,
            left: emu_to_inches(rect.left),
            top: emu_to_inches(rect.top),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_rejects_non_positive_size() {
        assert!(Rect::new(0, 0, 0, 10).is_err());
        assert!(Rect::new(0, 0, 10, -1).is_err());
        assert!(Rect::new(-5, -5, 1, 1).is_ok());
    }

    #[test]
    fn test_rect_rejects_edges_out_of_range() {
        assert!(Rect::new(MAX_COORDINATE_EMU - 10, 0, 10, 10).is_ok());
        assert!(Rect::new(MAX_COORDINATE_EMU - 10, 0, 11, 10).is_err());
        assert!(Rect::new(0, i64::MAX, 10, 10).is_err());
        assert!(Rect::new(i64::MIN, 0, 10, 10).is_err());
        assert!(Rect::new(0, 0, i64::MAX, 10).is_err());

        assert!(Rect::from_inches(1.0e14, 0.0, 2.0, 1.0).is_err());
        assert!(Rect::from_inches(f64::NAN, 0.0, 2.0, 1.0).is_err());
        assert!(Rect::from_inches(0.0, 0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_edges_and_centers() {
        let r = Rect::new(100, 200, 50, 31).unwrap();
        assert_eq!(r.right(), 150);
        assert_eq!(r.bottom(), 231);
        assert_eq!(r.center_x(), 125.0);
        assert_eq!(r.center_y(), 215.5);
        assert_eq!(r.area(), 1550);
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::from_inches(0.0, 0.0, 2.0, 1.0).unwrap();
        let b = Rect::from_inches(2.0, 0.0, 2.0, 1.0).unwrap();
        assert!(a.intersection(&b).is_none());
        assert!(b.intersection(&a).is_none());
    }

    #[test]
    fn test_intersection_and_union() {
        let a = Rect::new(0, 0, 100, 100).unwrap();
        let b = Rect::new(50, 25, 100, 50).unwrap();
        let i = a.intersection(&b).unwrap();
        assert_eq!((i.left(), i.top(), i.width(), i.height()), (50, 25, 50, 50));

        let u = a.union(&b);
        assert_eq!((u.left(), u.top(), u.right(), u.bottom()), (0, 0, 150, 100));
    }

    #[test]
    fn test_bounds_in_inches() {
        let r = Rect::new(914_400, 457_200, 1_828_800, 914_400).unwrap();
        let b = r.to_bounds();
        assert_eq!(b, Bounds::new(1.0, 0.5, 2.0, 1.0));
        assert_eq!(r.area_inches(), 2.0);
    }
}
