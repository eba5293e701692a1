#![forbid(unsafe_code)]

//! Geometric primitives.

/// A point or displacement in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new offset.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Offset {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size. Also the size of a callout that has not been measured yet.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is non-positive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// An axis-aligned rectangle.
///
/// Width and height are signed: geometry derived from a cutout that hangs
/// off the screen edge can legitimately come out negative. Such rectangles
/// are *degenerate* and render as nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Zero rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin covering `size`.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Offset, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn origin(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area, treating negative extents as zero.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when the rectangle covers no area (zero, negative, or NaN extent).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the rectangle (half-open on the far edges).
    #[inline]
    pub fn contains(&self, point: Offset) -> bool {
        !self.is_degenerate()
            && point.x >= self.x
            && point.x < self.max_x()
            && point.y >= self.y
            && point.y < self.max_y()
    }

    /// Compute the overlap with another rectangle, returning `None` if the
    /// two do not share any area.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Whether the two rectangles share any area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Offset, Rect, Size};

    #[test]
    fn edges_and_midpoints() {
        let rect = Rect::new(100.0, 200.0, 50.0, 30.0);
        assert_eq!(rect.max_x(), 150.0);
        assert_eq!(rect.max_y(), 230.0);
        assert_eq!(rect.mid_x(), 125.0);
        assert_eq!(rect.mid_y(), 215.0);
        assert_eq!(rect.size(), Size::new(50.0, 30.0));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Offset::new(2.0, 3.0)));
        assert!(rect.contains(Offset::new(5.9, 7.9)));
        assert!(!rect.contains(Offset::new(6.0, 3.0)));
        assert!(!rect.contains(Offset::new(2.0, 8.0)));
    }

    #[test]
    fn degenerate_rects_contain_nothing() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, -3.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, -3.0, 10.0).contains(Offset::new(-1.0, 1.0)));
        assert_eq!(Rect::new(0.0, 0.0, -3.0, 10.0).area(), 0.0);
    }

    #[test]
    fn intersection_overlaps() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.intersection_opt(&b), Some(Rect::new(2.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(2.0, 0.0, 2.0, 2.0);
        assert!(!a.intersects(&b));
    }
}
