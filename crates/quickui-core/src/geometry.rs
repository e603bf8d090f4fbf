//! Integer geometry used by the window tree.
//!
//! These are deliberately separate from the `embedded-graphics` geometry
//! types: window sizes are signed so that an empty or inverted rectangle is
//! representable (and simply contains nothing). Conversions to the
//! `embedded-graphics` types are provided for the driver adapter.

use core::ops::{Add, Neg, Sub};

use embedded_graphics::geometry::{Point as EgPoint, Size as EgSize};
use embedded_graphics::primitives::Rectangle as EgRectangle;

/// A location in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin, `(0, 0)`.
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `origin`, saturating at the `i32` range.
    pub const fn translate(self, origin: Point) -> Self {
        Self {
            x: self.x.saturating_add(origin.x),
            y: self.y.saturating_add(origin.y),
        }
    }

    /// Express this point relative to `origin` (the inverse of [`translate`]).
    ///
    /// [`translate`]: Point::translate
    pub const fn relative_to(self, origin: Point) -> Self {
        Self {
            x: self.x.saturating_sub(origin.x),
            y: self.y.saturating_sub(origin.y),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.translate(rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.relative_to(rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

/// A width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const EMPTY: Dimension = Dimension {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero or negative.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// An axis aligned rectangle: a top-left [`Point`] plus a [`Dimension`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const EMPTY: Rectangle = Rectangle {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts(origin: Point, size: Dimension) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Half-open containment test: `x <= p.x < x + width` and likewise for y.
    ///
    /// A rectangle with a non-positive width or height contains nothing.
    pub const fn contains(&self, point: Point) -> bool {
        // Widened so extreme coordinates cannot overflow
        let (px, py) = (point.x as i64, point.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }

    /// Shift the origin by `origin`, keeping the size.
    pub const fn translate(self, origin: Point) -> Self {
        let moved = self.origin().translate(origin);
        Self::new(moved.x, moved.y, self.width, self.height)
    }

    /// The overlapping area of two rectangles, [`Rectangle::EMPTY`] if they
    /// are disjoint.
    pub fn intersection(&self, other: &Rectangle) -> Rectangle {
        if self.is_empty() || other.is_empty() {
            return Rectangle::EMPTY;
        }
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left as i64 || bottom <= top as i64 {
            return Rectangle::EMPTY;
        }
        Rectangle::new(
            left,
            top,
            clamp_i32(right - left as i64),
            clamp_i32(bottom - top as i64),
        )
    }

    /// Exclusive right edge, widened.
    const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge, widened.
    const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// ---------------------------------------------------------------------------
// embedded-graphics conversions
// ---------------------------------------------------------------------------

impl From<Point> for EgPoint {
    fn from(p: Point) -> Self {
        EgPoint::new(p.x, p.y)
    }
}

impl From<EgPoint> for Point {
    fn from(p: EgPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Dimension> for EgSize {
    fn from(d: Dimension) -> Self {
        EgSize::new(d.width.max(0) as u32, d.height.max(0) as u32)
    }
}

impl From<EgSize> for Dimension {
    fn from(s: EgSize) -> Self {
        Dimension::new(s.width as i32, s.height as i32)
    }
}

impl From<Rectangle> for EgRectangle {
    fn from(r: Rectangle) -> Self {
        EgRectangle::new(r.origin().into(), r.size().into())
    }
}

impl From<EgRectangle> for Rectangle {
    fn from(r: EgRectangle) -> Self {
        Rectangle::from_parts(r.top_left.into(), r.size.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rectangle::new(5, 5, 10, 10);
        assert!(r.contains(Point::new(5, 5)));
        assert!(r.contains(Point::new(14, 14)));
        assert!(!r.contains(Point::new(15, 14)));
        assert!(!r.contains(Point::new(14, 15)));
        assert!(!r.contains(Point::new(4, 5)));
        assert!(!r.contains(Point::new(5, 4)));
    }

    #[test]
    fn test_degenerate_rectangles_contain_nothing() {
        for r in [
            Rectangle::new(0, 0, 0, 10),
            Rectangle::new(0, 0, 10, 0),
            Rectangle::new(0, 0, -3, 10),
            Rectangle::new(-5, -5, 10, -1),
        ] {
            for x in -6..12 {
                for y in -6..12 {
                    assert!(!r.contains(Point::new(x, y)), "{:?} contains ({}, {})", r, x, y);
                }
            }
        }
    }

    #[test]
    fn test_contains_with_negative_origin() {
        let r = Rectangle::new(-10, -10, 5, 5);
        assert!(r.contains(Point::new(-10, -6)));
        assert!(!r.contains(Point::new(-5, -6)));
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rectangle::new(1, 2, 3, 4).translate(Point::new(10, 20));
        assert_eq!(r, Rectangle::new(11, 22, 3, 4));
        assert_eq!(Point::new(1, 1).translate(Point::new(-1, 2)), Point::new(0, 3));
    }

    #[test]
    fn test_relative_to_inverts_translate() {
        let p = Point::new(7, 7);
        let origin = Point::new(5, 5);
        assert_eq!(p.relative_to(origin), Point::new(2, 2));
        assert_eq!(p.relative_to(origin).translate(origin), p);
        assert_eq!(p - origin + origin, p);
    }

    #[test]
    fn test_intersection() {
        let a = Rectangle::new(0, 0, 10, 10);
        let b = Rectangle::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Rectangle::new(5, 5, 5, 5));
        assert_eq!(a.intersection(&Rectangle::new(10, 0, 5, 5)), Rectangle::EMPTY);
        assert_eq!(a.intersection(&Rectangle::new(2, 2, 0, 5)), Rectangle::EMPTY);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let far_left = Rectangle::new(i32::MIN, 0, 10, 10);
        assert!(!far_left.contains(Point::new(i32::MAX, 0)));
        assert!(far_left.contains(Point::new(i32::MIN + 9, 9)));

        let far_right = Rectangle::new(i32::MAX - 5, i32::MAX - 5, i32::MAX, i32::MAX);
        assert!(far_right.contains(Point::new(i32::MAX, i32::MAX)));
        assert!(!far_right.contains(Point::new(i32::MIN, 0)));

        let moved = Rectangle::new(i32::MAX - 1, 0, 4, 4).translate(Point::new(10, -10));
        assert_eq!(moved, Rectangle::new(i32::MAX, -10, 4, 4));
        assert_eq!(
            Point::new(i32::MIN, 0).relative_to(Point::new(1, 0)),
            Point::new(i32::MIN, 0)
        );

        let huge = Rectangle::new(0, 0, i32::MAX, i32::MAX);
        assert_eq!(far_right.intersection(&huge), Rectangle::new(i32::MAX - 5, i32::MAX - 5, 5, 5));
        assert_eq!(
            Rectangle::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX).intersection(&huge),
            Rectangle::EMPTY
        );
    }

    #[test]
    fn test_negative_size_converts_to_empty_eg_size() {
        let eg: EgRectangle = Rectangle::new(3, 4, -2, 6).into();
        assert_eq!(eg.top_left, EgPoint::new(3, 4));
        assert_eq!(eg.size, EgSize::new(0, 6));
    }
}
