//! Touch input types shared by drivers and the coordinator

use crate::geometry::Point;

/// Kind of touch sample reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    /// Finger went down (starts a gesture, re-runs hit testing)
    Touch,
    /// Finger moved while down
    Drag,
    /// Finger lifted
    Release,
}

/// A single touch sample in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub kind: TouchKind,
    pub point: Point,
}

impl TouchEvent {
    pub const fn new(kind: TouchKind, point: Point) -> Self {
        Self { kind, point }
    }

    pub const fn touch(x: i32, y: i32) -> Self {
        Self::new(TouchKind::Touch, Point::new(x, y))
    }

    pub const fn drag(x: i32, y: i32) -> Self {
        Self::new(TouchKind::Drag, Point::new(x, y))
    }

    pub const fn release(x: i32, y: i32) -> Self {
        Self::new(TouchKind::Release, Point::new(x, y))
    }

    /// True for the sample that starts a new gesture.
    pub fn is_touch_down(&self) -> bool {
        self.kind == TouchKind::Touch
    }
}
