//! Screen geometry and drag axes

use serde::{Deserialize, Serialize};

/// 2D point in host view coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Half-open containment test: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + self.size.height
    }
}

/// The single screen axis along which swipes are recognized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Swipe left/right (x axis)
    #[default]
    Horizontal,
    /// Swipe up/down (y axis)
    Vertical,
}

impl Axis {
    /// Coordinate of `point` along this axis
    pub fn along(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Coordinate of `point` along the perpendicular axis
    pub fn across(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.y,
            Axis::Vertical => point.x,
        }
    }

    /// Extent of `size` along this axis
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// The perpendicular axis
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_projection() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(Axis::Horizontal.along(p), 3.0);
        assert_eq!(Axis::Horizontal.across(p), 7.0);
        assert_eq!(Axis::Vertical.along(p), 7.0);
        assert_eq!(Axis::Vertical.across(p), 3.0);
        assert_eq!(Axis::Vertical.perpendicular(), Axis::Horizontal);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(99.9, 49.9)));
        assert!(!rect.contains(Point::new(100.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 50.0)));
    }

    #[test]
    fn test_axis_extent() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(Axis::Horizontal.extent(rect.size), 100.0);
        assert_eq!(Axis::Vertical.extent(rect.size), 50.0);
    }
}
