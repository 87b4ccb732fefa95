//! Geometry primitives in layout units.

use serde::{Deserialize, Serialize};

/// A pointer or anchor position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the point lies inside (edges inclusive on the leading side)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Whether the two boxes overlap with a non-empty area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same box shifted by the given offset
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_contains() {
        let rect = Rect::new(0.0, 10.0, 100.0, 40.0);
        assert_eq!(rect.center(), Point::new(50.0, 30.0));
        assert!(rect.contains(Point::new(0.0, 10.0)));
        assert!(rect.contains(Point::new(99.0, 49.0)));
        assert!(!rect.contains(Point::new(100.0, 20.0)));
        assert!(!rect.contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_touching_rows_do_not_intersect() {
        let first = Rect::new(0.0, 0.0, 100.0, 40.0);
        let second = Rect::new(0.0, 40.0, 100.0, 40.0);
        assert!(!first.intersects(&second));
        assert!(first.translated(0.0, 1.0).intersects(&second));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
