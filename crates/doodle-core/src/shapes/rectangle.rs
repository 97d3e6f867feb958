//! Rectangle shape.

use super::ShapeStyle;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A rectangle outline with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Corner radius (0 = sharp corners).
    pub corner_radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle. No normalization is applied.
    pub fn new(
        position: Point,
        width: f64,
        height: f64,
        corner_radius: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            position,
            width,
            height,
            corner_radius,
            style,
        }
    }

    /// Create a rectangle from two opposite corners, whatever the drag direction.
    pub fn from_corners(p1: Point, p2: Point, corner_radius: f64, style: ShapeStyle) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(Point::new(min_x, min_y), width, height, corner_radius, style)
    }

    /// Largest corner radius that keeps every straight edge non-negative.
    pub fn max_corner_radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0).max(0.0)
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}
