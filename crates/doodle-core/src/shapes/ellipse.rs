//! Ellipse shape.

use super::ShapeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned ellipse outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    pub fn new(center: Point, radius_x: f64, radius_y: f64, style: ShapeStyle) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            style,
        }
    }

    /// Create the ellipse inscribed in the box spanned by two drag corners.
    pub fn from_corners(p1: Point, p2: Point, style: ShapeStyle) -> Self {
        Self::new(
            p1.midpoint(p2),
            (p1.x - p2.x).abs() / 2.0,
            (p1.y - p2.y).abs() / 2.0,
            style,
        )
    }
}
