//! Freehand curve shape.

use super::ShapeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A freehand polyline, sampled at pointer-move frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Points in insertion order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Curve {
    pub fn new(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self { points, style }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
