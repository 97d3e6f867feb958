//! Straight line shape.

use super::ShapeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub begin: Point,
    pub end: Point,
    pub style: ShapeStyle,
}

impl Line {
    pub fn new(begin: Point, end: Point, style: ShapeStyle) -> Self {
        Self { begin, end, style }
    }
}
