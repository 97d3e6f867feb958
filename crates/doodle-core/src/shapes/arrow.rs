//! Arrow shape.

use super::ShapeStyle;
use crate::geometry::{ArrowPolygon, arrow_polygon};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An arrow: a shaft from `begin` to `end` with a flared head at `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Start point.
    pub begin: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Angular half-width of the arrowhead, in degrees.
    pub head_spread_degrees: f64,
    /// Style properties. Only the color is used when filling the arrow.
    pub style: ShapeStyle,
}

impl Arrow {
    /// Default arrowhead half-width in degrees.
    pub const DEFAULT_HEAD_SPREAD: f64 = 25.0;

    /// Create a new arrow with the default head spread.
    pub fn new(begin: Point, end: Point, style: ShapeStyle) -> Self {
        Self::with_spread(begin, end, Self::DEFAULT_HEAD_SPREAD, style)
    }

    pub fn with_spread(
        begin: Point,
        end: Point,
        head_spread_degrees: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            begin,
            end,
            head_spread_degrees,
            style,
        }
    }

    /// The filled outline of this arrow.
    pub fn polygon(&self) -> ArrowPolygon {
        arrow_polygon(self.begin, self.end, self.head_spread_degrees)
    }
}
