//! Triangle shape.
//!
//! The triangle tool never commits one of these (see [`crate::tools::ToolKind::Triangle`]),
//! but triangles received from peers or loaded into history still render.

use super::ShapeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub top: Point,
    pub left: Point,
    pub right: Point,
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(top: Point, left: Point, right: Point, style: ShapeStyle) -> Self {
        Self {
            top,
            left,
            right,
            style,
        }
    }

    /// Edges of the closed outline `top -> right -> left -> top`.
    pub fn edges(&self) -> [(Point, Point); 3] {
        [(self.top, self.right), (self.right, self.left), (self.left, self.top)]
    }
}
