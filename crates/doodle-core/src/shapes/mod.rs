//! Shape definitions for the drawing surface.

mod arrow;
mod curve;
mod ellipse;
mod line;
mod rectangle;
mod triangle;

pub use arrow::Arrow;
pub use curve::Curve;
pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Stroke style carried by every committed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Color string as understood by the rendering backend (e.g. `"black"`, `"#ff0000"`).
    pub color: String,
    /// Stroke width in pixels.
    pub line_width: f64,
}

impl ShapeStyle {
    pub fn new(color: impl Into<String>, line_width: f64) -> Self {
        Self {
            color: color.into(),
            line_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new("black", 2.0)
    }
}

/// A committed shape.
///
/// Serialized internally tagged by `kind`, which is the form sent through the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Curve(Curve),
    Line(Line),
    Arrow(Arrow),
    Triangle(Triangle),
}

impl Shape {
    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => &s.style,
            Shape::Ellipse(s) => &s.style,
            Shape::Curve(s) => &s.style,
            Shape::Line(s) => &s.style,
            Shape::Arrow(s) => &s.style,
            Shape::Triangle(s) => &s.style,
        }
    }

    /// The tool that produces this kind of shape.
    pub fn kind(&self) -> ToolKind {
        match self {
            Shape::Rectangle(_) => ToolKind::Rect,
            Shape::Ellipse(_) => ToolKind::Circle,
            Shape::Curve(_) => ToolKind::Curve,
            Shape::Line(_) => ToolKind::Line,
            Shape::Arrow(_) => ToolKind::Arrow,
            Shape::Triangle(_) => ToolKind::Triangle,
        }
    }
}
