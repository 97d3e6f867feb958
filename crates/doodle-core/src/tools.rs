//! Tool system: which shape a gesture draws, and the per-gesture buffer.

use crate::shapes::{Arrow, Curve, Ellipse, Line, Rectangle, Shape, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Freehand polyline.
    Curve,
    #[default]
    Line,
    Rect,
    /// Ellipse inscribed in the drag box.
    Circle,
    Arrow,
    /// Tracks candidate vertices while dragging but has no commit rule, so a
    /// triangle gesture never produces a shape.
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Curve,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Circle,
        ToolKind::Arrow,
        ToolKind::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Curve => "curve",
            ToolKind::Line => "line",
            ToolKind::Rect => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Arrow => "arrow",
            ToolKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a tool name does not match any [`ToolKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool: {0:?}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// Settings applied to shapes built from a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub style: ShapeStyle,
    /// Requested corner radius for rectangles, clamped per shape.
    pub corner_radius: f64,
    pub arrow_head_spread: f64,
}

/// In-progress gesture data. A fresh value is created on pointer-down and
/// dropped on commit or cancel.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Curve { points: Vec<Point> },
    Line { begin: Point, end: Point },
    Rect { begin: Point, end: Point },
    Circle { begin: Point, end: Point },
    Arrow { begin: Point, end: Point },
    Triangle { begin: Point, top: Point, left: Point },
}

impl Gesture {
    /// Start a gesture for `tool` at `pos`.
    pub fn begin(tool: ToolKind, pos: Point) -> Self {
        match tool {
            ToolKind::Curve => Gesture::Curve { points: vec![pos] },
            ToolKind::Line => Gesture::Line { begin: pos, end: pos },
            ToolKind::Rect => Gesture::Rect { begin: pos, end: pos },
            ToolKind::Circle => Gesture::Circle { begin: pos, end: pos },
            ToolKind::Arrow => Gesture::Arrow { begin: pos, end: pos },
            ToolKind::Triangle => Gesture::Triangle {
                begin: pos,
                top: pos,
                left: pos,
            },
        }
    }

    /// The tool this gesture was started with.
    pub fn tool(&self) -> ToolKind {
        match self {
            Gesture::Curve { .. } => ToolKind::Curve,
            Gesture::Line { .. } => ToolKind::Line,
            Gesture::Rect { .. } => ToolKind::Rect,
            Gesture::Circle { .. } => ToolKind::Circle,
            Gesture::Arrow { .. } => ToolKind::Arrow,
            Gesture::Triangle { .. } => ToolKind::Triangle,
        }
    }

    /// Fold a processed pointer-move into the buffer.
    pub fn update(&mut self, pos: Point) {
        match self {
            Gesture::Curve { points } => points.push(pos),
            Gesture::Line { end, .. }
            | Gesture::Rect { end, .. }
            | Gesture::Circle { end, .. }
            | Gesture::Arrow { end, .. } => *end = pos,
            Gesture::Triangle { begin, top, left } => {
                *top = Point::new(begin.x, pos.y);
                *left = Point::new(pos.x, begin.y);
            }
        }
    }

    /// Apply the pointer-up position. Curves keep only their sampled moves.
    pub fn release(&mut self, pos: Point) {
        if !matches!(self, Gesture::Curve { .. }) {
            self.update(pos);
        }
    }

    /// A drag that ended where it started leaves nothing to commit.
    pub fn is_zero_effect(&self) -> bool {
        match self {
            Gesture::Curve { points } => points.is_empty(),
            Gesture::Line { begin, end }
            | Gesture::Rect { begin, end }
            | Gesture::Circle { begin, end }
            | Gesture::Arrow { begin, end } => begin == end,
            Gesture::Triangle { .. } => true,
        }
    }

    /// Build the shape this gesture currently describes, if any.
    pub fn to_shape(&self, brush: &Brush) -> Option<Shape> {
        let style = brush.style.clone();
        let shape = match self {
            Gesture::Curve { points } => Shape::Curve(Curve::new(points.clone(), style)),
            Gesture::Line { begin, end } => Shape::Line(Line::new(*begin, *end, style)),
            Gesture::Rect { begin, end } => {
                let mut rect = Rectangle::from_corners(*begin, *end, 0.0, style);
                rect.corner_radius = brush.corner_radius.max(0.0).min(rect.max_corner_radius());
                Shape::Rectangle(rect)
            }
            Gesture::Circle { begin, end } => {
                Shape::Ellipse(Ellipse::from_corners(*begin, *end, style))
            }
            Gesture::Arrow { begin, end } => {
                Shape::Arrow(Arrow::with_spread(*begin, *end, brush.arrow_head_spread, style))
            }
            Gesture::Triangle { .. } => return None,
        };
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brush() -> Brush {
        Brush {
            style: ShapeStyle::default(),
            corner_radius: 0.0,
            arrow_head_spread: Arrow::DEFAULT_HEAD_SPREAD,
        }
    }

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolKind::ALL {
            assert_eq!(tool.name().parse::<ToolKind>(), Ok(tool));
        }
    }

    #[test]
    fn test_unknown_tool() {
        let err = "hexagon".parse::<ToolKind>().unwrap_err();
        assert_eq!(err, UnknownTool("hexagon".to_string()));
        assert_eq!(err.to_string(), "unknown tool: \"hexagon\"");
    }

    #[test]
    fn test_default_tool_is_line() {
        assert_eq!(ToolKind::default(), ToolKind::Line);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ToolKind::Circle).unwrap(), "\"circle\"");
        let tool: ToolKind = serde_json::from_str("\"rect\"").unwrap();
        assert_eq!(tool, ToolKind::Rect);
    }

    #[test]
    fn test_curve_release_keeps_samples() {
        let mut gesture = Gesture::begin(ToolKind::Curve, Point::new(0.0, 0.0));
        gesture.update(Point::new(1.0, 1.0));
        gesture.release(Point::new(9.0, 9.0));
        assert_eq!(
            gesture,
            Gesture::Curve {
                points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]
            }
        );
    }

    #[test]
    fn test_drag_release_moves_end() {
        let mut gesture = Gesture::begin(ToolKind::Line, Point::new(0.0, 0.0));
        gesture.release(Point::new(5.0, 6.0));
        let Some(Shape::Line(line)) = gesture.to_shape(&brush()) else {
            panic!("expected a line");
        };
        assert_eq!(line.end, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_corner_radius_is_clamped() {
        let mut b = brush();
        b.corner_radius = 50.0;
        let mut gesture = Gesture::begin(ToolKind::Rect, Point::new(0.0, 0.0));
        gesture.update(Point::new(20.0, 10.0));
        let Some(Shape::Rectangle(rect)) = gesture.to_shape(&b) else {
            panic!("expected a rectangle");
        };
        assert!((rect.corner_radius - 5.0).abs() < f64::EPSILON);

        b.corner_radius = -3.0;
        let Some(Shape::Rectangle(rect)) = gesture.to_shape(&b) else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.corner_radius, 0.0);
    }

    #[test]
    fn test_triangle_tracks_candidates_without_shape() {
        let mut gesture = Gesture::begin(ToolKind::Triangle, Point::new(10.0, 20.0));
        gesture.update(Point::new(30.0, 50.0));
        assert_eq!(
            gesture,
            Gesture::Triangle {
                begin: Point::new(10.0, 20.0),
                top: Point::new(10.0, 50.0),
                left: Point::new(30.0, 20.0),
            }
        );
        assert!(gesture.to_shape(&brush()).is_none());
        assert!(gesture.is_zero_effect());
    }

    #[test]
    fn test_zero_effect_drag() {
        let gesture = Gesture::begin(ToolKind::Arrow, Point::new(1.0, 1.0));
        assert!(gesture.is_zero_effect());
        let single_dot = Gesture::begin(ToolKind::Curve, Point::new(1.0, 1.0));
        assert!(!single_dot.is_zero_effect());
    }
}
