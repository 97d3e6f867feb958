//! Render surface abstraction.

use crate::geometry::arrow_polygon;
use crate::shapes::Shape;
use kurbo::{Point, Rect};

/// Immediate-mode drawing capability the engine renders through.
///
/// Implementations keep no drawing state between calls; every call paints
/// directly onto the backend.
pub trait Surface {
    /// Clear the whole surface extent.
    fn clear_all(&mut self);

    /// Stroke each consecutive pair of `points`, plus a one-pixel dot at the first point
    /// so single-point curves stay visible.
    fn stroke_polyline(&mut self, points: &[Point], line_width: f64, color: &str);

    /// Stroke a rectangle outline with quadratic corners of `radius`.
    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, color: &str, line_width: f64);

    /// Stroke an ellipse with `color`; the fill is fully transparent.
    fn fill_and_stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        line_width: f64,
        color: &str,
    );

    fn stroke_line(&mut self, begin: Point, end: Point, color: &str, line_width: f64);

    /// Fill a closed polygon (used for arrows).
    fn fill_polygon(&mut self, vertices: &[Point], color: &str);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear_all(&mut self) {
        (**self).clear_all()
    }

    fn stroke_polyline(&mut self, points: &[Point], line_width: f64, color: &str) {
        (**self).stroke_polyline(points, line_width, color)
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, color: &str, line_width: f64) {
        (**self).stroke_rounded_rect(rect, radius, color, line_width)
    }

    fn fill_and_stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        line_width: f64,
        color: &str,
    ) {
        (**self).fill_and_stroke_ellipse(center, radius_x, radius_y, line_width, color)
    }

    fn stroke_line(&mut self, begin: Point, end: Point, color: &str, line_width: f64) {
        (**self).stroke_line(begin, end, color, line_width)
    }

    fn fill_polygon(&mut self, vertices: &[Point], color: &str) {
        (**self).fill_polygon(vertices, color)
    }
}

/// Paint one shape. Triangles stroke their three edges; every other variant
/// maps to exactly one surface call.
pub fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape) {
    match shape {
        Shape::Rectangle(rect) => surface.stroke_rounded_rect(
            rect.as_rect(),
            rect.corner_radius,
            &rect.style.color,
            rect.style.line_width,
        ),
        Shape::Ellipse(ellipse) => surface.fill_and_stroke_ellipse(
            ellipse.center,
            ellipse.radius_x,
            ellipse.radius_y,
            ellipse.style.line_width,
            &ellipse.style.color,
        ),
        Shape::Curve(curve) => {
            surface.stroke_polyline(&curve.points, curve.style.line_width, &curve.style.color)
        }
        Shape::Line(line) => {
            surface.stroke_line(line.begin, line.end, &line.style.color, line.style.line_width)
        }
        Shape::Arrow(arrow) => {
            let polygon = arrow_polygon(arrow.begin, arrow.end, arrow.head_spread_degrees);
            surface.fill_polygon(polygon.vertices(), &arrow.style.color)
        }
        Shape::Triangle(triangle) => {
            // Separate segments so no polyline start dot is painted at the apex.
            for (begin, end) in triangle.edges() {
                surface.stroke_line(begin, end, &triangle.style.color, triangle.style.line_width);
            }
        }
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Polyline {
        points: Vec<Point>,
        line_width: f64,
        color: String,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        color: String,
        line_width: f64,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
        line_width: f64,
        color: String,
    },
    Line {
        begin: Point,
        end: Point,
        color: String,
        line_width: f64,
    },
    Polygon {
        vertices: Vec<Point>,
        color: String,
    },
}

/// Headless surface that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands issued since the most recent clear.
    pub fn since_last_clear(&self) -> &[DrawCommand] {
        match self.commands.iter().rposition(|c| *c == DrawCommand::Clear) {
            Some(idx) => &self.commands[idx + 1..],
            None => &self.commands,
        }
    }

    pub fn clear_count(&self) -> usize {
        self.commands.iter().filter(|c| **c == DrawCommand::Clear).count()
    }
}

impl Surface for RecordingSurface {
    fn clear_all(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Point], line_width: f64, color: &str) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            line_width,
            color: color.to_string(),
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, color: &str, line_width: f64) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            radius,
            color: color.to_string(),
            line_width,
        });
    }

    fn fill_and_stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        line_width: f64,
        color: &str,
    ) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            line_width,
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, begin: Point, end: Point, color: &str, line_width: f64) {
        self.commands.push(DrawCommand::Line {
            begin,
            end,
            color: color.to_string(),
            line_width,
        });
    }

    fn fill_polygon(&mut self, vertices: &[Point], color: &str) {
        self.commands.push(DrawCommand::Polygon {
            vertices: vertices.to_vec(),
            color: color.to_string(),
        });
    }
}
