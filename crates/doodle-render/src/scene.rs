//! Display-list surface.

use crate::color::parse_color;
use doodle_core::{Surface, polygon_path, rounded_rect_path};
use kurbo::{BezPath, Ellipse, Point, Rect, Shape as KurboShape};
use peniko::Color;

/// Flattening tolerance used when converting curved primitives to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// How a scene item is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenePaint {
    Stroke { width: f64 },
    Fill,
}

/// One painted path.
#[derive(Debug, Clone)]
pub struct SceneItem {
    pub path: BezPath,
    pub paint: ScenePaint,
    pub color: Color,
}

/// Surface that accumulates painted paths in draw order.
///
/// `clear_all` empties the list, so after any redraw the list holds exactly
/// what a pixel backend would show.
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    items: Vec<SceneItem>,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Union of all item bounds, if anything is painted.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(|item| item.path.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    fn push(&mut self, path: BezPath, paint: ScenePaint, color: Color) {
        self.items.push(SceneItem { path, paint, color });
    }
}

impl Surface for SceneSurface {
    fn clear_all(&mut self) {
        self.items.clear();
    }

    fn stroke_polyline(&mut self, points: &[Point], line_width: f64, color: &str) {
        let Some(first) = points.first() else {
            return;
        };
        let mut path = BezPath::new();
        // One-pixel dot so a lone point is still visible.
        path.move_to((first.x - 1.0, first.y));
        path.line_to(*first);
        for pair in points.windows(2) {
            path.move_to(pair[0]);
            path.line_to(pair[1]);
        }
        self.push(path, ScenePaint::Stroke { width: line_width }, parse_color(color));
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, color: &str, line_width: f64) {
        let path = rounded_rect_path(rect.x0, rect.y0, rect.width(), rect.height(), radius);
        self.push(path, ScenePaint::Stroke { width: line_width }, parse_color(color));
    }

    fn fill_and_stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        line_width: f64,
        color: &str,
    ) {
        let path = Ellipse::new(center, (radius_x, radius_y), 0.0).to_path(PATH_TOLERANCE);
        self.push(path.clone(), ScenePaint::Fill, Color::TRANSPARENT);
        self.push(path, ScenePaint::Stroke { width: line_width }, parse_color(color));
    }

    fn stroke_line(&mut self, begin: Point, end: Point, color: &str, line_width: f64) {
        let mut path = BezPath::new();
        path.move_to(begin);
        path.line_to(end);
        self.push(path, ScenePaint::Stroke { width: line_width }, parse_color(color));
    }

    fn fill_polygon(&mut self, vertices: &[Point], color: &str) {
        if vertices.is_empty() {
            return;
        }
        self.push(polygon_path(vertices), ScenePaint::Fill, parse_color(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodle_core::{Engine, EngineConfig, Point, ToolKind};
    use kurbo::PathEl;
    use std::time::Duration;

    #[test]
    fn test_single_point_polyline_is_a_dot() {
        let mut surface = SceneSurface::new();
        surface.stroke_polyline(&[Point::new(10.0, 10.0)], 2.0, "black");
        let els = surface.items()[0].path.elements();
        assert_eq!(
            els,
            &[PathEl::MoveTo(Point::new(9.0, 10.0)), PathEl::LineTo(Point::new(10.0, 10.0))]
        );
        assert_eq!(surface.items()[0].paint, ScenePaint::Stroke { width: 2.0 });
    }

    #[test]
    fn test_polyline_segments() {
        let mut surface = SceneSurface::new();
        let points = [Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        surface.stroke_polyline(&points, 1.0, "black");
        // Dot plus two segments, each its own subpath.
        assert_eq!(surface.items()[0].path.elements().len(), 6);
    }

    #[test]
    fn test_empty_inputs_paint_nothing() {
        let mut surface = SceneSurface::new();
        surface.stroke_polyline(&[], 1.0, "black");
        surface.fill_polygon(&[], "black");
        assert!(surface.is_empty());
        assert_eq!(surface.bounds(), None);
    }

    #[test]
    fn test_ellipse_fill_is_transparent() {
        let mut surface = SceneSurface::new();
        surface.fill_and_stroke_ellipse(Point::new(50.0, 50.0), 20.0, 10.0, 3.0, "blue");
        assert_eq!(surface.len(), 2);
        assert_eq!(surface.items()[0].paint, ScenePaint::Fill);
        assert_eq!(surface.items()[0].color.to_rgba8().a, 0);
        assert_eq!(surface.items()[1].paint, ScenePaint::Stroke { width: 3.0 });

        let bounds = surface.items()[1].path.bounding_box();
        assert!((bounds.x0 - 30.0).abs() < 0.5);
        assert!((bounds.y1 - 60.0).abs() < 0.5);
    }

    #[test]
    fn test_polygon_is_closed() {
        let mut surface = SceneSurface::new();
        surface.fill_polygon(&[Point::ZERO, Point::new(5.0, 0.0), Point::new(0.0, 5.0)], "red");
        let els = surface.items()[0].path.elements();
        assert_eq!(els.last(), Some(&PathEl::ClosePath));
        assert_eq!(surface.items()[0].color.to_rgba8().r, 255);
    }

    #[test]
    fn test_clear_empties_scene() {
        let mut surface = SceneSurface::new();
        surface.stroke_line(Point::ZERO, Point::new(1.0, 1.0), "black", 1.0);
        surface.clear_all();
        assert!(surface.is_empty());
    }

    #[test]
    fn test_engine_renders_into_scene() {
        let config = EngineConfig::default().with_tool(ToolKind::Rect);
        let mut engine = Engine::new(SceneSurface::new(), config);
        engine.pointer_down(Point::new(10.0, 10.0));
        engine.pointer_move(Point::new(60.0, 40.0), Duration::from_millis(16));
        engine.pointer_up(Point::new(60.0, 40.0));

        let scene = engine.into_surface();
        assert_eq!(scene.len(), 1);
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds, Rect::new(10.0, 10.0, 60.0, 40.0));
    }
}
