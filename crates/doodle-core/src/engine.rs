//! Drawing engine: gesture state machine, shape history and full redraw.
//!
//! The engine owns all drawing state for one surface. Pointer events drive a
//! per-gesture buffer ([`Gesture`]); pointer-up turns the buffer into a [`Shape`]
//! and appends it to the [`History`]. Any out-of-band drawing (drag previews,
//! undo, remote shapes) is repaired by clearing the surface and replaying the
//! history in order.

use crate::config::EngineConfig;
use crate::history::History;
use crate::input::{PointerEvent, PointerSource};
use crate::shapes::{Shape, ShapeStyle};
use crate::surface::{Surface, draw_shape};
use crate::throttle::Throttle;
use crate::tools::{Brush, Gesture, ToolKind};
use kurbo::Point;
use log::{debug, trace};
use std::time::Duration;

/// Callback invoked with each locally committed shape.
pub type CommitListener = Box<dyn FnMut(&Shape)>;

/// Drawing engine bound to one surface.
pub struct Engine<S: Surface> {
    surface: S,
    tool: ToolKind,
    brush: Brush,
    gesture: Option<Gesture>,
    history: History,
    throttle: Throttle,
    on_commit: Option<CommitListener>,
}

impl<S: Surface> Engine<S> {
    /// Attach an engine to `surface`.
    pub fn new(surface: S, config: EngineConfig) -> Self {
        let throttle = Throttle::new(config.min_move_interval());
        Self {
            surface,
            tool: config.initial_tool,
            brush: Brush {
                style: ShapeStyle::new(config.color, config.line_width),
                corner_radius: config.corner_radius,
                arrow_head_spread: config.arrow_head_spread,
            },
            gesture: None,
            history: History::new(),
            throttle,
            on_commit: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // --- Settings ---

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Select the tool for the next gesture. A gesture already in progress keeps
    /// the tool it started with.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn color(&self) -> &str {
        &self.brush.style.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.brush.style.color = color.into();
    }

    pub fn line_width(&self) -> f64 {
        self.brush.style.line_width
    }

    pub fn set_line_width(&mut self, line_width: f64) {
        self.brush.style.line_width = line_width;
    }

    pub fn corner_radius(&self) -> f64 {
        self.brush.corner_radius
    }

    pub fn set_corner_radius(&mut self, radius: f64) {
        self.brush.corner_radius = radius;
    }

    /// Register the callback that receives every locally committed shape.
    pub fn set_commit_listener(&mut self, listener: impl FnMut(&Shape) + 'static) {
        self.on_commit = Some(Box::new(listener));
    }

    // --- Gestures ---

    pub fn is_gesturing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Begin a gesture for the active tool.
    ///
    /// A down while a gesture is still open (its up was never delivered) discards
    /// the stale gesture and its preview before starting over.
    pub fn pointer_down(&mut self, pos: Point) {
        if let Some(stale) = self.gesture.take() {
            debug!("Discarding unfinished {} gesture", stale.tool());
            self.redraw();
        }

        self.throttle.reset();
        let gesture = Gesture::begin(self.tool, pos);
        if let Gesture::Curve { points } = &gesture {
            self.surface
                .stroke_polyline(points, self.brush.style.line_width, &self.brush.style.color);
        }
        self.gesture = Some(gesture);
    }

    /// Extend the gesture. Moves closer than the configured interval to the last
    /// processed move are dropped; moves without a gesture are ignored.
    pub fn pointer_move(&mut self, pos: Point, time: Duration) {
        let Some(gesture) = self.gesture.as_mut() else {
            trace!("Ignoring move at {pos:?} without a gesture");
            return;
        };
        if !self.throttle.allow(time) {
            trace!("Dropping move at {pos:?} ({time:?})");
            return;
        }

        match gesture {
            Gesture::Curve { points } => {
                // Incremental: only the newest segment is painted.
                let prev = points.last().copied().unwrap_or(pos);
                points.push(pos);
                self.surface.stroke_polyline(
                    &[prev, pos],
                    self.brush.style.line_width,
                    &self.brush.style.color,
                );
            }
            Gesture::Triangle { .. } => gesture.update(pos),
            _ => {
                gesture.update(pos);
                self.redraw();
            }
        }
    }

    /// Finish the gesture and commit its shape.
    pub fn pointer_up(&mut self, pos: Point) {
        let Some(mut gesture) = self.gesture.take() else {
            trace!("Ignoring up at {pos:?} without a gesture");
            return;
        };
        gesture.release(pos);

        if gesture.tool() == ToolKind::Triangle {
            debug!("Triangle gesture ended; the triangle tool does not commit shapes");
            return;
        }
        if gesture.is_zero_effect() {
            debug!("Discarding zero-size {} gesture", gesture.tool());
            self.redraw();
            return;
        }

        if let Some(shape) = gesture.to_shape(&self.brush) {
            self.commit(shape);
        }
    }

    /// Abandon the in-progress gesture and erase its preview.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            debug!("Cancelled {} gesture", gesture.tool());
            self.redraw();
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, .. } => self.pointer_down(position),
            PointerEvent::Move { position, time } => self.pointer_move(position, time),
            PointerEvent::Up { position, .. } => self.pointer_up(position),
            PointerEvent::Cancel => self.cancel(),
        }
    }

    /// Drain `source`, returning the number of events handled.
    pub fn drive(&mut self, source: &mut dyn PointerSource) -> usize {
        let mut handled = 0;
        while let Some(event) = source.poll_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    fn commit(&mut self, shape: Shape) {
        debug!("Committed {} ({} in history)", shape.kind(), self.history.len() + 1);
        self.history.push(shape);
        if let (Some(listener), Some(shape)) = (self.on_commit.as_mut(), self.history.last()) {
            listener(shape);
        }
        self.redraw();
    }

    // --- History ---

    /// Remove the most recent shape and redraw. Any open gesture is dropped.
    pub fn undo(&mut self) -> Option<Shape> {
        self.gesture = None;
        let removed = self.history.pop();
        if removed.is_some() {
            debug!("Undo ({} left)", self.history.len());
        }
        self.redraw();
        removed
    }

    /// Empty the history and the surface. There is no redo.
    pub fn clear_all(&mut self) {
        debug!("Clearing {} shapes", self.history.len());
        self.gesture = None;
        self.history.clear();
        self.surface.clear_all();
    }

    /// Append a shape received from another client. The commit listener is not
    /// called, so relayed shapes are never echoed back.
    pub fn apply_remote(&mut self, shape: Shape) {
        debug!("Applying remote {}", shape.kind());
        self.history.push(shape);
        self.redraw();
    }

    /// Replace the whole history, e.g. with a snapshot for a late joiner.
    pub fn load_history(&mut self, history: impl Into<History>) {
        self.history = history.into();
        debug!("Loaded {} shapes", self.history.len());
        self.redraw();
    }

    /// Clear the surface, replay history in order, then paint the in-progress
    /// gesture on top.
    pub fn redraw(&mut self) {
        self.surface.clear_all();
        for shape in &self.history {
            draw_shape(&mut self.surface, shape);
        }
        if let Some(preview) = self.gesture.as_ref().and_then(|g| g.to_shape(&self.brush)) {
            draw_shape(&mut self.surface, &preview);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use crate::shapes::{Arrow, Curve, Ellipse, Line, Rectangle, Triangle};
    use crate::surface::{DrawCommand, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine(tool: ToolKind) -> Engine<RecordingSurface> {
        Engine::new(RecordingSurface::new(), EngineConfig::default().with_tool(tool))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drag(engine: &mut Engine<RecordingSurface>, from: (f64, f64), to: (f64, f64)) {
        engine.pointer_down(Point::new(from.0, from.1));
        engine.pointer_move(Point::new(to.0, to.1), ms(20));
        engine.pointer_up(Point::new(to.0, to.1));
    }

    fn sample_history() -> Vec<Shape> {
        let style = ShapeStyle::new("green", 3.0);
        vec![
            Shape::Curve(Curve::new(
                vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0)],
                style.clone(),
            )),
            Shape::Rectangle(Rectangle::new(Point::new(5.0, 5.0), 20.0, 10.0, 2.0, style.clone())),
            Shape::Ellipse(Ellipse::new(Point::new(50.0, 50.0), 10.0, 4.0, style.clone())),
            Shape::Line(Line::new(Point::ZERO, Point::new(9.0, 9.0), style.clone())),
            Shape::Arrow(Arrow::new(Point::ZERO, Point::new(60.0, 30.0), style.clone())),
            Shape::Triangle(Triangle::new(
                Point::new(5.0, 0.0),
                Point::new(0.0, 8.0),
                Point::new(10.0, 8.0),
                style,
            )),
        ]
    }

    fn recorder(engine: &mut Engine<RecordingSurface>) -> Rc<RefCell<Vec<Shape>>> {
        let committed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&committed);
        engine.set_commit_listener(move |shape| sink.borrow_mut().push(shape.clone()));
        committed
    }

    #[test]
    fn test_redraw_is_deterministic() {
        let mut engine = engine(ToolKind::Line);
        engine.load_history(sample_history());
        engine.surface_mut().take();

        engine.redraw();
        let first = engine.surface_mut().take();
        engine.redraw();
        let second = engine.surface_mut().take();

        assert_eq!(first, second);
        assert_eq!(first[0], DrawCommand::Clear);
        // Clear, one call per shape, and two extra triangle edges.
        assert_eq!(first.len(), 1 + sample_history().len() + 2);
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut engine = engine(ToolKind::Line);
        assert_eq!(engine.undo(), None);
        assert!(engine.history().is_empty());
        assert_eq!(engine.surface().commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_commits_then_undos_restore_empty_history() {
        let mut engine = engine(ToolKind::Line);
        for i in 0..5 {
            let offset = i as f64 * 10.0;
            drag(&mut engine, (offset, 0.0), (offset + 5.0, 5.0));
        }
        assert_eq!(engine.history().len(), 5);
        for _ in 0..5 {
            assert!(engine.undo().is_some());
        }
        assert!(engine.history().is_empty());
        assert!(engine.surface().since_last_clear().is_empty());
    }

    #[test]
    fn test_undo_redraws_remaining_shapes() {
        let mut engine = engine(ToolKind::Line);
        drag(&mut engine, (0.0, 0.0), (10.0, 0.0));
        drag(&mut engine, (0.0, 5.0), (10.0, 5.0));
        let removed = engine.undo();
        assert!(matches!(removed, Some(Shape::Line(ref l)) if l.begin == Point::new(0.0, 5.0)));
        let after = engine.surface().since_last_clear();
        assert_eq!(after.len(), 1);
        assert!(matches!(&after[0], DrawCommand::Line { begin, .. } if *begin == Point::ZERO));
    }

    #[test]
    fn test_rectangle_normalization() {
        let mut engine = engine(ToolKind::Rect);
        drag(&mut engine, (50.0, 50.0), (10.0, 10.0));
        let Some(Shape::Rectangle(rect)) = engine.history().last() else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.position, Point::new(10.0, 10.0));
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn test_rectangle_corner_radius_from_config() {
        let config = EngineConfig::default().with_tool(ToolKind::Rect).with_corner_radius(8.0);
        let mut engine = Engine::new(RecordingSurface::new(), config);
        drag(&mut engine, (0.0, 0.0), (100.0, 10.0));
        let Some(Shape::Rectangle(rect)) = engine.history().last() else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.corner_radius, 5.0);
    }

    #[test]
    fn test_ellipse_from_drag() {
        let mut engine = engine(ToolKind::Circle);
        drag(&mut engine, (0.0, 0.0), (20.0, 10.0));
        let Some(Shape::Ellipse(ellipse)) = engine.history().last() else {
            panic!("expected an ellipse");
        };
        assert_eq!(ellipse.center, Point::new(10.0, 5.0));
        assert_eq!(ellipse.radius_x, 10.0);
        assert_eq!(ellipse.radius_y, 5.0);
    }

    #[test]
    fn test_arrow_commit() {
        let mut engine = engine(ToolKind::Arrow);
        drag(&mut engine, (0.0, 0.0), (100.0, 0.0));
        let Some(Shape::Arrow(arrow)) = engine.history().last() else {
            panic!("expected an arrow");
        };
        assert_eq!(arrow.head_spread_degrees, 25.0);
        let DrawCommand::Polygon { vertices, .. } = &engine.surface().since_last_clear()[0] else {
            panic!("arrow should be filled as a polygon");
        };
        assert_eq!(vertices[0], Point::new(0.0, 0.0));
        assert_eq!(vertices[3], Point::new(100.0, 0.0));
    }

    #[test]
    fn test_move_rate_limiting() {
        let mut engine = engine(ToolKind::Line);
        engine.pointer_down(Point::ZERO);
        for t in 1..=100u64 {
            engine.pointer_move(Point::new(t as f64, t as f64), ms(t));
        }

        let previews: Vec<Point> = engine
            .surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { end, .. } => Some(*end),
                _ => None,
            })
            .collect();
        assert!((9..=11).contains(&previews.len()), "processed {}", previews.len());
        assert_eq!(previews.last(), Some(&Point::new(91.0, 91.0)));
    }

    #[test]
    fn test_curve_accumulation() {
        let mut engine = engine(ToolKind::Curve);
        engine.pointer_down(Point::new(0.0, 0.0));
        engine.pointer_move(Point::new(1.0, 1.0), ms(10));
        engine.pointer_move(Point::new(2.0, 2.0), ms(20));
        engine.pointer_move(Point::new(3.0, 3.0), ms(30));
        engine.pointer_up(Point::new(3.0, 3.0));

        let Some(Shape::Curve(curve)) = engine.history().last() else {
            panic!("expected a curve");
        };
        assert_eq!(
            curve.points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(3.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_curve_draws_incrementally() {
        let mut engine = engine(ToolKind::Curve);
        engine.pointer_down(Point::new(0.0, 0.0));
        engine.pointer_move(Point::new(4.0, 0.0), ms(10));

        let commands = engine.surface().commands();
        assert_eq!(commands.len(), 2);
        assert!(!commands.contains(&DrawCommand::Clear));
        assert!(matches!(
            &commands[0],
            DrawCommand::Polyline { points, .. } if points == &[Point::ZERO]
        ));
        assert!(matches!(
            &commands[1],
            DrawCommand::Polyline { points, .. } if points == &[Point::ZERO, Point::new(4.0, 0.0)]
        ));
    }

    #[test]
    fn test_single_click_curve_commits_a_dot() {
        let mut engine = engine(ToolKind::Curve);
        let committed = recorder(&mut engine);
        engine.pointer_down(Point::new(3.0, 3.0));
        engine.pointer_up(Point::new(3.0, 3.0));
        assert_eq!(committed.borrow().len(), 1);
        assert!(matches!(&committed.borrow()[0], Shape::Curve(c) if c.len() == 1));
    }

    #[test]
    fn test_drag_preview_replays_history_first() {
        let mut engine = engine(ToolKind::Line);
        drag(&mut engine, (0.0, 0.0), (10.0, 10.0));
        engine.surface_mut().take();

        engine.set_tool(ToolKind::Rect);
        engine.pointer_down(Point::new(20.0, 20.0));
        engine.pointer_move(Point::new(30.0, 40.0), ms(50));

        let commands = engine.surface().commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::Line { .. }));
        assert!(matches!(commands[2], DrawCommand::RoundedRect { .. }));
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_commit_listener_called_once_per_commit() {
        let mut engine = engine(ToolKind::Line);
        let committed = recorder(&mut engine);
        drag(&mut engine, (0.0, 0.0), (10.0, 0.0));
        drag(&mut engine, (0.0, 0.0), (0.0, 10.0));
        assert_eq!(committed.borrow().len(), 2);
        assert_eq!(committed.borrow().as_slice(), engine.history().as_slice());
    }

    #[test]
    fn test_zero_effect_gesture_not_committed() {
        let mut engine = engine(ToolKind::Rect);
        let committed = recorder(&mut engine);
        engine.pointer_down(Point::new(5.0, 5.0));
        engine.pointer_up(Point::new(5.0, 5.0));
        assert!(engine.history().is_empty());
        assert!(committed.borrow().is_empty());
    }

    #[test]
    fn test_triangle_never_commits() {
        let mut engine = engine(ToolKind::Triangle);
        let committed = recorder(&mut engine);
        drag(&mut engine, (0.0, 0.0), (30.0, 30.0));
        assert!(engine.history().is_empty());
        assert!(committed.borrow().is_empty());
        assert!(!engine.is_gesturing());
        assert!(engine.surface().commands().is_empty());
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut engine = engine(ToolKind::Line);
        engine.pointer_move(Point::new(5.0, 5.0), ms(10));
        engine.pointer_up(Point::new(5.0, 5.0));
        assert!(engine.surface().commands().is_empty());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_cancel_erases_preview() {
        let mut engine = engine(ToolKind::Line);
        let committed = recorder(&mut engine);
        engine.pointer_down(Point::ZERO);
        engine.pointer_move(Point::new(10.0, 10.0), ms(10));
        engine.cancel();
        assert!(!engine.is_gesturing());
        assert!(engine.surface().since_last_clear().is_empty());

        engine.pointer_up(Point::new(10.0, 10.0));
        assert!(committed.borrow().is_empty());
    }

    #[test]
    fn test_down_during_gesture_restarts() {
        let mut engine = engine(ToolKind::Line);
        engine.pointer_down(Point::ZERO);
        engine.pointer_move(Point::new(10.0, 10.0), ms(10));
        engine.pointer_down(Point::new(50.0, 50.0));
        engine.pointer_up(Point::new(60.0, 50.0));
        let Some(Shape::Line(line)) = engine.history().last() else {
            panic!("expected a line");
        };
        assert_eq!(line.begin, Point::new(50.0, 50.0));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_tool_switch_mid_gesture_keeps_gesture_tool() {
        let mut engine = engine(ToolKind::Circle);
        engine.pointer_down(Point::ZERO);
        engine.set_tool(ToolKind::Line);
        engine.pointer_up(Point::new(10.0, 10.0));
        assert!(matches!(engine.history().last(), Some(Shape::Ellipse(_))));
        assert_eq!(engine.tool(), ToolKind::Line);
    }

    #[test]
    fn test_style_applies_to_commit() {
        let mut engine = engine(ToolKind::Line);
        engine.set_color("red");
        engine.set_line_width(6.0);
        assert_eq!(engine.color(), "red");
        drag(&mut engine, (0.0, 0.0), (1.0, 1.0));
        assert_eq!(
            engine.history().last().map(|s| s.style().clone()),
            Some(ShapeStyle::new("red", 6.0))
        );
    }

    #[test]
    fn test_clear_all() {
        let mut engine = engine(ToolKind::Line);
        drag(&mut engine, (0.0, 0.0), (1.0, 1.0));
        engine.surface_mut().take();
        engine.clear_all();
        assert!(engine.history().is_empty());
        assert_eq!(engine.surface().commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_remote_shape_not_echoed_and_preview_kept() {
        let mut engine = engine(ToolKind::Line);
        let committed = recorder(&mut engine);
        engine.pointer_down(Point::ZERO);
        engine.pointer_move(Point::new(10.0, 0.0), ms(10));
        engine.surface_mut().take();

        let remote =
            Shape::Ellipse(Ellipse::new(Point::new(5.0, 5.0), 2.0, 2.0, ShapeStyle::default()));
        engine.apply_remote(remote.clone());

        assert!(committed.borrow().is_empty());
        assert_eq!(engine.history().last(), Some(&remote));
        let commands = engine.surface().commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[1], DrawCommand::Ellipse { .. }));
        assert!(matches!(commands[2], DrawCommand::Line { .. }));
        assert!(engine.is_gesturing());
    }

    #[test]
    fn test_drive_scripted_input() {
        let mut engine = engine(ToolKind::Curve);
        let mut input: ScriptedInput = [
            PointerEvent::down(0.0, 0.0, 0),
            PointerEvent::moved(1.0, 1.0, 10),
            PointerEvent::moved(1.5, 1.5, 12),
            PointerEvent::moved(2.0, 2.0, 20),
            PointerEvent::up(2.0, 2.0, 25),
        ]
        .into_iter()
        .collect();

        assert_eq!(engine.drive(&mut input), 5);
        assert!(input.is_empty());
        let Some(Shape::Curve(curve)) = engine.history().last() else {
            panic!("expected a curve");
        };
        assert_eq!(curve.points.len(), 3);
    }
}
