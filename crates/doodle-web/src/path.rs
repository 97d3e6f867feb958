//! Replay of kurbo paths onto immediate-mode path builders.

use kurbo::{BezPath, PathEl, Point};

/// A path builder that takes one segment per call, like a Canvas2D context.
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, p: Point);
    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point);
    fn close(&mut self);
}

/// Feed every element of `path` to `sink`, in order.
pub fn trace<P: PathSink + ?Sized>(sink: &mut P, path: &BezPath) {
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => sink.move_to(p),
            PathEl::LineTo(p) => sink.line_to(p),
            PathEl::QuadTo(c, p) => sink.quad_to(c, p),
            PathEl::CurveTo(c1, c2, p) => sink.curve_to(c1, c2, p),
            PathEl::ClosePath => sink.close(),
        }
    }
}
