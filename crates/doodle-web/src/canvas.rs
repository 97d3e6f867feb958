//! Canvas2D render surface.

use crate::path::{PathSink, trace};
use doodle_core::{Point, Surface, polygon_path, rounded_rect_path};
use kurbo::Rect;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Fill used for ellipses so only the outline shows.
const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Paints engine output onto an HTML `<canvas>`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| JsError::new("failed to query canvas context"))?
            .ok_or_else(|| JsError::new("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsError::new("2d context has an unexpected type"))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_stroke(&self, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
    }
}

impl Surface for CanvasSurface {
    fn clear_all(&mut self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_polyline(&mut self, points: &[Point], line_width: f64, color: &str) {
        self.set_stroke(color, line_width);
        for (i, p) in points.iter().enumerate() {
            self.ctx.begin_path();
            match i.checked_sub(1).map(|prev| points[prev]) {
                Some(prev) => self.ctx.move_to(prev.x, prev.y),
                None => self.ctx.move_to(p.x - 1.0, p.y),
            }
            self.ctx.line_to(p.x, p.y);
            self.ctx.stroke();
        }
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f64, color: &str, line_width: f64) {
        let path = rounded_rect_path(rect.x0, rect.y0, rect.width(), rect.height(), radius);
        self.set_stroke(color, line_width);
        self.ctx.begin_path();
        trace(&mut self.ctx, &path);
        self.ctx.stroke();
    }

    fn fill_and_stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        line_width: f64,
        color: &str,
    ) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(center.x, center.y, radius_x, radius_y, 0.0, 0.0, TAU);
        self.ctx.set_fill_style_str(TRANSPARENT);
        self.set_stroke(color, line_width);
        self.ctx.fill();
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, begin: Point, end: Point, color: &str, line_width: f64) {
        self.set_stroke(color, line_width);
        self.ctx.begin_path();
        self.ctx.move_to(begin.x, begin.y);
        self.ctx.line_to(end.x, end.y);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, vertices: &[Point], color: &str) {
        if vertices.is_empty() {
            return;
        }
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        trace(&mut self.ctx, &polygon_path(vertices));
        self.ctx.fill();
    }
}

impl PathSink for CanvasRenderingContext2d {
    fn move_to(&mut self, p: Point) {
        CanvasRenderingContext2d::move_to(self, p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        CanvasRenderingContext2d::line_to(self, p.x, p.y);
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        self.quadratic_curve_to(ctrl.x, ctrl.y, p.x, p.y);
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
        self.bezier_curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, p.x, p.y);
    }

    fn close(&mut self) {
        self.close_path();
    }
}
