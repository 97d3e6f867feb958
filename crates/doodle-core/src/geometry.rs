//! Arrowhead and rounded-rectangle geometry.

use kurbo::{BezPath, Point};

/// Length of each arrowhead barb, in pixels.
pub const ARROW_EDGE_LENGTH: f64 = 25.0;

/// The six vertices of a filled arrow, in drawing order:
/// `begin, waist1, barb_b, end, barb_a, waist2`.
///
/// The order is what produces the concave silhouette; a closed fill through the
/// vertices in any other order draws a different shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPolygon(pub [Point; 6]);

impl ArrowPolygon {
    pub fn vertices(&self) -> &[Point; 6] {
        &self.0
    }

    pub fn begin(&self) -> Point {
        self.0[0]
    }

    pub fn tip(&self) -> Point {
        self.0[3]
    }

    /// Barb at `angle + spread`.
    pub fn barb_a(&self) -> Point {
        self.0[4]
    }

    /// Barb at `angle - spread`.
    pub fn barb_b(&self) -> Point {
        self.0[2]
    }

    /// Flattened `[x0, y0, x1, y1, ...]` coordinates.
    pub fn to_coords(&self) -> [f64; 12] {
        let mut coords = [0.0; 12];
        for (i, p) in self.0.iter().enumerate() {
            coords[i * 2] = p.x;
            coords[i * 2 + 1] = p.y;
        }
        coords
    }
}

/// Compute the filled outline of an arrow from `begin` to `end`.
///
/// `head_spread_degrees` is the angle between the shaft and each barb. A zero-length
/// arrow (`begin == end`) takes `atan2(0, 0) = 0` as its direction and collapses
/// into a small head pointing along +x.
pub fn arrow_polygon(begin: Point, end: Point, head_spread_degrees: f64) -> ArrowPolygon {
    let angle = (end.y - begin.y).atan2(end.x - begin.x).to_degrees();

    let barb = |degrees: f64| {
        let radians = degrees.to_radians();
        Point::new(
            end.x - ARROW_EDGE_LENGTH * radians.cos(),
            end.y - ARROW_EDGE_LENGTH * radians.sin(),
        )
    };
    let barb_a = barb(angle + head_spread_degrees);
    let barb_b = barb(angle - head_spread_degrees);

    let mid = barb_a.midpoint(barb_b);
    let waist1 = barb_b.midpoint(mid);
    let waist2 = barb_a.midpoint(mid);

    ArrowPolygon([begin, waist1, barb_b, end, barb_a, waist2])
}

/// Build the outline of a rectangle with quadratic corners.
///
/// Straight edges have length `width - 2r` and `height - 2r`. The radius is not
/// clamped here; a radius above half the smaller side yields a self-intersecting path.
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, corner_radius: f64) -> BezPath {
    let r = corner_radius;
    let mut path = BezPath::new();
    path.move_to((x, y + r));
    path.line_to((x, y + height - r));
    path.quad_to((x, y + height), (x + r, y + height));
    path.line_to((x + width - r, y + height));
    path.quad_to((x + width, y + height), (x + width, y + height - r));
    path.line_to((x + width, y + r));
    path.quad_to((x + width, y), (x + width - r, y));
    path.line_to((x + r, y));
    path.quad_to((x, y), (x, y + r));
    path.close_path();
    path
}

/// Closed path through `vertices`; empty when there are none.
pub fn polygon_path(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = vertices.split_first() else {
        return path;
    };
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    path
}
