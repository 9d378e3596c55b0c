//! Geometric predicates used for hit-testing and selection.
//!
//! Everything here is pure and total: degenerate inputs produce well-defined
//! outputs instead of errors.

use kurbo::{Point, Rect, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Distance from `point` to the segment `a`-`b`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to the nearest endpoint. A zero-length segment measures to `a`.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    distance(point, a + seg * t)
}

/// Minimum distance from a point to a polyline.
///
/// Returns infinity for fewer than two points.
pub fn point_to_polyline_distance(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_distance(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd point-in-polygon test with a horizontal ray cast towards `+x`.
///
/// Points lying exactly on an edge or vertex are not guaranteed to be
/// classified either way; that is the usual ray-casting ambiguity.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (pi, pj) = (vertices[i], vertices[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inclusive point-in-rectangle test, grown by `tolerance` on every side.
///
/// `rect` may be un-normalized (`x1 < x0` or `y1 < y0`), which is how a
/// rectangle dragged up or left is represented.
pub fn point_in_rect(point: Point, rect: Rect, tolerance: f64) -> bool {
    let (min_x, max_x) = (rect.x0.min(rect.x1), rect.x0.max(rect.x1));
    let (min_y, max_y) = (rect.y0.min(rect.y1), rect.y0.max(rect.y1));
    point.x >= min_x - tolerance
        && point.x <= max_x + tolerance
        && point.y >= min_y - tolerance
        && point.y <= max_y + tolerance
}

/// `distance(point, center) <= radius + tolerance`.
pub fn point_in_circle(point: Point, center: Point, radius: f64, tolerance: f64) -> bool {
    distance(point, center) <= radius + tolerance
}

/// Axis-aligned bounding box of a point set. Empty input yields `Rect::ZERO`.
pub fn bounding_box(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| {
            Rect::new(
                acc.x0.min(p.x),
                acc.y0.min(p.y),
                acc.x1.max(p.x),
                acc.y1.max(p.y),
            )
        })
}

/// Vertex average of a polygon. Empty input yields the origin.
pub fn polygon_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / points.len() as f64).to_point()
}
