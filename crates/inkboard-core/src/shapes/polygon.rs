//! Polygon shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Timestamp, generate_id};
use crate::geometry;
use crate::surface::DrawSurface;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum vertex count for a drawable, committable polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A closed polygon outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    #[serde(skip)]
    pub(crate) id: ShapeId,
    #[serde(rename = "points")]
    pub vertices: Vec<Point>,
    /// Set once the polygon has been finished.
    #[serde(rename = "isComplete", default)]
    pub closed: bool,
    #[serde(flatten)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Polygon {
    /// Start an open polygon from its first vertex.
    pub fn new(first: Point) -> Self {
        Self {
            id: generate_id(ShapeKind::Polygon),
            vertices: vec![first],
            closed: false,
            style: ShapeStyle::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Create an already finished polygon.
    pub fn closed(vertices: Vec<Point>) -> Self {
        Self {
            id: generate_id(ShapeKind::Polygon),
            vertices,
            closed: true,
            style: ShapeStyle::default(),
            created_at: Timestamp::now(),
        }
    }

    pub fn push(&mut self, vertex: Point) {
        self.vertices.push(vertex);
    }

    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn centroid(&self) -> Point {
        geometry::polygon_centroid(&self.vertices)
    }

    fn trace_closed(&self, surface: &mut dyn DrawSurface) {
        let Some((first, rest)) = self.vertices.split_first() else {
            return;
        };
        surface.begin_path();
        surface.move_to(*first);
        for vertex in rest {
            surface.line_to(*vertex);
        }
        surface.close_path();
        surface.stroke();
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn bounds(&self) -> Rect {
        geometry::bounding_box(&self.vertices)
    }

    /// Inside the polygon, or within `tolerance` of its closed outline.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.vertices.len() < MIN_POLYGON_VERTICES {
            return false;
        }
        if geometry::point_in_polygon(point, &self.vertices) {
            return true;
        }
        let first = self.vertices[0];
        let last = self.vertices[self.vertices.len() - 1];
        geometry::point_to_polyline_distance(point, &self.vertices) <= tolerance
            || geometry::point_to_segment_distance(point, last, first) <= tolerance
    }

    fn trace(&self, surface: &mut dyn DrawSurface) {
        if self.vertices.len() >= MIN_POLYGON_VERTICES {
            self.trace_closed(surface);
        }
    }

    fn trace_outline(&self, surface: &mut dyn DrawSurface, _padding: f64) {
        if self.vertices.len() >= MIN_POLYGON_VERTICES {
            self.trace_closed(surface);
        }
    }

    fn anchor(&self) -> Point {
        self.centroid()
    }

    fn translate(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn triangle() -> Polygon {
        Polygon::closed(vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(0.0, 30.0),
        ])
    }

    #[test]
    fn test_centroid_is_hit() {
        let poly = triangle();
        assert!(poly.hit_test(poly.centroid(), 0.0));
    }

    #[test]
    fn test_outline_tolerance() {
        let poly = triangle();
        // Just outside the hypotenuse
        let probe = Point::new(17.0, 17.0);
        assert!(!poly.hit_test(probe, 0.0));
        assert!(poly.hit_test(probe, 3.0));
    }

    #[test]
    fn test_too_few_vertices_never_hit() {
        let mut poly = Polygon::new(Point::new(0.0, 0.0));
        poly.push(Point::new(10.0, 0.0));
        assert!(!poly.hit_test(Point::new(5.0, 0.0), 10.0));

        let mut surface = RecordingSurface::new();
        poly.trace(&mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_trace_closes_path() {
        let mut surface = RecordingSurface::new();
        triangle().trace(&mut surface);
        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::BeginPath);
        assert_eq!(commands[1], DrawCommand::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(commands[4], DrawCommand::ClosePath);
        assert_eq!(commands[5], DrawCommand::Stroke);
    }

    #[test]
    fn test_translate_moves_all_vertices() {
        let mut poly = triangle();
        poly.translate(Vec2::new(5.0, 5.0));
        assert_eq!(poly.vertices[1], Point::new(35.0, 5.0));
        assert_eq!(poly.anchor(), Point::new(15.0, 15.0));
    }
}
