//! Freehand brush stroke.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Timestamp, generate_id};
use crate::geometry;
use crate::surface::DrawSurface;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum point count for a drawable, committable stroke.
pub const MIN_BRUSH_POINTS: usize = 2;

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushStroke {
    #[serde(skip)]
    pub(crate) id: ShapeId,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Set once the pointer has been released.
    #[serde(rename = "isComplete", default)]
    pub complete: bool,
    #[serde(flatten)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl BrushStroke {
    /// Start a stroke at `first`.
    pub fn new(first: Point) -> Self {
        Self {
            id: generate_id(ShapeKind::Brush),
            points: vec![first],
            complete: false,
            style: ShapeStyle::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Create a finished stroke from existing points.
    pub fn completed(points: Vec<Point>) -> Self {
        Self {
            id: generate_id(ShapeKind::Brush),
            points,
            complete: true,
            style: ShapeStyle::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for BrushStroke {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Brush
    }

    fn bounds(&self) -> Rect {
        geometry::bounding_box(&self.points)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.points.len() < MIN_BRUSH_POINTS {
            return false;
        }
        geometry::point_to_polyline_distance(point, &self.points)
            <= self.style.line_width / 2.0 + tolerance
    }

    fn trace(&self, surface: &mut dyn DrawSurface) {
        if self.points.len() < MIN_BRUSH_POINTS {
            return;
        }
        surface.begin_path();
        surface.move_to(self.points[0]);
        for point in self.points.iter().skip(1) {
            surface.line_to(*point);
        }
        surface.stroke();
    }

    fn trace_outline(&self, surface: &mut dyn DrawSurface, padding: f64) {
        if self.points.len() < MIN_BRUSH_POINTS {
            return;
        }
        let grow = padding + self.style.line_width / 2.0;
        surface.stroke_rect(self.bounds().inflate(grow, grow));
    }

    /// The first point of the stroke.
    fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
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

    #[test]
    fn test_add_points() {
        let mut stroke = BrushStroke::new(Point::new(0.0, 0.0));
        stroke.add_point(Point::new(10.0, 10.0));
        assert_eq!(stroke.len(), 2);
        assert!(!stroke.complete);
    }

    #[test]
    fn test_hit_test_includes_half_width() {
        let mut stroke =
            BrushStroke::completed(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        stroke.style.line_width = 10.0;
        assert!(stroke.hit_test(Point::new(50.0, 5.0), 0.0));
        assert!(!stroke.hit_test(Point::new(50.0, 6.0), 0.0));
        assert!(stroke.hit_test(Point::new(50.0, 6.0), 1.0));
    }

    #[test]
    fn test_single_point_never_hit() {
        let stroke = BrushStroke::new(Point::new(0.0, 0.0));
        assert!(!stroke.hit_test(Point::new(0.0, 0.0), 5.0));
    }

    #[test]
    fn test_bounds() {
        let stroke = BrushStroke::completed(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
        ]);
        assert_eq!(stroke.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_anchor_is_first_point() {
        let mut stroke =
            BrushStroke::completed(vec![Point::new(3.0, 4.0), Point::new(10.0, 0.0)]);
        stroke.translate(Vec2::new(-3.0, -4.0));
        assert_eq!(stroke.anchor(), Point::ZERO);
    }
}
