//! Circle shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Timestamp, generate_id};
use crate::geometry;
use crate::surface::DrawSurface;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A circle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    #[serde(skip)]
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub center: Point,
    /// Radius, never negative.
    pub radius: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Circle {
    /// Create a new circle. Negative radii are clamped to zero.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: generate_id(ShapeKind::Circle),
            center,
            radius: radius.max(0.0),
            style: ShapeStyle::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Create a circle centred on the drag start, reaching the current point.
    pub fn from_drag(center: Point, current: Point) -> Self {
        Self::new(center, geometry::distance(center, current))
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_circle(point, self.center, self.radius, tolerance)
    }

    fn trace(&self, surface: &mut dyn DrawSurface) {
        surface.begin_path();
        surface.arc(self.center, self.radius, 0.0, TAU);
        surface.stroke();
    }

    fn trace_outline(&self, surface: &mut dyn DrawSurface, padding: f64) {
        surface.begin_path();
        surface.arc(self.center, self.radius + padding, 0.0, TAU);
        surface.stroke();
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
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
    fn test_from_drag() {
        let circle = Circle::from_drag(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((circle.radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let circle = Circle::new(Point::ZERO, -3.0);
        assert!(circle.radius.abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_edge() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert!(circle.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(15.0, 0.0), 5.0));
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(50.0, 50.0), 20.0);
        assert_eq!(circle.bounds(), Rect::new(30.0, 30.0, 70.0, 70.0));
    }

    #[test]
    fn test_translate() {
        let mut circle = Circle::new(Point::new(5.0, 5.0), 2.0);
        circle.translate(Vec2::new(1.0, 2.0));
        assert_eq!(circle.anchor(), Point::new(6.0, 7.0));
    }
}
