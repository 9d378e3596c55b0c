//! Rectangle shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Timestamp, generate_id};
use crate::geometry;
use crate::surface::DrawSurface;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle outline.
///
/// `width` and `height` keep the sign of the drag that produced them; every
/// consumer normalizes through [`Rectangle::as_rect`] and absolute comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    #[serde(skip)]
    pub(crate) id: ShapeId,
    /// Corner where the drag started.
    #[serde(flatten)]
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: generate_id(ShapeKind::Rectangle),
            origin,
            width,
            height,
            style: ShapeStyle::default(),
            created_at: Timestamp::now(),
        }
    }

    /// Create a rectangle spanning from the drag start to the current point.
    pub fn from_drag(start: Point, current: Point) -> Self {
        Self::new(start, current.x - start.x, current.y - start.y)
    }

    /// Get the rectangle as a kurbo Rect (possibly un-normalized).
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn bounds(&self) -> Rect {
        self.as_rect().abs()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        geometry::point_in_rect(point, self.as_rect(), tolerance)
    }

    fn trace(&self, surface: &mut dyn DrawSurface) {
        surface.stroke_rect(self.as_rect());
    }

    fn trace_outline(&self, surface: &mut dyn DrawSurface, padding: f64) {
        surface.stroke_rect(self.bounds().inflate(padding, padding));
    }

    fn anchor(&self) -> Point {
        self.origin
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
