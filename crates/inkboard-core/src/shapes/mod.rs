//! Shape definitions for the drawing board.

mod brush;
mod circle;
mod polygon;
mod rectangle;

pub use brush::{BrushStroke, MIN_BRUSH_POINTS};
pub use circle::Circle;
pub use polygon::{MIN_POLYGON_VERTICES, Polygon};
pub use rectangle::Rectangle;

use crate::surface::DrawSurface;
use kurbo::{Point, Rect, Vec2};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Default hit-test slack in pixels.
pub const DEFAULT_TOLERANCE: f64 = 5.0;

/// Unique identifier for shapes.
pub type ShapeId = String;

/// Generate a fresh shape id, prefixed with the kind name.
pub fn generate_id(kind: ShapeKind) -> ShapeId {
    format!("{}_{}", kind.as_str(), Uuid::new_v4().simple())
}

/// Errors raised while turning a record back into a shape.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Unknown shape kind: {0}")]
    UnknownKind(String),
    #[error("Invalid {kind} data: {source}")]
    InvalidData {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("Line width must be positive, got {0}")]
    InvalidStyle(f64),
    #[error("Circle radius must not be negative, got {0}")]
    InvalidRadius(f64),
}

/// The drawable shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Polygon,
    Brush,
}

impl ShapeKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Brush => "brush",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            "polygon" => Ok(ShapeKind::Polygon),
            "brush" => Ok(ShapeKind::Brush),
            other => Err(RecordError::UnknownKind(other.to_string())),
        }
    }
}

/// Stroke style carried by every shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// CSS color string.
    pub color: String,
    /// Stroke width in pixels, always positive.
    pub line_width: f64,
}

impl ShapeStyle {
    pub fn new(color: impl Into<String>, line_width: f64) -> Self {
        Self {
            color: color.into(),
            line_width,
        }
    }

    /// Push this style onto the surface's stroke state.
    pub fn apply(&self, surface: &mut dyn DrawSurface) {
        surface.set_stroke_color(&self.color);
        surface.set_line_width(self.line_width);
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            line_width: 2.0,
        }
    }
}

/// Creation time of a shape. Informational only.
///
/// Written as milliseconds since the Unix epoch; any string found in an
/// imported record is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(u64),
    Text(String),
}

impl Timestamp {
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp::Millis(millis)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Millis(0)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &str;

    fn kind(&self) -> ShapeKind;

    /// Normalized axis-aligned bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape, with `tolerance` pixels of slack.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Issue the path and stroke calls for this shape's geometry using
    /// whatever stroke state the surface currently holds.
    fn trace(&self, surface: &mut dyn DrawSurface);

    /// Issue the selection outline, grown by `padding` where the kind allows.
    fn trace_outline(&self, surface: &mut dyn DrawSurface, padding: f64);

    /// Reference position reported when the shape is moved.
    fn anchor(&self) -> Point;

    /// Move every coordinate-bearing field by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Draw with the shape's own style. Never mutates the shape.
    fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.save();
        self.style().apply(surface);
        self.trace(surface);
        surface.restore();
    }
}

/// Plain key-value form of a shape, the unit of export and import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
    Brush(BrushStroke),
}

impl Shape {
    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Polygon(s) => s,
            Shape::Brush(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Polygon(s) => s,
            Shape::Brush(s) => s,
        }
    }

    pub fn id(&self) -> &str {
        self.inner().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    pub fn bounds(&self) -> Rect {
        self.inner().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.inner().hit_test(point, tolerance)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.inner().draw(surface);
    }

    pub fn trace(&self, surface: &mut dyn DrawSurface) {
        self.inner().trace(surface);
    }

    pub fn trace_outline(&self, surface: &mut dyn DrawSurface, padding: f64) {
        self.inner().trace_outline(surface, padding);
    }

    pub fn anchor(&self) -> Point {
        self.inner().anchor()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.inner().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.inner_mut().style_mut()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.inner_mut().translate(delta);
    }

    /// A copy of this shape moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Shape {
        let mut moved = self.clone();
        moved.translate(delta);
        moved
    }

    fn set_id(&mut self, id: ShapeId) {
        match self {
            Shape::Rectangle(s) => s.id = id,
            Shape::Circle(s) => s.id = id,
            Shape::Polygon(s) => s.id = id,
            Shape::Brush(s) => s.id = id,
        }
    }

    /// Structural form of this shape.
    pub fn to_record(&self) -> ShapeRecord {
        let data = match self {
            Shape::Rectangle(s) => serde_json::to_value(s),
            Shape::Circle(s) => serde_json::to_value(s),
            Shape::Polygon(s) => serde_json::to_value(s),
            Shape::Brush(s) => serde_json::to_value(s),
        };
        let data = match data {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        ShapeRecord {
            id: self.id().to_string(),
            kind: self.kind().as_str().to_string(),
            data,
        }
    }

    /// Rebuild a shape from its record, keeping the record's id.
    pub fn from_record(record: &ShapeRecord) -> Result<Shape, RecordError> {
        let kind: ShapeKind = record.kind.parse()?;
        let data = Value::Object(record.data.clone());
        let mut shape = match kind {
            ShapeKind::Rectangle => Shape::Rectangle(decode(kind, data)?),
            ShapeKind::Circle => Shape::Circle(decode(kind, data)?),
            ShapeKind::Polygon => Shape::Polygon(decode(kind, data)?),
            ShapeKind::Brush => Shape::Brush(decode(kind, data)?),
        };
        let width = shape.style().line_width;
        if width.is_nan() || width <= 0.0 {
            return Err(RecordError::InvalidStyle(width));
        }
        if let Shape::Circle(circle) = &shape {
            if !(circle.radius >= 0.0) {
                return Err(RecordError::InvalidRadius(circle.radius));
            }
        }
        shape.set_id(record.id.clone());
        Ok(shape)
    }
}

fn decode<T: DeserializeOwned>(kind: ShapeKind, data: Value) -> Result<T, RecordError> {
    serde_json::from_value(data).map_err(|source| RecordError::InvalidData { kind, source })
}
