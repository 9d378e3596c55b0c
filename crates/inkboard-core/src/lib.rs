//! Inkboard Core Library
//!
//! Platform-agnostic shape model, hit-testing, drawing tools and board
//! state for the inkboard drawing widget.

pub mod board;
pub mod config;
pub mod events;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod store;
pub mod surface;
pub mod tools;

pub use board::Board;
pub use config::{BoardConfig, ConfigError};
pub use events::{BoardEvent, EventBus};
pub use input::{InputState, PointerEvent, PointerKind};
pub use shapes::{
    BrushStroke, Circle, Polygon, Rectangle, RecordError, Shape, ShapeId, ShapeKind, ShapeRecord,
    ShapeStyle, ShapeTrait,
};
pub use store::{ImportError, ImportReport, ShapeStore};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use tools::{Tool, ToolContext, ToolKind, UnknownTool};
