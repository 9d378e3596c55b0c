//! Tool system for the drawing board.
//!
//! Each tool is a small state machine driven by [`PointerEvent`]s. At most
//! one tool is bound to a board at a time; it reaches the store, the style
//! and the surface only through the [`ToolContext`] handed to each call.

mod brush;
mod circle;
mod polygon;
mod rectangle;
mod select;

pub use brush::BrushTool;
pub use circle::CircleTool;
pub use polygon::PolygonTool;
pub use rectangle::RectangleTool;
pub use select::SelectTool;

use crate::config::BoardConfig;
use crate::events::BoardEvent;
use crate::input::PointerEvent;
use crate::shapes::{Shape, ShapeStyle, ShapeTrait};
use crate::store::ShapeStore;
use crate::surface::DrawSurface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum extent, in pixels, for a dragged rectangle or circle to be kept.
pub const MIN_DRAG_SIZE: f64 = 2.0;

/// A tool name that does not match any [`ToolKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Select,
    Brush,
    Rectangle,
    Circle,
    Polygon,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Select,
        ToolKind::Brush,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Polygon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Brush => "brush",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Polygon => "polygon",
        }
    }

    /// Create a fresh, idle instance of this tool.
    pub fn create(self) -> Box<dyn Tool> {
        match self {
            ToolKind::Select => Box::new(SelectTool::new()),
            ToolKind::Brush => Box::new(BrushTool::new()),
            ToolKind::Rectangle => Box::new(RectangleTool::new()),
            ToolKind::Circle => Box::new(CircleTool::new()),
            ToolKind::Polygon => Box::new(PolygonTool::new()),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// Everything a tool may touch while handling an event.
pub struct ToolContext<'a> {
    pub store: &'a mut ShapeStore,
    /// Style stamped onto shapes created by this gesture.
    pub style: &'a ShapeStyle,
    pub config: &'a BoardConfig,
    pub surface: &'a mut dyn DrawSurface,
    events: &'a mut Vec<BoardEvent>,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        store: &'a mut ShapeStore,
        style: &'a ShapeStyle,
        config: &'a BoardConfig,
        surface: &'a mut dyn DrawSurface,
        events: &'a mut Vec<BoardEvent>,
    ) -> Self {
        Self {
            store,
            style,
            config,
            surface,
            events,
        }
    }

    /// Queue a notification for the board's subscribers.
    pub fn emit(&mut self, event: BoardEvent) {
        self.events.push(event);
    }

    /// Clear the canvas and repaint every committed shape in order.
    pub fn redraw(&mut self) {
        self.surface.clear_rect(self.config.canvas_rect());
        for shape in self.store.list() {
            shape.draw(&mut *self.surface);
        }
    }

    /// Store a finished shape and announce it.
    pub fn commit(&mut self, shape: Shape) {
        let id = shape.id().to_string();
        log::debug!("Committed {} {}", shape.kind(), id);
        self.store.add(shape);
        self.emit(BoardEvent::ShapeAdded { id });
    }

    /// Draw an uncommitted shape in its style with the preview dash.
    pub fn preview(&mut self, shape: &dyn ShapeTrait) {
        self.surface.save();
        shape.style().apply(&mut *self.surface);
        self.surface.set_line_dash(&self.config.line_dash);
        shape.trace(&mut *self.surface);
        self.surface.restore();
    }
}

/// Behavior shared by all tools.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Advance the tool's state machine.
    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>);

    /// Whether a gesture is in flight.
    fn is_busy(&self) -> bool;

    /// Abandon any in-flight gesture without committing a partial shape.
    fn cancel(&mut self, ctx: &mut ToolContext<'_>);

    /// Called right before the tool is unbound.
    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        self.cancel(ctx);
    }

    /// Paint whatever the tool shows on top of the committed shapes.
    fn draw_overlay(&self, _ctx: &mut ToolContext<'_>) {}

    /// The store changed behind the tool's back (remove, clear, import).
    fn on_store_changed(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Currently selected shape, for tools that select.
    fn selection(&self) -> Option<&str> {
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_parse() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>(), Ok(kind));
            assert_eq!(kind.create().kind(), kind);
        }
        assert_eq!(
            "eraser".parse::<ToolKind>(),
            Err(UnknownTool("eraser".to_string()))
        );
    }

    #[test]
    fn test_fresh_tools_are_idle() {
        for kind in ToolKind::ALL {
            let tool = kind.create();
            assert!(!tool.is_busy());
            assert!(tool.selection().is_none());
        }
    }
}
