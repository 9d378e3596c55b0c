//! Drag-to-draw rectangle tool.

use super::{MIN_DRAG_SIZE, Tool, ToolContext, ToolKind};
use crate::input::{PointerEvent, PointerKind};
use crate::shapes::{Rectangle, Shape};
use kurbo::Point;

#[derive(Debug, Default)]
pub struct RectangleTool {
    /// Rectangle being dragged out, if any.
    draft: Option<Rectangle>,
}

impl RectangleTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn resize(draft: &mut Rectangle, current: Point) {
        draft.width = current.x - draft.origin.x;
        draft.height = current.y - draft.origin.y;
    }
}

impl Tool for RectangleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Rectangle
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) {
        match event.kind {
            PointerKind::Down => {
                let mut draft = Rectangle::from_drag(event.position, event.position);
                draft.style = ctx.style.clone();
                self.draft = Some(draft);
            }
            PointerKind::Move => {
                let Some(draft) = self.draft.as_mut() else {
                    return;
                };
                Self::resize(draft, event.position);
                ctx.redraw();
                self.draw_overlay(ctx);
            }
            PointerKind::Up => {
                let Some(mut draft) = self.draft.take() else {
                    return;
                };
                Self::resize(&mut draft, event.position);
                if draft.width.abs() > MIN_DRAG_SIZE && draft.height.abs() > MIN_DRAG_SIZE {
                    ctx.commit(Shape::Rectangle(draft));
                } else {
                    log::debug!("Discarded rectangle below minimum size");
                }
                ctx.redraw();
            }
            PointerKind::DoubleClick => {}
        }
    }

    fn is_busy(&self) -> bool {
        self.draft.is_some()
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if self.draft.take().is_some() {
            ctx.redraw();
        }
    }

    fn draw_overlay(&self, ctx: &mut ToolContext<'_>) {
        if let Some(draft) = &self.draft {
            ctx.preview(draft);
        }
    }
}
