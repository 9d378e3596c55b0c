//! Select and move tool.

use super::{Tool, ToolContext, ToolKind};
use crate::events::BoardEvent;
use crate::input::{PointerEvent, PointerKind};
use crate::shapes::{Shape, ShapeId};
use kurbo::Point;

/// Drag in progress on the selected shape.
#[derive(Debug, Clone)]
struct DragState {
    /// Pointer position when the drag started.
    start: Point,
    /// The shape as it was before the drag.
    original: Shape,
}

#[derive(Debug, Default)]
pub struct SelectTool {
    selected: Option<ShapeId>,
    drag: Option<DragState>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn release_selection(&mut self, ctx: &mut ToolContext<'_>) {
        self.drag = None;
        if let Some(id) = self.selected.take() {
            ctx.emit(BoardEvent::ShapeDeselected { id });
        }
    }

    fn repaint(&self, ctx: &mut ToolContext<'_>) {
        ctx.redraw();
        self.draw_overlay(ctx);
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) {
        match event.kind {
            PointerKind::Down => {
                let hit = ctx
                    .store
                    .shape_at(event.position, ctx.config.hit_tolerance)
                    .cloned();
                match hit {
                    Some(shape) => {
                        let id = shape.id().to_string();
                        if self.selected.as_deref() != Some(id.as_str()) {
                            self.release_selection(ctx);
                        }
                        self.selected = Some(id.clone());
                        self.drag = Some(DragState {
                            start: event.position,
                            original: shape,
                        });
                        ctx.emit(BoardEvent::ShapeSelected {
                            id,
                            point: event.position,
                        });
                    }
                    None => self.release_selection(ctx),
                }
                self.repaint(ctx);
            }
            PointerKind::Move => {
                let Some(drag) = &self.drag else {
                    return;
                };
                let moved = drag.original.translated(event.position - drag.start);
                if !ctx.store.replace(moved) {
                    // Removed mid-drag
                    self.drag = None;
                    self.selected = None;
                }
                self.repaint(ctx);
            }
            PointerKind::Up => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                let Some(to) = ctx.store.get(drag.original.id()).map(Shape::anchor) else {
                    return;
                };
                // A press on a shape starts a drag even if it never moves
                ctx.emit(BoardEvent::ShapeMoved {
                    id: drag.original.id().to_string(),
                    from: drag.original.anchor(),
                    to,
                });
            }
            PointerKind::DoubleClick => {}
        }
    }

    fn is_busy(&self) -> bool {
        self.drag.is_some()
    }

    /// Put a half-dragged shape back where it started.
    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(drag) = self.drag.take() {
            ctx.store.replace(drag.original);
            self.repaint(ctx);
        }
    }

    fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        self.cancel(ctx);
        if self.selected.is_some() {
            self.release_selection(ctx);
            ctx.redraw();
        }
    }

    /// Dashed outline around the selected shape.
    fn draw_overlay(&self, ctx: &mut ToolContext<'_>) {
        let Some(shape) = self.selected.as_deref().and_then(|id| ctx.store.get(id)) else {
            return;
        };
        let config = ctx.config;
        let surface = &mut *ctx.surface;
        surface.save();
        surface.set_stroke_color(&config.selection_color);
        surface.set_line_width(config.selection_line_width);
        surface.set_line_dash(&config.line_dash);
        shape.trace_outline(surface, config.selection_padding);
        surface.restore();
    }

    fn on_store_changed(&mut self, ctx: &mut ToolContext<'_>) {
        let still_there = self.selected.as_deref().is_some_and(|id| ctx.store.contains(id));
        if !still_there {
            self.release_selection(ctx);
        }
    }

    fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use crate::surface::DrawCommand;
    use crate::tools::test_support::Harness;

    fn add_rect(h: &mut Harness, x: f64, y: f64, w: f64, hgt: f64) -> ShapeId {
        let shape = Shape::Rectangle(Rectangle::new(Point::new(x, y), w, hgt));
        let id = shape.id().to_string();
        h.store.add(shape);
        id
    }

    #[test]
    fn test_drag_moves_shape() {
        let mut h = Harness::new();
        let id = add_rect(&mut h, 10.0, 10.0, 40.0, 30.0);
        let mut tool = SelectTool::new();

        h.send(&mut tool, PointerEvent::down(Point::new(30.0, 25.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(35.0, 30.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(35.0, 30.0)));

        let Some(Shape::Rectangle(rect)) = h.store.get(&id) else {
            panic!("expected rectangle");
        };
        assert_eq!(rect.origin, Point::new(15.0, 15.0));
        assert_eq!(
            h.events,
            vec![
                BoardEvent::ShapeSelected {
                    id: id.clone(),
                    point: Point::new(30.0, 25.0)
                },
                BoardEvent::ShapeMoved {
                    id: id.clone(),
                    from: Point::new(10.0, 10.0),
                    to: Point::new(15.0, 15.0),
                },
            ]
        );
        assert_eq!(tool.selection(), Some(id.as_str()));
    }

    #[test]
    fn test_drag_uses_cumulative_delta() {
        let mut h = Harness::new();
        let id = add_rect(&mut h, 0.0, 0.0, 20.0, 20.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(10.0, 10.0)));
        for step in 1..=10 {
            let p = Point::new(10.0 + f64::from(step), 10.0);
            h.send(&mut tool, PointerEvent::moved(p));
        }
        h.send(&mut tool, PointerEvent::up(Point::new(20.0, 10.0)));
        assert_eq!(h.store.get(&id).map(Shape::anchor), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_topmost_shape_wins() {
        let mut h = Harness::new();
        add_rect(&mut h, 0.0, 0.0, 100.0, 100.0);
        let top = add_rect(&mut h, 50.0, 50.0, 100.0, 100.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(75.0, 75.0)));
        assert_eq!(tool.selection(), Some(top.as_str()));
    }

    #[test]
    fn test_click_on_empty_area_deselects() {
        let mut h = Harness::new();
        let id = add_rect(&mut h, 0.0, 0.0, 20.0, 20.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(10.0, 10.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(10.0, 10.0)));
        h.events.clear();

        h.send(&mut tool, PointerEvent::down(Point::new(300.0, 300.0)));
        assert!(tool.selection().is_none());
        assert_eq!(h.events, vec![BoardEvent::ShapeDeselected { id }]);
    }

    #[test]
    fn test_click_without_move_reports_zero_move() {
        let mut h = Harness::new();
        let id = add_rect(&mut h, 10.0, 10.0, 40.0, 30.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(30.0, 25.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(30.0, 25.0)));
        assert_eq!(
            h.events.last(),
            Some(&BoardEvent::ShapeMoved {
                id,
                from: Point::new(10.0, 10.0),
                to: Point::new(10.0, 10.0),
            })
        );
    }

    #[test]
    fn test_up_on_empty_area_emits_nothing() {
        let mut h = Harness::new();
        add_rect(&mut h, 0.0, 0.0, 20.0, 20.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(300.0, 300.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(300.0, 300.0)));
        assert!(h.events.is_empty());
    }

    #[test]
    fn test_selection_outline_is_padded_and_dashed() {
        let mut h = Harness::new();
        add_rect(&mut h, 10.0, 10.0, 40.0, 30.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(30.0, 25.0)));

        let frame = h.surface.since_last_clear();
        assert!(frame.contains(&DrawCommand::StrokeColor("#007bff".to_string())));
        assert!(frame.contains(&DrawCommand::LineDash(vec![5.0, 5.0])));
        assert!(frame.contains(&DrawCommand::StrokeRect(kurbo::Rect::new(7.0, 7.0, 53.0, 43.0))));
    }

    #[test]
    fn test_cancel_restores_original_position() {
        let mut h = Harness::new();
        let id = add_rect(&mut h, 0.0, 0.0, 20.0, 20.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(10.0, 10.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(50.0, 50.0)));
        h.cancel(&mut tool);
        assert_eq!(h.store.get(&id).map(Shape::anchor), Some(Point::ZERO));
        assert!(!tool.is_busy());
    }

    #[test]
    fn test_deactivate_clears_selection() {
        let mut h = Harness::new();
        let id = add_rect(&mut h, 0.0, 0.0, 20.0, 20.0);
        let mut tool = SelectTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(10.0, 10.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(10.0, 10.0)));
        h.deactivate(&mut tool);
        assert!(tool.selection().is_none());
        assert_eq!(h.events.last(), Some(&BoardEvent::ShapeDeselected { id }));
        assert!(!h.surface.since_last_clear().contains(&DrawCommand::LineDash(vec![5.0, 5.0])));
    }
}
