//! Drag-from-center circle tool.

use super::{MIN_DRAG_SIZE, Tool, ToolContext, ToolKind};
use crate::geometry;
use crate::input::{PointerEvent, PointerKind};
use crate::shapes::{Circle, Shape};

#[derive(Debug, Default)]
pub struct CircleTool {
    draft: Option<Circle>,
}

impl CircleTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for CircleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Circle
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) {
        match event.kind {
            PointerKind::Down => {
                let mut draft = Circle::from_drag(event.position, event.position);
                draft.style = ctx.style.clone();
                self.draft = Some(draft);
            }
            PointerKind::Move => {
                let Some(draft) = self.draft.as_mut() else {
                    return;
                };
                draft.radius = geometry::distance(draft.center, event.position);
                ctx.redraw();
                self.draw_overlay(ctx);
            }
            PointerKind::Up => {
                let Some(mut draft) = self.draft.take() else {
                    return;
                };
                draft.radius = geometry::distance(draft.center, event.position);
                if draft.radius > MIN_DRAG_SIZE {
                    ctx.commit(Shape::Circle(draft));
                } else {
                    log::debug!("Discarded circle below minimum radius");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BoardEvent;
    use crate::surface::DrawCommand;
    use crate::tools::test_support::Harness;
    use kurbo::Point;
    use std::f64::consts::TAU;

    #[test]
    fn test_drag_commits_circle() {
        let mut h = Harness::new();
        let mut tool = CircleTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(100.0, 100.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(103.0, 104.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(103.0, 104.0)));

        let Some(Shape::Circle(circle)) = h.store.list().next() else {
            panic!("expected circle");
        };
        assert_eq!(circle.center, Point::new(100.0, 100.0));
        assert!((circle.radius - 5.0).abs() < 1e-9);
        assert!(matches!(h.events.as_slice(), [BoardEvent::ShapeAdded { .. }]));
    }

    #[test]
    fn test_small_radius_is_discarded() {
        let mut h = Harness::new();
        let mut tool = CircleTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(100.0, 100.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(101.0, 101.0)));
        assert!(h.store.is_empty());
        assert!(!tool.is_busy());
    }

    #[test]
    fn test_guard_is_strict_at_two_pixels() {
        let mut h = Harness::new();
        let mut tool = CircleTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(100.0, 100.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(102.0, 100.0)));
        assert!(h.store.is_empty());

        h.send(&mut tool, PointerEvent::down(Point::new(0.0, 0.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(0.0, 2.01)));
        assert_eq!(h.store.len(), 1);
    }

    #[test]
    fn test_preview_arc() {
        let mut h = Harness::new();
        let mut tool = CircleTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(10.0, 10.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(10.0, 30.0)));
        assert!(h.surface.since_last_clear().contains(&DrawCommand::Arc {
            center: Point::new(10.0, 10.0),
            radius: 20.0,
            start_angle: 0.0,
            end_angle: TAU,
        }));
    }
}
