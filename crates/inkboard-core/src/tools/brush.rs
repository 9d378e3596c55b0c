//! Freehand brush tool.
//!
//! Strokes are painted incrementally: each move adds one solid segment on
//! top of whatever is already on the canvas, without a full redraw.

use super::{Tool, ToolContext, ToolKind};
use crate::input::{PointerEvent, PointerKind};
use crate::shapes::{BrushStroke, MIN_BRUSH_POINTS, Shape, ShapeTrait};
use kurbo::Point;

#[derive(Debug, Default)]
pub struct BrushTool {
    stroke: Option<BrushStroke>,
}

impl BrushTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn paint_segment(stroke: &BrushStroke, from: Point, to: Point, ctx: &mut ToolContext<'_>) {
        let surface = &mut *ctx.surface;
        surface.save();
        stroke.style.apply(surface);
        surface.begin_path();
        surface.move_to(from);
        surface.line_to(to);
        surface.stroke();
        surface.restore();
    }
}

impl Tool for BrushTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Brush
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) {
        match event.kind {
            PointerKind::Down => {
                let mut stroke = BrushStroke::new(event.position);
                stroke.style = ctx.style.clone();
                self.stroke = Some(stroke);
            }
            PointerKind::Move => {
                let Some(stroke) = self.stroke.as_mut() else {
                    return;
                };
                let Some(previous) = stroke.points.last().copied() else {
                    return;
                };
                stroke.add_point(event.position);
                Self::paint_segment(stroke, previous, event.position, ctx);
            }
            PointerKind::Up => {
                let Some(mut stroke) = self.stroke.take() else {
                    return;
                };
                stroke.complete = true;
                if stroke.len() >= MIN_BRUSH_POINTS {
                    ctx.commit(Shape::Brush(stroke));
                } else {
                    log::debug!("Discarded brush stroke with a single point");
                }
                ctx.redraw();
            }
            PointerKind::DoubleClick => {}
        }
    }

    fn is_busy(&self) -> bool {
        self.stroke.is_some()
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if self.stroke.take().is_some() {
            ctx.redraw();
        }
    }

    fn draw_overlay(&self, ctx: &mut ToolContext<'_>) {
        if let Some(stroke) = &self.stroke {
            stroke.draw(&mut *ctx.surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::BoardEvent;
    use crate::surface::DrawCommand;
    use crate::tools::test_support::Harness;

    #[test]
    fn test_stroke_commits_on_release() {
        let mut h = Harness::new();
        let mut tool = BrushTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(0.0, 0.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(5.0, 5.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(10.0, 5.0)));
        assert!(h.store.is_empty());
        h.send(&mut tool, PointerEvent::up(Point::new(10.0, 5.0)));

        let Some(Shape::Brush(stroke)) = h.store.list().next() else {
            panic!("expected brush stroke");
        };
        assert_eq!(
            stroke.points,
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 5.0)]
        );
        assert!(stroke.complete);
        assert!(matches!(h.events.as_slice(), [BoardEvent::ShapeAdded { .. }]));
    }

    #[test]
    fn test_click_without_move_is_discarded() {
        let mut h = Harness::new();
        let mut tool = BrushTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(0.0, 0.0)));
        h.send(&mut tool, PointerEvent::up(Point::new(0.0, 0.0)));
        assert!(h.store.is_empty());
        assert!(h.events.is_empty());
    }

    #[test]
    fn test_moves_paint_single_segments() {
        let mut h = Harness::new();
        let mut tool = BrushTool::new();
        h.send(&mut tool, PointerEvent::down(Point::new(0.0, 0.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(5.0, 0.0)));
        h.send(&mut tool, PointerEvent::moved(Point::new(9.0, 0.0)));

        let commands = h.surface.commands();
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::ClearRect(_))));
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::LineDash(_))));
        let tail = &commands[commands.len() - 4..];
        assert_eq!(
            tail,
            &[
                DrawCommand::MoveTo(Point::new(5.0, 0.0)),
                DrawCommand::LineTo(Point::new(9.0, 0.0)),
                DrawCommand::Stroke,
                DrawCommand::Restore,
            ]
        );
    }
}
