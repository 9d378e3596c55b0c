//! Click-to-place polygon tool, finished with a double-click.

use super::{Tool, ToolContext, ToolKind};
use crate::geometry;
use crate::input::{PointerEvent, PointerKind};
use crate::shapes::{MIN_POLYGON_VERTICES, Polygon, Shape};
use kurbo::Point;

/// A click closer than this to the last vertex does not add a vertex.
const VERTEX_MERGE_DISTANCE: f64 = 1.0;

#[derive(Debug, Default)]
pub struct PolygonTool {
    draft: Option<Polygon>,
    /// Last pointer position, for the rubber-band edge.
    cursor: Option<Point>,
}

impl PolygonTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.draft.as_ref().map_or(0, Polygon::len)
    }

    fn finish(&mut self, ctx: &mut ToolContext<'_>) {
        let Some(mut draft) = self.draft.take() else {
            return;
        };
        self.cursor = None;
        draft.closed = true;
        if draft.len() >= MIN_POLYGON_VERTICES {
            ctx.commit(Shape::Polygon(draft));
        } else {
            log::debug!("Discarded polygon with {} vertices", draft.len());
        }
        ctx.redraw();
    }
}

impl Tool for PolygonTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Polygon
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) {
        match event.kind {
            PointerKind::Down => {
                match self.draft.as_mut() {
                    None => {
                        let mut draft = Polygon::new(event.position);
                        draft.style = ctx.style.clone();
                        self.draft = Some(draft);
                    }
                    Some(draft) => {
                        let far_enough = draft.last().is_none_or(|last| {
                            geometry::distance(last, event.position) > VERTEX_MERGE_DISTANCE
                        });
                        if far_enough {
                            draft.push(event.position);
                        }
                    }
                }
                self.cursor = Some(event.position);
                ctx.redraw();
                self.draw_overlay(ctx);
            }
            PointerKind::Move => {
                if self.draft.is_none() {
                    return;
                }
                self.cursor = Some(event.position);
                ctx.redraw();
                self.draw_overlay(ctx);
            }
            PointerKind::Up => {}
            PointerKind::DoubleClick => {
                if self.vertex_count() >= 2 {
                    self.finish(ctx);
                }
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.draft.is_some()
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        self.cursor = None;
        if self.draft.take().is_some() {
            ctx.redraw();
        }
    }

    /// Placed edges, the rubber band to the cursor and the closing edge.
    fn draw_overlay(&self, ctx: &mut ToolContext<'_>) {
        let Some(draft) = &self.draft else {
            return;
        };
        let Some((first, rest)) = draft.vertices.split_first() else {
            return;
        };
        let surface = &mut *ctx.surface;
        surface.save();
        draft.style.apply(surface);
        surface.set_line_dash(&ctx.config.line_dash);
        surface.begin_path();
        surface.move_to(*first);
        for vertex in rest {
            surface.line_to(*vertex);
        }
        if let Some(cursor) = self.cursor {
            surface.line_to(cursor);
        }
        surface.line_to(*first);
        surface.stroke();
        surface.restore();
    }
}
