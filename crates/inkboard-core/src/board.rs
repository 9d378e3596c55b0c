//! The drawing board: shapes, the active tool, style and subscribers behind
//! one handle.

use crate::config::BoardConfig;
use crate::events::{BoardEvent, EventBus};
use crate::input::PointerEvent;
use crate::shapes::{Shape, ShapeRecord, ShapeStyle};
use crate::store::{ImportError, ImportReport, ShapeStore};
use crate::surface::DrawSurface;
use crate::tools::{Tool, ToolContext, ToolKind};
use std::sync::mpsc::Receiver;

/// A drawing board rendering onto `S`.
pub struct Board<S: DrawSurface> {
    config: BoardConfig,
    /// Style stamped onto newly drawn shapes.
    style: ShapeStyle,
    store: ShapeStore,
    surface: S,
    tool: Option<Box<dyn Tool>>,
    bus: EventBus,
}

impl<S: DrawSurface> Board<S> {
    /// Create a board and paint its (empty) canvas. The config's initial
    /// tool, if any, is bound straight away.
    pub fn new(config: BoardConfig, surface: S) -> Self {
        let mut board = Self {
            style: config.default_style(),
            config,
            store: ShapeStore::new(),
            surface,
            tool: None,
            bus: EventBus::new(),
        };
        if let Some(kind) = board.config.initial_tool {
            board.activate(kind);
        }
        board.redraw();
        board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Receive every event published from now on.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        self.bus.subscribe()
    }

    // --- Style ---

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Color for shapes drawn from now on.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.style.color = color.into();
    }

    /// Line width for shapes drawn from now on. Non-positive widths are
    /// rejected and leave the style unchanged.
    pub fn set_line_width(&mut self, width: f64) -> bool {
        if !(width > 0.0) {
            log::warn!("Ignoring non-positive line width {width}");
            return false;
        }
        self.style.line_width = width;
        true
    }

    // --- Canvas ---

    /// Resize the canvas and repaint. Non-positive sizes are rejected.
    pub fn set_size(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring canvas size {width}x{height}");
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        log::debug!("Canvas resized to {width}x{height}");
        self.redraw();
        true
    }

    /// Background color of the canvas and of exported documents.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.config.background_color = color.into();
        self.redraw();
    }

    // --- Tools ---

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tool.as_ref().map(|tool| tool.kind())
    }

    /// Id of the shape the select tool currently holds.
    pub fn selection(&self) -> Option<&str> {
        self.tool.as_ref().and_then(|tool| tool.selection())
    }

    /// Whether the active tool is in the middle of a gesture.
    pub fn is_gesture_active(&self) -> bool {
        self.tool.as_ref().is_some_and(|tool| tool.is_busy())
    }

    /// Bind a fresh instance of `kind`, deactivating the current tool first.
    /// Re-activating the same kind restarts it from idle.
    pub fn activate(&mut self, kind: ToolKind) {
        self.unbind_tool();
        self.tool = Some(kind.create());
        log::debug!("Activated {kind} tool");
        self.bus.publish(BoardEvent::ToolChanged { tool: Some(kind) });
    }

    /// Bind a tool by name. Unknown names are logged and ignored.
    pub fn activate_by_name(&mut self, name: &str) -> bool {
        match name.parse::<ToolKind>() {
            Ok(kind) => {
                self.activate(kind);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Unbind the current tool. Pointer events are ignored until another
    /// tool is activated.
    pub fn deactivate(&mut self) {
        if self.unbind_tool() {
            self.bus.publish(BoardEvent::ToolChanged { tool: None });
        }
    }

    /// Route a canvas-local pointer event to the active tool.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.with_tool(|tool, ctx| tool.on_pointer(event, ctx));
    }

    // --- Shapes ---

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.store.get(id)
    }

    /// Shapes in drawing order.
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.store.list()
    }

    /// Add a finished shape as if a tool had drawn it.
    pub fn commit(&mut self, shape: Shape) {
        let id = shape.id().to_string();
        self.store.add(shape);
        self.bus.publish(BoardEvent::ShapeAdded { id });
        self.redraw();
    }

    /// Remove a shape. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.store.remove(id).is_none() {
            return false;
        }
        self.bus.publish(BoardEvent::ShapeRemoved { id: id.to_string() });
        self.with_tool(|tool, ctx| tool.on_store_changed(ctx));
        self.redraw();
        true
    }

    /// Remove every shape and abandon the current gesture.
    pub fn clear(&mut self) {
        self.with_tool(|tool, ctx| tool.cancel(ctx));
        self.store.clear();
        self.with_tool(|tool, ctx| tool.on_store_changed(ctx));
        self.bus.publish(BoardEvent::Cleared);
        self.redraw();
        log::info!("Cleared board");
    }

    /// Repaint the committed shapes plus whatever the active tool overlays.
    pub fn redraw(&mut self) {
        let mut events = Vec::new();
        let mut ctx = ToolContext::new(
            &mut self.store,
            &self.style,
            &self.config,
            &mut self.surface,
            &mut events,
        );
        ctx.redraw();
        if let Some(tool) = self.tool.as_ref() {
            tool.draw_overlay(&mut ctx);
        }
    }

    // --- Import / export ---

    pub fn export_records(&self) -> Vec<ShapeRecord> {
        self.store.to_records()
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.store.to_json()
    }

    /// Replace the board contents with `records`. Invalid records are
    /// skipped.
    pub fn import_records(&mut self, records: &[ShapeRecord]) -> ImportReport {
        self.clear();
        let report = self.store.import_records(records);
        let added: Vec<BoardEvent> = self
            .store
            .list()
            .map(|shape| BoardEvent::ShapeAdded {
                id: shape.id().to_string(),
            })
            .collect();
        self.bus.publish_all(added);
        self.redraw();
        log::info!(
            "Imported {} shapes ({} skipped)",
            report.imported,
            report.skipped
        );
        report
    }

    /// Replace the board contents with a JSON array of records. A malformed
    /// document leaves the board untouched.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let records: Vec<ShapeRecord> = serde_json::from_str(json)?;
        Ok(self.import_records(&records))
    }

    // --- Internals ---

    /// Deactivate and drop the bound tool. Returns whether one was bound.
    fn unbind_tool(&mut self) -> bool {
        let bound = self.with_tool(|tool, ctx| tool.deactivate(ctx)).is_some();
        self.tool = None;
        bound
    }

    /// Run `f` against the bound tool, then publish what it emitted.
    fn with_tool<R>(
        &mut self,
        f: impl FnOnce(&mut dyn Tool, &mut ToolContext<'_>) -> R,
    ) -> Option<R> {
        let tool = self.tool.as_mut()?;
        let mut events = Vec::new();
        let result = {
            let mut ctx = ToolContext::new(
                &mut self.store,
                &self.style,
                &self.config,
                &mut self.surface,
                &mut events,
            );
            f(tool.as_mut(), &mut ctx)
        };
        self.bus.publish_all(events);
        Some(result)
    }
}
