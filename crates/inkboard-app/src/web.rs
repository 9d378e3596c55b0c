//! WebAssembly entry point and the canvas-backed board widget.

use inkboard_core::surface::DrawSurface;
use inkboard_core::{Board, BoardConfig, BoardEvent, InputState};
use kurbo::{Point, Rect};
use std::sync::mpsc::Receiver;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"inkboard: logger already initialized".into());
    }

    log::info!("Starting inkboard (WASM)");
}

/// [`DrawSurface`] over a canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawSurface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: Point) {
        self.ctx.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        self.ctx.line_to(point.x, point.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, start_angle, end_angle) {
            log::warn!("arc() rejected: {e:?}");
        }
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        let segments: js_sys::Array = pattern.iter().map(|d| JsValue::from_f64(*d)).collect();
        if let Err(e) = self.ctx.set_line_dash(&segments) {
            log::warn!("setLineDash() rejected: {e:?}");
        }
    }
}

/// Wire name of an event, as reported to JavaScript.
fn event_name(event: &BoardEvent) -> &'static str {
    match event {
        BoardEvent::ShapeAdded { .. } => "shapeAdded",
        BoardEvent::ShapeRemoved { .. } => "shapeRemoved",
        BoardEvent::ShapeSelected { .. } => "shapeSelected",
        BoardEvent::ShapeDeselected { .. } => "shapeDeselected",
        BoardEvent::ShapeMoved { .. } => "shapeMoved",
        BoardEvent::Cleared => "cleared",
        BoardEvent::ToolChanged { .. } => "toolChanged",
    }
}

/// Drawing board bound to a `<canvas>` element.
///
/// Pointer methods take client coordinates; for touch input pass the first
/// touch point. Double-clicks come from the browser's `dblclick` event.
#[wasm_bindgen]
pub struct WebBoard {
    board: Board<CanvasSurface>,
    input: InputState,
    canvas: HtmlCanvasElement,
    events: Receiver<BoardEvent>,
}

#[wasm_bindgen]
impl WebBoard {
    /// Bind to the canvas with id `canvas_id`, configured by an optional
    /// JSON document.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<WebBoard, JsValue> {
        let config = match config_json {
            Some(json) => {
                BoardConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => BoardConfig::default(),
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id {canvas_id}")))?
            .dyn_into()?;
        canvas.set_width(config.width as u32);
        canvas.set_height(config.height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("Canvas has no 2d context")?
            .dyn_into()?;

        let mut input = InputState::new();
        input.set_detect_double_click(false);
        let mut board = Board::new(config, CanvasSurface::new(ctx));
        let events = board.subscribe();
        log::info!("Board bound to #{canvas_id}");

        let web_board = WebBoard {
            board,
            input,
            canvas,
            events,
        };
        web_board.apply_background()?;
        Ok(web_board)
    }

    /// Show the configured background behind the (transparent) canvas.
    fn apply_background(&self) -> Result<(), JsValue> {
        self.canvas
            .style()
            .set_property("background-color", &self.board.config().background_color)
    }

    fn sync_canvas_origin(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.input
            .set_canvas_origin(Point::new(rect.left(), rect.top()));
    }

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) {
        self.sync_canvas_origin();
        for event in self.input.pointer_down(Point::new(client_x, client_y)) {
            self.board.handle_pointer(event);
        }
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.sync_canvas_origin();
        let event = self.input.pointer_move(Point::new(client_x, client_y));
        self.board.handle_pointer(event);
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) {
        self.sync_canvas_origin();
        let event = self.input.pointer_up(Point::new(client_x, client_y));
        self.board.handle_pointer(event);
    }

    pub fn double_click(&mut self, client_x: f64, client_y: f64) {
        self.sync_canvas_origin();
        let event = self.input.double_click(Point::new(client_x, client_y));
        self.board.handle_pointer(event);
    }

    /// Activate a tool by name; unknown names are ignored.
    pub fn activate(&mut self, tool: &str) -> bool {
        self.board.activate_by_name(tool)
    }

    pub fn deactivate(&mut self) {
        self.board.deactivate();
    }

    /// Resize the canvas. Returns `false` for non-positive sizes.
    pub fn set_size(&mut self, width: f64, height: f64) -> bool {
        if !self.board.set_size(width, height) {
            return false;
        }
        // Resizing the element wipes its pixels
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.board.redraw();
        true
    }

    pub fn set_background_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.board.set_background_color(color);
        self.apply_background()
    }

    #[wasm_bindgen(getter)]
    pub fn active_tool(&self) -> Option<String> {
        self.board.active_tool().map(|kind| kind.to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn selection(&self) -> Option<String> {
        self.board.selection().map(str::to_string)
    }

    pub fn set_color(&mut self, color: &str) {
        self.board.set_color(color);
    }

    pub fn set_line_width(&mut self, width: f64) -> bool {
        self.board.set_line_width(width)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.board.remove(id)
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    pub fn redraw(&mut self) {
        self.board.redraw();
    }

    #[wasm_bindgen(getter)]
    pub fn shape_count(&self) -> usize {
        self.board.store().len()
    }

    pub fn export_json(&self) -> Result<String, JsValue> {
        self.board
            .export_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the drawing. Returns how many records were imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize, JsValue> {
        self.board
            .import_json(json)
            .map(|report| report.imported)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Names of the events published since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<String> {
        self.events
            .try_iter()
            .map(|event| event_name(&event).to_string())
            .collect()
    }
}
