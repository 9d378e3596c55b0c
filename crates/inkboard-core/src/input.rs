//! Pointer input normalization for mouse and touch.

use kurbo::Point;
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    DoubleClick,
}

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerKind::Down, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerKind::Move, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerKind::Up, position)
    }

    pub fn double_click(position: Point) -> Self {
        Self::new(PointerKind::DoubleClick, position)
    }
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Turns host pointer positions into canvas-local [`PointerEvent`]s.
///
/// Mouse and touch share one path: the host passes the client position of
/// the pointer (or first touch) and the canvas origin in the same space.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Top-left corner of the canvas in client coordinates.
    canvas_origin: Point,
    /// Last pointer position in canvas coordinates.
    pub pointer_position: Point,
    /// Whether the primary pointer is held down.
    pub is_pressed: bool,
    /// Emit a `DoubleClick` after a second quick press. Disable when the
    /// host delivers double-clicks itself.
    detect_double_click: bool,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            canvas_origin: Point::ZERO,
            pointer_position: Point::ZERO,
            is_pressed: false,
            detect_double_click: true,
            last_click_time: None,
            last_click_position: None,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas_origin(canvas_origin: Point) -> Self {
        Self {
            canvas_origin,
            ..Self::default()
        }
    }

    /// Update where the canvas sits in client space (after layout or scroll).
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    pub fn set_detect_double_click(&mut self, enabled: bool) {
        self.detect_double_click = enabled;
    }

    /// Convert a client position into canvas-local coordinates.
    pub fn normalize(&self, client: Point) -> Point {
        client - self.canvas_origin.to_vec2()
    }

    /// Press at `client`. Yields the `Down` and, when a double-click was
    /// recognized, a trailing `DoubleClick` at the same position.
    pub fn pointer_down(&mut self, client: Point) -> Vec<PointerEvent> {
        self.pointer_down_at(client, Instant::now())
    }

    fn pointer_down_at(&mut self, client: Point, now: Instant) -> Vec<PointerEvent> {
        let position = self.normalize(client);
        self.pointer_position = position;
        self.is_pressed = true;

        let mut events = vec![PointerEvent::down(position)];
        if self.detect_double_click && self.register_click(position, now) {
            events.push(PointerEvent::double_click(position));
        }
        events
    }

    pub fn pointer_move(&mut self, client: Point) -> PointerEvent {
        let position = self.normalize(client);
        self.pointer_position = position;
        PointerEvent::moved(position)
    }

    pub fn pointer_up(&mut self, client: Point) -> PointerEvent {
        let position = self.normalize(client);
        self.pointer_position = position;
        self.is_pressed = false;
        PointerEvent::up(position)
    }

    /// A double-click reported by the host.
    pub fn double_click(&mut self, client: Point) -> PointerEvent {
        let position = self.normalize(client);
        self.pointer_position = position;
        PointerEvent::double_click(position)
    }

    /// Record a click and report whether it completes a double-click.
    fn register_click(&mut self, position: Point, now: Instant) -> bool {
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position)
        {
            let elapsed = now.saturating_duration_since(last_time).as_millis();
            if elapsed < DOUBLE_CLICK_TIME_MS && position.distance(last_pos) < DOUBLE_CLICK_DISTANCE
            {
                // Reset so a third click starts a new pair
                self.last_click_time = None;
                self.last_click_position = None;
                return true;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
        false
    }
}
