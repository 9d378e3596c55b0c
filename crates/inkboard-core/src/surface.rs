//! Immediate-mode drawing surface abstraction.
//!
//! Shapes and tool previews draw through [`DrawSurface`], a capability passed
//! by reference into every draw call. There is no global drawing state: the
//! surface holds the current path and stroke state, and `save`/`restore`
//! bracket every style change.

use kurbo::{Point, Rect};

/// Primitive stroke operations issued by shapes and tools.
pub trait DrawSurface {
    /// Push the current stroke state.
    fn save(&mut self);

    /// Pop the stroke state pushed by the matching `save`.
    fn restore(&mut self);

    /// Start a new path, discarding any current one.
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Add a circular arc (angles in radians, clockwise in canvas space).
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    fn close_path(&mut self);

    /// Stroke the current path with the current stroke state.
    fn stroke(&mut self);

    /// Stroke a rectangle outline without touching the current path.
    /// `rect` may be un-normalized.
    fn stroke_rect(&mut self, rect: Rect);

    /// Erase a region of the surface.
    fn clear_rect(&mut self, rect: Rect);

    fn set_stroke_color(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    /// Set the dash pattern; an empty slice means solid strokes.
    fn set_line_dash(&mut self, segments: &[f64]);
}

/// A single recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
    Stroke,
    StrokeRect(Rect),
    ClearRect(Rect),
    StrokeColor(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
}

/// Surface that records every call, used for headless replay and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the most recent `clear_rect`.
    pub fn since_last_clear(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect(_)))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Take and reset the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `Stroke`/`StrokeRect` calls since the most recent clear.
    pub fn visible_strokes(&self) -> usize {
        self.since_last_clear()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke | DrawCommand::StrokeRect(_)))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::StrokeRect(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.commands.push(DrawCommand::LineDash(segments.to_vec()));
    }
}
