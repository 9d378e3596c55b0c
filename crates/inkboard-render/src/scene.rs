//! Retained vector scene built from board drawing calls.

use inkboard_core::surface::DrawSurface;
use kurbo::{Arc, BezPath, Point, Rect, Shape as KurboShape, Stroke, Vec2};

/// Flattening tolerance for arcs.
const ARC_TOLERANCE: f64 = 0.1;

/// One stroked path in the scene.
#[derive(Debug, Clone)]
pub struct StrokeItem {
    pub path: BezPath,
    /// CSS color string.
    pub color: String,
    pub stroke: Stroke,
}

/// Graphics state saved and restored as a unit.
#[derive(Debug, Clone)]
struct StrokeState {
    color: String,
    width: f64,
    dash: Vec<f64>,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 1.0,
            dash: Vec::new(),
        }
    }
}

impl StrokeState {
    fn to_stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.width);
        if self.dash.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.dash.iter().copied())
        }
    }
}

/// A [`DrawSurface`] that keeps every stroke as a kurbo path.
///
/// `clear_rect` drops every stroke touching the cleared area; the board only
/// ever clears the whole canvas.
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    items: Vec<StrokeItem>,
    state: StrokeState,
    saved: Vec<StrokeState>,
    path: BezPath,
    /// Whether `path` has an open subpath to continue.
    has_current_point: bool,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strokes in paint order.
    pub fn items(&self) -> &[StrokeItem] {
        &self.items
    }

    pub fn take_items(&mut self) -> Vec<StrokeItem> {
        std::mem::take(&mut self.items)
    }

    /// Union of the stroked paths' bounding boxes, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(|item| item.path.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    fn push(&mut self, path: BezPath) {
        self.items.push(StrokeItem {
            path,
            color: self.state.color.clone(),
            stroke: self.state.to_stroke(),
        });
    }
}

impl DrawSurface for SceneSurface {
    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => log::warn!("restore() without matching save()"),
        }
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.has_current_point = false;
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
        self.has_current_point = true;
    }

    fn line_to(&mut self, point: Point) {
        if self.has_current_point {
            self.path.line_to(point);
        } else {
            self.move_to(point);
        }
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let start = center + Vec2::from_angle(start_angle) * radius;
        self.line_to(start);
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: end_angle - start_angle,
            x_rotation: 0.0,
        };
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.path.push(el);
        }
    }

    fn close_path(&mut self) {
        if self.has_current_point {
            self.path.close_path();
        }
    }

    fn stroke(&mut self) {
        if !self.path.elements().is_empty() {
            self.push(self.path.clone());
        }
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.push(rect.to_path(ARC_TOLERANCE));
    }

    fn clear_rect(&mut self, rect: Rect) {
        let area = rect.abs();
        self.items
            .retain(|item| !touches(area, item.path.bounding_box()));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.state.color = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.width = width;
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.state.dash = pattern.to_vec();
    }
}

fn touches(area: Rect, bounds: Rect) -> bool {
    bounds.x0 <= area.x1 && bounds.x1 >= area.x0 && bounds.y0 <= area.y1 && bounds.y1 >= area.y0
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::shapes::{Circle, Rectangle, ShapeStyle, ShapeTrait};
    use kurbo::PathEl;

    #[test]
    fn test_rectangle_becomes_closed_path() {
        let mut scene = SceneSurface::new();
        let mut rect = Rectangle::new(Point::new(10.0, 10.0), 40.0, 30.0);
        rect.style = ShapeStyle::new("#e74c3c", 5.0);
        rect.draw(&mut scene);

        let items = scene.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].color, "#e74c3c");
        assert!((items[0].stroke.width - 5.0).abs() < f64::EPSILON);
        assert_eq!(items[0].path.bounding_box(), Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_circle_bounds() {
        let mut scene = SceneSurface::new();
        Circle::new(Point::new(50.0, 50.0), 20.0).draw(&mut scene);
        let bounds = scene.bounds().unwrap();
        assert!((bounds.x0 - 30.0).abs() < 0.1);
        assert!((bounds.y1 - 70.0).abs() < 0.1);
        assert!(matches!(scene.items()[0].path.elements()[0], PathEl::MoveTo(_)));
    }

    #[test]
    fn test_save_restore_scopes_style() {
        let mut scene = SceneSurface::new();
        scene.save();
        scene.set_stroke_color("#ff0000");
        scene.set_line_dash(&[5.0, 5.0]);
        scene.restore();
        scene.begin_path();
        scene.move_to(Point::ZERO);
        scene.line_to(Point::new(10.0, 0.0));
        scene.stroke();

        let item = &scene.items()[0];
        assert_eq!(item.color, "#000000");
        assert!(item.stroke.dash_pattern.is_empty());
    }

    #[test]
    fn test_dash_pattern_is_kept() {
        let mut scene = SceneSurface::new();
        scene.set_line_dash(&[5.0, 5.0]);
        scene.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(scene.items()[0].stroke.dash_pattern.as_slice(), &[5.0, 5.0]);
    }

    #[test]
    fn test_clear_rect_drops_covered_strokes() {
        let mut scene = SceneSurface::new();
        scene.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.stroke_rect(Rect::new(100.0, 100.0, 120.0, 120.0));
        scene.stroke_rect(Rect::new(-30.0, -30.0, -10.0, -10.0));
        scene.clear_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(scene.items().len(), 2);
        scene.clear_rect(Rect::new(0.0, 0.0, 800.0, 500.0));
        assert_eq!(scene.items().len(), 1, "strokes off the canvas are untouched");
    }

    #[test]
    fn test_empty_path_is_not_stroked() {
        let mut scene = SceneSurface::new();
        scene.begin_path();
        scene.stroke();
        assert!(scene.items().is_empty());
    }
}
