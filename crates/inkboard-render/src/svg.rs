//! SVG output.

use crate::scene::{SceneSurface, StrokeItem};
use inkboard_core::config::BoardConfig;
use inkboard_core::shapes::Shape;
use std::fmt::Write as _;
use std::io;
use thiserror::Error;

/// SVG output errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Paint `shapes` in order onto a fresh scene.
pub fn render_shapes<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> SceneSurface {
    let mut scene = SceneSurface::new();
    for shape in shapes {
        shape.draw(&mut scene);
    }
    scene
}

/// Build a standalone SVG document the size of the board's canvas.
pub fn svg_document(items: &[StrokeItem], config: &BoardConfig) -> String {
    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height,
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        escape_attr(&config.background_color)
    );
    for item in items {
        let _ = write!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            item.path.to_svg(),
            escape_attr(&item.color),
            item.stroke.width,
        );
        if !item.stroke.dash_pattern.is_empty() {
            let dashes: Vec<String> = item
                .stroke
                .dash_pattern
                .iter()
                .map(|d| d.to_string())
                .collect();
            let _ = write!(svg, r#" stroke-dasharray="{}""#, dashes.join(" "));
        }
        svg.push_str("/>\n");
    }
    svg.push_str("</svg>\n");
    svg
}

/// Write the SVG document for `items` to `out`.
pub fn write_svg(
    items: &[StrokeItem],
    config: &BoardConfig,
    out: &mut impl io::Write,
) -> Result<(), RenderError> {
    out.write_all(svg_document(items, config).as_bytes())?;
    log::debug!("Wrote SVG with {} paths", items.len());
    Ok(())
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::shapes::{BrushStroke, Rectangle};
    use kurbo::Point;

    #[test]
    fn test_document_contains_one_path_per_shape() {
        let shapes = vec![
            Shape::Rectangle(Rectangle::new(Point::new(10.0, 10.0), 40.0, 30.0)),
            Shape::Brush(BrushStroke::completed(vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 5.0),
            ])),
        ];
        let scene = render_shapes(&shapes);
        let svg = svg_document(scene.items(), &BoardConfig::default());

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\""));
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.contains("<path d=\"M"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_dashes_and_escaping() {
        let mut scene = SceneSurface::new();
        {
            use inkboard_core::surface::DrawSurface;
            scene.set_stroke_color("a\"b");
            scene.set_line_dash(&[5.0, 5.0]);
            scene.stroke_rect(kurbo::Rect::new(0.0, 0.0, 1.0, 1.0));
        }
        let svg = svg_document(scene.items(), &BoardConfig::default());
        assert!(svg.contains(r#"stroke="a&quot;b""#));
        assert!(svg.contains(r#"stroke-dasharray="5 5""#));
    }

    #[test]
    fn test_write_svg() {
        let scene = render_shapes(std::iter::empty());
        let mut out = Vec::new();
        write_svg(scene.items(), &BoardConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("fill=\"#ffffff\""));
        assert!(!text.contains("<path"));
    }
}
