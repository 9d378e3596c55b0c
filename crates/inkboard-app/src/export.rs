//! Headless export: load a drawing, replay it onto a vector scene, emit SVG.

use inkboard_core::{Board, BoardConfig, ConfigError, ImportError, ImportReport};
use inkboard_render::{RenderError, SceneSurface, StrokeItem, svg_document, write_svg};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

/// A drawing replayed onto a vector scene.
#[derive(Debug, Clone)]
pub struct Export {
    pub items: Vec<StrokeItem>,
    pub config: BoardConfig,
    pub report: ImportReport,
}

impl Export {
    pub fn svg(&self) -> String {
        svg_document(&self.items, &self.config)
    }

    pub fn write_svg(&self, out: &mut impl io::Write) -> Result<(), ExportError> {
        write_svg(&self.items, &self.config, out)?;
        Ok(())
    }
}

/// Render a JSON drawing to SVG using `config` for canvas size and colors.
pub fn export_json(json: &str, config: BoardConfig) -> Result<Export, ExportError> {
    let mut board = Board::new(config, SceneSurface::new());
    let report = board.import_json(json)?;
    if report.skipped > 0 {
        log::warn!("{} shape records could not be imported", report.skipped);
    }
    let items = board.surface_mut().take_items();
    Ok(Export {
        items,
        config: board.config().clone(),
        report,
    })
}

/// Render the drawing at `scene_path`, with an optional config file.
pub fn export_file(
    scene_path: &Path,
    config_path: Option<&Path>,
) -> Result<Export, ExportError> {
    let config = match config_path {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    let json = std::fs::read_to_string(scene_path)?;
    log::info!("Rendering {}", scene_path.display());
    export_json(&json, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DRAWING: &str = r##"[
        {"id": "r1", "kind": "rectangle", "data": {"x": 10, "y": 10, "width": 40, "height": 30, "color": "#e74c3c", "lineWidth": 5}},
        {"id": "c1", "kind": "circle", "data": {"x": 100, "y": 100, "radius": 20, "color": "#000", "lineWidth": 2}},
        {"id": "p1", "kind": "polygon", "data": {"points": [{"x": 0, "y": 0}, {"x": 30, "y": 0}, {"x": 0, "y": 30}], "isComplete": true, "color": "#00f", "lineWidth": 1}},
        {"id": "x1", "kind": "star", "data": {}}
    ]"##;

    #[test]
    fn test_export_json() {
        let export = export_json(DRAWING, BoardConfig::default()).unwrap();
        assert_eq!(export.report, ImportReport { imported: 3, skipped: 1 });
        let svg = export.svg();
        assert_eq!(svg.matches("<path ").count(), 3);
        assert!(svg.contains(r##"stroke="#e74c3c""##));

        let mut out = Vec::new();
        export.write_svg(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), svg);
    }

    #[test]
    fn test_export_file_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        let config = dir.path().join("config.json");
        std::fs::write(&scene, DRAWING).unwrap();
        let mut file = std::fs::File::create(&config).unwrap();
        write!(file, r##"{{"width": 320, "height": 200, "backgroundColor": "#222"}}"##).unwrap();

        let export = export_file(&scene, Some(config.as_path())).unwrap();
        let svg = export.svg();
        assert!(svg.contains(r#"width="320" height="200""#));
        assert!(svg.contains(r##"fill="#222""##));
    }

    #[test]
    fn test_missing_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_file(&dir.path().join("nope.json"), None);
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_malformed_scene() {
        let result = export_json("{}", BoardConfig::default());
        assert!(matches!(result, Err(ExportError::Import(_))));
    }
}
