//! Board configuration.

use crate::shapes::{DEFAULT_TOLERANCE, ShapeStyle};
use crate::tools::ToolKind;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or validating a [`BoardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Canvas size, default style and selection look. Missing fields in a JSON
/// document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    /// Stroke color of newly drawn shapes.
    pub default_color: String,
    /// Stroke width of newly drawn shapes.
    pub default_line_width: f64,
    /// Hit-test slack used by the select tool.
    pub hit_tolerance: f64,
    /// Tool bound when the board is created.
    pub initial_tool: Option<ToolKind>,
    /// Dash pattern for previews and the selection outline.
    pub line_dash: Vec<f64>,
    pub selection_color: String,
    pub selection_line_width: f64,
    /// Gap between a shape and its selection outline.
    pub selection_padding: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            background_color: "#ffffff".to_string(),
            default_color: "#e74c3c".to_string(),
            default_line_width: 5.0,
            hit_tolerance: DEFAULT_TOLERANCE,
            initial_tool: None,
            line_dash: vec![5.0, 5.0],
            selection_color: "#007bff".to_string(),
            selection_line_width: 2.0,
            selection_padding: 3.0,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded board config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.default_line_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default line width must be positive, got {}",
                self.default_line_width
            )));
        }
        if !(self.selection_line_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "selection line width must be positive, got {}",
                self.selection_line_width
            )));
        }
        if !(self.hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit tolerance must not be negative, got {}",
                self.hit_tolerance
            )));
        }
        if self.line_dash.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dash segments must be finite and non-negative, got {:?}",
                self.line_dash
            )));
        }
        Ok(())
    }

    /// The full canvas area.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Style applied to new shapes before any `set_color`/`set_line_width`.
    pub fn default_style(&self) -> ShapeStyle {
        ShapeStyle::new(self.default_color.clone(), self.default_line_width)
    }
}
