//! Inkboard Application
//!
//! Shells around the board: headless SVG export for native use, and a
//! canvas-backed widget for the browser.

mod export;

pub use export::{Export, ExportError, export_file, export_json};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, WebBoard, run_wasm};
