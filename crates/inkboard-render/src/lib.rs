//! Inkboard Render Library
//!
//! Headless rendering for inkboard drawings: a [`SceneSurface`] that keeps
//! board drawing calls as kurbo paths, and SVG output built on top of it.

mod scene;
mod svg;

pub use scene::{SceneSurface, StrokeItem};
pub use svg::{RenderError, render_shapes, svg_document, write_svg};
