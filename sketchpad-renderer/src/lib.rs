//! # Sketchpad Renderer
//!
//! Raster backend for sketchpad scenes.
//!
//! ## Pipeline
//!
//! ```text
//! Drawable::render ──▶ SvgSurface ──▶ usvg/resvg ──▶ tiny-skia Pixmap ──▶ PNG / JPEG
//! ```
//!
//! The live view repaints an [`SvgSurface`] on every scene change; the
//! [`SnapshotExporter`] builds a scaled, opaque off-screen surface on demand.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod raster;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use export::{
    paint_snapshot, ExportConfig, ExportFormat, ExportedImage, SnapshotExporter, Watermark,
};
pub use raster::{encode_jpeg, encode_png, Rasterizer};
pub use svg::SvgSurface;

use sketchpad_core::LiveView;

/// A live view backed by an SVG surface.
pub type LiveSvgView = LiveView<SvgSurface>;

/// Create a transparent live view of the given size.
#[must_use]
pub fn live_view(width: f32, height: f32) -> LiveSvgView {
    LiveView::new(SvgSurface::new(width, height))
}
