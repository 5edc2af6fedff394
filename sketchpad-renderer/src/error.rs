//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rasterization and export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Export scale factor was zero, negative or not finite.
    #[error("Invalid export scale: {0} (must be a finite value > 0)")]
    InvalidScale(f32),

    /// Generated SVG markup was rejected by the parser.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// The raster target could not be allocated.
    #[error("Failed to allocate {width}x{height} pixmap")]
    Pixmap {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// PNG/JPEG encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}
