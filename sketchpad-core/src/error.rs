//! Error types for canvas operations.

use thiserror::Error;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// Empty undo/redo and degenerate strokes are not errors; they are
/// silent no-ops.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Export scale factor was zero, negative or not finite.
    #[error("Invalid export scale: {0} (must be a finite value > 0)")]
    InvalidScale(f32),

    /// A color string could not be parsed as `#rrggbb` or `#rrggbbaa`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A custom sticker was registered with no visible text.
    #[error("Sticker glyph must not be empty")]
    EmptyGlyph,
}

/// Validate an export scale factor.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidScale`] if `scale` is not finite or `<= 0`.
pub fn check_scale(scale: f32) -> CanvasResult<f32> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(CanvasError::InvalidScale(scale))
    }
}
