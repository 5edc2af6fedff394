//! The 2D drawing surface contract.
//!
//! Drawables, the cursor preview and the export renderer all paint through
//! [`Surface`], a small immediate-mode API shaped like an HTML canvas 2D
//! context. Backends live in `sketchpad-renderer`; [`RecordingSurface`]
//! captures calls for inspection.

use serde::{Deserialize, Serialize};

use crate::{Color, Point};

/// An immediate-mode 2D drawing surface.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> f32;

    /// Surface height in pixels.
    fn height(&self) -> f32;

    /// Clear a rectangular region to transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a rectangular region with the current fill color.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Start a new, empty path.
    fn begin_path(&mut self);

    /// Start a new subpath at `point`.
    fn move_to(&mut self, point: Point);

    /// Add a straight segment from the current position to `point`.
    fn line_to(&mut self, point: Point);

    /// Stroke the current path with the current line width and stroke color.
    fn stroke(&mut self);

    /// Draw filled text with its baseline-left corner at `at`.
    fn fill_text(&mut self, text: &str, at: Point);

    /// Set the line width used by [`Surface::stroke`].
    fn set_line_width(&mut self, width: f32);

    /// Set the color used by [`Surface::stroke`].
    fn set_stroke_color(&mut self, color: Color);

    /// Set the color used by [`Surface::fill_text`] and [`Surface::fill_rect`].
    fn set_fill_color(&mut self, color: Color);

    /// Set the font size in pixels used by [`Surface::fill_text`].
    fn set_font_size(&mut self, px: f32);

    /// Push the current transform and style state.
    fn save(&mut self);

    /// Pop the state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Multiply the current transform by a scale.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Reset the current transform to identity.
    fn reset_transform(&mut self);

    /// Clear the whole surface.
    fn clear(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.clear_rect(0.0, 0.0, w, h);
    }
}

/// A single recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[allow(missing_docs)] // Fields mirror the `Surface` method arguments
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    BeginPath,
    MoveTo { point: Point },
    LineTo { point: Point },
    Stroke,
    FillText { text: String, at: Point },
    SetLineWidth { width: f32 },
    SetStrokeColor { color: Color },
    SetFillColor { color: Color },
    SetFontSize { px: f32 },
    Save,
    Restore,
    Scale { sx: f32, sy: f32 },
    ResetTransform,
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a recording surface with the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded since the most recent full-surface clear.
    #[must_use]
    pub fn current_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Text drawn in the current frame, in draw order.
    #[must_use]
    pub fn frame_texts(&self) -> Vec<&str> {
        self.current_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of `stroke()` calls in the current frame.
    #[must_use]
    pub fn frame_stroke_count(&self) -> usize {
        self.current_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count()
    }

    /// Number of full-surface clears recorded, i.e. repaints performed.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .count()
    }

    /// Drop all recorded commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::MoveTo { point });
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::LineTo { point });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
        });
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth { width });
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor { color });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor { color });
    }

    fn set_font_size(&mut self, px: f32) {
        self.commands.push(DrawCommand::SetFontSize { px });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn reset_transform(&mut self) {
        self.commands.push(DrawCommand::ResetTransform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clear_covers_surface() {
        let mut surface = RecordingSurface::new(256.0, 128.0);
        surface.clear();
        assert_eq!(
            surface.commands(),
            &[DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 256.0,
                height: 128.0
            }]
        );
    }

    #[test]
    fn test_current_frame_starts_after_last_clear() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fill_text("old", Point::new(1.0, 1.0));
        surface.clear();
        surface.fill_text("new", Point::new(2.0, 2.0));
        surface.begin_path();
        surface.stroke();

        assert_eq!(surface.frame_texts(), vec!["new"]);
        assert_eq!(surface.frame_stroke_count(), 1);
        assert_eq!(surface.clear_count(), 1);
    }
}
