//! Transient cursor preview.

use crate::{Color, GlyphMetrics, Point, Surface, ToolSelection};

/// Where the next gesture would draw.
///
/// Never committed to history. Visible only while the pointer is over the
/// surface and no gesture is in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPreview {
    /// Pointer is over the surface.
    pub active: bool,
    /// A gesture is in progress.
    pub pressed: bool,
    /// Last known pointer position.
    pub location: Point,
    glyph: String,
    metrics: GlyphMetrics,
}

impl Default for CursorPreview {
    fn default() -> Self {
        Self::for_tools(&ToolSelection::default())
    }
}

impl CursorPreview {
    /// Preview color.
    pub const FILL: Color = Color::BLACK;

    /// An inactive preview for the given tool selection.
    #[must_use]
    pub fn for_tools(tools: &ToolSelection) -> Self {
        Self {
            active: false,
            pressed: false,
            location: Point::default(),
            glyph: tools.preview_glyph().to_string(),
            metrics: tools.preview_metrics(),
        }
    }

    /// Refresh the glyph and metrics from the current tool selection.
    pub fn sync_tools(&mut self, tools: &ToolSelection) {
        if self.glyph != tools.preview_glyph() {
            self.glyph = tools.preview_glyph().to_string();
        }
        self.metrics = tools.preview_metrics();
    }

    /// The glyph that would be drawn.
    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// The metrics used to place the glyph.
    #[must_use]
    pub fn metrics(&self) -> GlyphMetrics {
        self.metrics
    }

    /// Whether the preview should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.active && !self.pressed
    }

    /// Draw the preview glyph if visible.
    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.is_visible() {
            return;
        }
        surface.set_font_size(self.metrics.font_px);
        surface.set_fill_color(Self::FILL);
        surface.fill_text(&self.glyph, self.metrics.origin(self.location));
    }
}
