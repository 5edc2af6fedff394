//! Tool selection state.
//!
//! The selection is an explicit context object: the host's toolbar owns and
//! mutates it, the gesture translator reads it when a gesture starts. It is
//! never part of undo history.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult, Color, Drawable, Point, Sticker, Stroke};

/// Built-in sticker glyphs offered by the toolbar.
pub const DEFAULT_STICKERS: [&str; 3] = ["🐸", "🦆", "🌈"];

/// Glyph shown by the cursor preview while the marker tool is active.
pub const MARKER_PREVIEW_GLYPH: &str = "*";

/// The kind of tool a new gesture uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Free-hand strokes.
    #[default]
    Marker,
    /// Sticker placement.
    Sticker,
}

/// Marker thickness tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Thickness {
    /// 2 px.
    #[default]
    Thin,
    /// 5 px.
    Medium,
    /// 10 px.
    Thick,
}

impl Thickness {
    /// The next tier in toolbar rotation (Thin -> Medium -> Thick -> Thin).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Thin => Self::Medium,
            Self::Medium => Self::Thick,
            Self::Thick => Self::Thin,
        }
    }

    /// Stroke width in pixels.
    #[must_use]
    pub fn line_width(self) -> f32 {
        match self {
            Self::Thin => 2.0,
            Self::Medium => 5.0,
            Self::Thick => 10.0,
        }
    }
}

/// Font size and offset multipliers used to center a glyph on a pointer.
///
/// Text is drawn at `(x - font_px * x_factor, y + font_px * y_factor)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Font size in pixels.
    pub font_px: f32,
    /// Horizontal offset multiplier (subtracted).
    pub x_factor: f32,
    /// Vertical offset multiplier (added, baseline below the anchor).
    pub y_factor: f32,
}

impl GlyphMetrics {
    /// Metrics for a sticker glyph.
    pub const STICKER: Self = Self {
        font_px: 32.0,
        x_factor: 0.5,
        y_factor: 0.35,
    };

    /// Cursor-preview metrics for the given tool and thickness tier.
    ///
    /// `thickness` is ignored for the sticker tool.
    #[must_use]
    pub fn for_tool(kind: ToolKind, thickness: Thickness) -> Self {
        match (kind, thickness) {
            (ToolKind::Sticker, _) => Self::STICKER,
            (ToolKind::Marker, Thickness::Thin) => Self {
                font_px: 16.0,
                x_factor: 0.25,
                y_factor: 0.4,
            },
            (ToolKind::Marker, Thickness::Medium) => Self {
                font_px: 24.0,
                x_factor: 0.28,
                y_factor: 0.45,
            },
            (ToolKind::Marker, Thickness::Thick) => Self {
                font_px: 40.0,
                x_factor: 0.3,
                y_factor: 0.5,
            },
        }
    }

    /// Baseline-left draw position for a glyph centered on `anchor`.
    #[must_use]
    pub fn origin(&self, anchor: Point) -> Point {
        Point::new(
            anchor.x - self.font_px * self.x_factor,
            anchor.y + self.font_px * self.y_factor,
        )
    }
}

/// The current tool selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSelection {
    /// Active tool.
    pub kind: ToolKind,
    /// Marker thickness tier.
    pub thickness: Thickness,
    /// Marker color.
    pub color: Color,
    /// Selected sticker glyph.
    pub sticker: String,
}

impl Default for ToolSelection {
    fn default() -> Self {
        Self {
            kind: ToolKind::Marker,
            thickness: Thickness::Thin,
            color: Color::BLACK,
            sticker: DEFAULT_STICKERS[0].to_string(),
        }
    }
}

impl ToolSelection {
    /// Switch to the marker tool.
    pub fn select_marker(&mut self) {
        self.kind = ToolKind::Marker;
    }

    /// Switch to the sticker tool with the given glyph.
    pub fn select_sticker(&mut self, glyph: impl Into<String>) {
        self.kind = ToolKind::Sticker;
        self.sticker = glyph.into();
    }

    /// Advance the marker thickness to the next tier.
    pub fn cycle_thickness(&mut self) -> Thickness {
        self.thickness = self.thickness.next();
        self.thickness
    }

    /// Glyph the cursor preview shows for this selection.
    #[must_use]
    pub fn preview_glyph(&self) -> &str {
        match self.kind {
            ToolKind::Marker => MARKER_PREVIEW_GLYPH,
            ToolKind::Sticker => &self.sticker,
        }
    }

    /// Cursor-preview metrics for this selection.
    #[must_use]
    pub fn preview_metrics(&self) -> GlyphMetrics {
        GlyphMetrics::for_tool(self.kind, self.thickness)
    }

    /// Build the drawable a gesture starting at `at` creates.
    #[must_use]
    pub fn drawable_at(&self, at: Point) -> Drawable {
        match self.kind {
            ToolKind::Marker => Drawable::Stroke(Stroke::new(
                at,
                self.thickness.line_width(),
                self.color,
            )),
            ToolKind::Sticker => Drawable::Sticker(Sticker::new(at, self.sticker.clone())),
        }
    }
}

/// The set of stickers the toolbar offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerPalette {
    glyphs: Vec<String>,
}

impl Default for StickerPalette {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_STICKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl StickerPalette {
    /// All glyphs, built-ins first, then custom stickers in insertion order.
    #[must_use]
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Register a custom sticker and return its trimmed glyph.
    ///
    /// Adding a glyph that is already present is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::EmptyGlyph`] if `text` is blank.
    pub fn add_custom(&mut self, text: &str) -> CanvasResult<&str> {
        let glyph = text.trim();
        if glyph.is_empty() {
            return Err(CanvasError::EmptyGlyph);
        }
        let index = match self.glyphs.iter().position(|g| g == glyph) {
            Some(index) => index,
            None => {
                tracing::debug!("Added custom sticker {glyph:?}");
                self.glyphs.push(glyph.to_string());
                self.glyphs.len() - 1
            }
        };
        Ok(&self.glyphs[index])
    }

    /// Whether `glyph` is in the palette.
    #[must_use]
    pub fn contains(&self, glyph: &str) -> bool {
        self.glyphs.iter().any(|g| g == glyph)
    }
}
