//! Drawables - the committed contents of a scene.
//!
//! Every drawable supports two capabilities: [`Drawable::render`] onto a
//! [`Surface`] and [`Drawable::extend`] with a new pointer position while
//! its gesture is active.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Color, GlyphMetrics, Point, Surface};

/// Unique identifier for a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableId(Uuid);

impl DrawableId {
    /// Create a new unique drawable ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for DrawableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DrawableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A free-hand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Unique identifier.
    pub id: DrawableId,
    /// Recorded points, append-only, never empty.
    points: Vec<Point>,
    /// Line width in pixels.
    pub width: f32,
    /// Line color.
    pub color: Color,
}

impl Stroke {
    /// Start a stroke at `start`.
    #[must_use]
    pub fn new(start: Point, width: f32, color: Color) -> Self {
        Self {
            id: DrawableId::new(),
            points: vec![start],
            width,
            color,
        }
    }

    /// Recorded points in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Append a point.
    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Draw the polyline. A single-point stroke draws nothing.
    pub fn render(&self, surface: &mut dyn Surface) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        surface.set_line_width(self.width);
        surface.set_stroke_color(self.color);
        surface.begin_path();
        surface.move_to(*first);
        for point in rest {
            surface.line_to(*point);
        }
        surface.stroke();
    }
}

/// How a sticker glyph is laid out around its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphClass {
    /// Pictographic symbol (emoji and friends).
    Emoji,
    /// Custom text containing letters or digits.
    Text,
}

impl GlyphClass {
    /// Classify a glyph string.
    #[must_use]
    pub fn of(glyph: &str) -> Self {
        if glyph.chars().any(char::is_alphanumeric) {
            Self::Text
        } else {
            Self::Emoji
        }
    }
}

/// A stamped symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    /// Unique identifier.
    pub id: DrawableId,
    /// Anchor position (the glyph is centered on it).
    pub location: Point,
    /// The glyph text.
    pub glyph: String,
}

impl Sticker {
    /// Text color for stickers.
    pub const FILL: Color = Color::BLACK;

    /// Place a sticker at `location`.
    #[must_use]
    pub fn new(location: Point, glyph: impl Into<String>) -> Self {
        Self {
            id: DrawableId::new(),
            location,
            glyph: glyph.into(),
        }
    }

    /// Move the sticker. Stickers reposition, they do not accumulate.
    pub fn extend(&mut self, point: Point) {
        self.location = point;
    }

    /// Layout metrics for this sticker's glyph class.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn metrics(&self) -> GlyphMetrics {
        match GlyphClass::of(&self.glyph) {
            GlyphClass::Emoji => GlyphMetrics::STICKER,
            GlyphClass::Text => GlyphMetrics {
                font_px: 24.0,
                x_factor: 0.3 * self.glyph.chars().count() as f32,
                y_factor: 0.35,
            },
        }
    }

    /// Draw the glyph centered on its anchor.
    pub fn render(&self, surface: &mut dyn Surface) {
        let metrics = self.metrics();
        surface.set_font_size(metrics.font_px);
        surface.set_fill_color(Self::FILL);
        surface.fill_text(&self.glyph, metrics.origin(self.location));
    }
}

/// Anything that can be committed to a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Drawable {
    /// A free-hand stroke.
    Stroke(Stroke),
    /// A placed sticker.
    Sticker(Sticker),
}

impl Drawable {
    /// The drawable's identifier.
    #[must_use]
    pub fn id(&self) -> DrawableId {
        match self {
            Self::Stroke(stroke) => stroke.id,
            Self::Sticker(sticker) => sticker.id,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Stroke(_) => "stroke",
            Self::Sticker(_) => "sticker",
        }
    }

    /// Feed a new pointer position into the active gesture.
    pub fn extend(&mut self, point: Point) {
        match self {
            Self::Stroke(stroke) => stroke.extend(point),
            Self::Sticker(sticker) => sticker.extend(point),
        }
    }

    /// Draw onto `surface` using the drawable's own style.
    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Self::Stroke(stroke) => stroke.render(surface),
            Self::Sticker(sticker) => sticker.render(surface),
        }
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Self::Stroke(stroke)
    }
}

impl From<Sticker> for Drawable {
    fn from(sticker: Sticker) -> Self {
        Self::Sticker(sticker)
    }
}
