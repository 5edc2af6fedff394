//! A [`Surface`] that emits SVG markup.
//!
//! Draw calls become SVG nodes appended to a body buffer; the finished
//! document is rasterized by [`crate::Rasterizer`]. Style and transform
//! state follow canvas 2D semantics: `save`/`restore` push and pop a state
//! stack, and every node is emitted with the transform current at the time
//! of the call.

use std::fmt::Write;

use sketchpad_core::{Color, Point, Surface};

/// Font family used for all text.
pub const FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawState {
    line_width: f32,
    stroke: Color,
    fill: Color,
    font_px: f32,
    scale: (f32, f32),
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke: Color::BLACK,
            fill: Color::BLACK,
            font_px: 10.0,
            scale: (1.0, 1.0),
        }
    }
}

/// SVG-backed drawing surface.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f32,
    height: f32,
    background: Option<Color>,
    body: String,
    path: String,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl SvgSurface {
    /// Create a transparent surface.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: None,
            body: String::with_capacity(4096),
            path: String::new(),
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Create a surface whose cleared state is `background`.
    #[must_use]
    pub fn with_background(width: f32, height: f32, background: Color) -> Self {
        Self {
            background: Some(background),
            ..Self::new(width, height)
        }
    }

    /// Pixel dimensions, rounded up and at least 1x1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.ceil().max(1.0) as u32,
            self.height.ceil().max(1.0) as u32,
        )
    }

    /// Whether nothing has been drawn since the last full clear.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.is_empty()
    }

    /// The complete SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let (w, h) = self.pixel_size();
        let mut svg = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        );
        if let Some(bg) = self.background {
            let _ = write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\" fill-opacity=\"{}\"/>",
                bg.to_rgb_hex(),
                bg.opacity(),
            );
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    fn covers_surface(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height
    }

    #[allow(clippy::float_cmp)]
    fn transform_attr(&self) -> String {
        let (sx, sy) = self.state.scale;
        if sx == 1.0 && sy == 1.0 {
            String::new()
        } else {
            format!(" transform=\"scale({sx} {sy})\"")
        }
    }

    fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{}\" fill-opacity=\"{}\"{transform}/>",
            color.to_rgb_hex(),
            color.opacity(),
        );
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.covers_surface(x, y, width, height) {
            self.body.clear();
            return;
        }
        match self.background {
            Some(bg) => self.push_rect(x, y, width, height, bg),
            None => tracing::warn!(
                "Partial clear ({x}, {y}, {width}x{height}) on a transparent SVG surface is not supported"
            ),
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push_rect(x, y, width, height, self.state.fill);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        let _ = write!(self.path, "M{} {} ", point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        let _ = write!(self.path, "L{} {} ", point.x, point.y);
    }

    fn stroke(&mut self) {
        let data = self.path.trim_end();
        if data.is_empty() {
            return;
        }
        let transform = self.transform_attr();
        let DrawState {
            line_width, stroke, ..
        } = self.state;
        let _ = write!(
            self.body,
            "<path d=\"{data}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{line_width}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"{transform}/>",
            stroke.to_rgb_hex(),
            stroke.opacity(),
        );
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let transform = self.transform_attr();
        let escaped = escape_xml(text);
        let DrawState { fill, font_px, .. } = self.state;
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{font_px}\" font-family=\"{FONT_FAMILY}\" fill=\"{}\" fill-opacity=\"{}\"{transform}>{escaped}</text>",
            at.x,
            at.y,
            fill.to_rgb_hex(),
            fill.opacity(),
        );
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_font_size(&mut self, px: f32) {
        self.state.font_px = px;
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale.0 *= sx;
        self.state.scale.1 *= sy;
    }

    fn reset_transform(&mut self) {
        self.state.scale = (1.0, 1.0);
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
