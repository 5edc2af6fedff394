//! SVG rasterization and image encoding.

use image::ImageEncoder;
use sketchpad_core::Color;

use crate::error::{RenderError, RenderResult};
use crate::SvgSurface;

/// Rasterizes [`SvgSurface`] documents with resvg into tiny-skia pixmaps.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("fonts", &self.options.fontdb.len())
            .finish()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Create a rasterizer with the system font database loaded.
    #[must_use]
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!("Loaded {} font faces", options.fontdb.len());
        Self { options }
    }

    /// Create a rasterizer with no fonts; text nodes render as nothing.
    #[must_use]
    pub fn without_fonts() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Rasterize a surface at its own pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup is rejected or the pixmap cannot be
    /// allocated.
    pub fn rasterize(&self, surface: &SvgSurface) -> RenderResult<tiny_skia::Pixmap> {
        let svg = surface.to_svg();
        let tree = usvg::Tree::from_str(&svg, &self.options)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let (width, height) = surface.pixel_size();
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        tracing::trace!("Rasterized {width}x{height} surface");
        Ok(pixmap)
    }

    /// Rasterize a surface and encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or encoding fails.
    pub fn to_png(&self, surface: &SvgSurface) -> RenderResult<Vec<u8>> {
        encode_png(&self.rasterize(surface)?)
    }
}

/// Encode a pixmap as PNG.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if encoding fails.
pub fn encode_png(pixmap: &tiny_skia::Pixmap) -> RenderResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
}

/// Encode a pixmap as JPEG, compositing any transparency over `background`.
///
/// # Errors
///
/// Returns [`RenderError::Encode`] if encoding fails.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn encode_jpeg(
    pixmap: &tiny_skia::Pixmap,
    quality: u8,
    background: Color,
) -> RenderResult<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let bg = [background.r, background.g, background.b];
    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    // Pixmap data is premultiplied, so the source term needs no alpha factor.
    for pixel in pixmap.data().chunks_exact(4) {
        let inv = 1.0 - f32::from(pixel[3]) / 255.0;
        for channel in 0..3 {
            let value = f32::from(bg[channel]).mul_add(inv, f32::from(pixel[channel]));
            rgb_data.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
        .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}
