//! Static raster snapshots of committed drawables.
//!
//! An export replays the committed drawables through the same
//! [`Drawable::render`] contract as the live view, onto an off-screen
//! surface of `base size * scale` with an opaque background. The cursor
//! preview is never included and the scene is never mutated.

use std::str::FromStr;

use base64::Engine;
use sketchpad_core::{
    check_scale, render_drawables, Canvas, Color, Drawable, Point, SceneObserver, Surface,
};

use crate::error::{RenderError, RenderResult};
use crate::raster::{encode_jpeg, encode_png, Rasterizer};
use crate::SvgSurface;

/// Export output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    #[default]
    Png,
    /// JPEG image.
    Jpeg,
}

impl ExportFormat {
    /// MIME type.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// A watermark stamped in output pixels, unaffected by the export scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    /// Text to stamp.
    pub text: String,
    /// Offset from the bottom-left corner of the output image.
    pub offset: Point,
    /// Font size in output pixels.
    pub font_px: f32,
    /// Text color.
    pub color: Color,
}

impl Watermark {
    /// A watermark with default placement and style.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: Point::new(8.0, 8.0),
            font_px: 12.0,
            color: Color::rgba(0, 0, 0, 128),
        }
    }
}

/// Configuration for snapshot export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output format.
    pub format: ExportFormat,
    /// Background color; alpha is forced to opaque.
    pub background: Color,
    /// Optional watermark.
    pub watermark: Option<Watermark>,
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            background: Color::WHITE,
            watermark: None,
            jpeg_quality: 85,
        }
    }
}

/// An encoded export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Encoding format.
    pub format: ExportFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ExportedImage {
    /// Encode as a `data:` URI.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.format.mime_type())
    }
}

/// Renders committed drawables into static raster images.
#[derive(Debug, Default)]
pub struct SnapshotExporter {
    config: ExportConfig,
    rasterizer: Rasterizer,
}

impl SnapshotExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self::with_rasterizer(config, Rasterizer::new())
    }

    /// Create an exporter with an explicit rasterizer.
    #[must_use]
    pub fn with_rasterizer(config: ExportConfig, rasterizer: Rasterizer) -> Self {
        Self { config, rasterizer }
    }

    /// The exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a canvas's committed drawables at `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidScale`] for a non-positive or non-finite
    /// scale, or an error if rasterization or encoding fails.
    pub fn export_canvas<O: SceneObserver>(
        &self,
        canvas: &Canvas<O>,
        scale: f32,
    ) -> RenderResult<ExportedImage> {
        self.export(
            canvas.store().committed(),
            canvas.width(),
            canvas.height(),
            scale,
        )
    }

    /// Export `drawables` laid out on a `base_width` x `base_height` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidScale`] for a non-positive or non-finite
    /// scale, or an error if rasterization or encoding fails.
    pub fn export(
        &self,
        drawables: &[Drawable],
        base_width: f32,
        base_height: f32,
        scale: f32,
    ) -> RenderResult<ExportedImage> {
        let pixmap = self.snapshot_pixmap(drawables, base_width, base_height, scale)?;
        let (width, height) = (pixmap.width(), pixmap.height());
        let bytes = match self.config.format {
            ExportFormat::Png => encode_png(&pixmap)?,
            ExportFormat::Jpeg => {
                encode_jpeg(&pixmap, self.config.jpeg_quality, self.background())?
            }
        };
        tracing::debug!(
            "Exported {} drawables as {width}x{height} {:?} ({} bytes)",
            drawables.len(),
            self.config.format,
            bytes.len()
        );
        Ok(ExportedImage {
            bytes,
            format: self.config.format,
            width,
            height,
        })
    }

    /// Rasterize the snapshot without encoding it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidScale`] for a non-positive or non-finite
    /// scale, or an error if rasterization fails.
    pub fn snapshot_pixmap(
        &self,
        drawables: &[Drawable],
        base_width: f32,
        base_height: f32,
        scale: f32,
    ) -> RenderResult<tiny_skia::Pixmap> {
        let surface = self.snapshot_surface(drawables, base_width, base_height, scale)?;
        self.rasterizer.rasterize(&surface)
    }

    /// Build the snapshot's SVG surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidScale`] for a non-positive or non-finite
    /// scale.
    pub fn snapshot_surface(
        &self,
        drawables: &[Drawable],
        base_width: f32,
        base_height: f32,
        scale: f32,
    ) -> RenderResult<SvgSurface> {
        let scale = check_scale(scale).map_err(|e| {
            tracing::warn!("Rejected export: {e}");
            RenderError::InvalidScale(scale)
        })?;

        let background = self.background();
        let mut surface = SvgSurface::new(
            (base_width * scale).round().max(1.0),
            (base_height * scale).round().max(1.0),
        );
        paint_snapshot(
            &mut surface,
            drawables,
            scale,
            background,
            self.config.watermark.as_ref(),
        );
        Ok(surface)
    }

    fn background(&self) -> Color {
        Color {
            a: 255,
            ..self.config.background
        }
    }
}

/// Paint a snapshot onto any surface sized `base * scale`.
///
/// The watermark is drawn in its own saved state with the transform reset,
/// so the scale does not distort its size or position.
pub fn paint_snapshot(
    surface: &mut dyn Surface,
    drawables: &[Drawable],
    scale: f32,
    background: Color,
    watermark: Option<&Watermark>,
) {
    let (width, height) = (surface.width(), surface.height());
    surface.save();
    surface.set_fill_color(background);
    surface.fill_rect(0.0, 0.0, width, height);
    surface.scale(scale, scale);
    render_drawables(surface, drawables);
    surface.restore();

    if let Some(mark) = watermark {
        surface.save();
        surface.reset_transform();
        surface.set_font_size(mark.font_px);
        surface.set_fill_color(mark.color);
        surface.fill_text(&mark.text, Point::new(mark.offset.x, height - mark.offset.y));
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::{DrawCommand, RecordingSurface, Sticker, Stroke};

    fn exporter(config: ExportConfig) -> SnapshotExporter {
        SnapshotExporter::with_rasterizer(config, Rasterizer::without_fonts())
    }

    fn diagonal() -> Drawable {
        let mut stroke = Stroke::new(Point::new(10.0, 10.0), 2.0, Color::BLACK);
        stroke.extend(Point::new(20.0, 20.0));
        stroke.into()
    }

    #[test]
    fn test_rejects_invalid_scale() {
        let exporter = exporter(ExportConfig::default());
        for scale in [0.0, -1.0, f32::NAN] {
            assert!(matches!(
                exporter.export(&[], 256.0, 256.0, scale),
                Err(RenderError::InvalidScale(_))
            ));
        }

        let err = exporter
            .export(&[], 256.0, 256.0, -2.5)
            .expect_err("negative scale");
        assert!(matches!(err, RenderError::InvalidScale(s) if (s + 2.5).abs() < f32::EPSILON));
        assert!(err.to_string().contains("-2.5"));
    }

    #[test]
    fn test_output_dimensions_scale() {
        let exporter = exporter(ExportConfig::default());
        let image = exporter
            .export(&[diagonal()], 256.0, 256.0, 4.0)
            .expect("export");
        assert_eq!((image.width, image.height), (1024, 1024));
        assert_eq!(&image.bytes[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_paint_order_and_watermark_state() {
        let mut surface = RecordingSurface::new(512.0, 512.0);
        let mark = Watermark::new("Title");
        paint_snapshot(
            &mut surface,
            &[Sticker::new(Point::new(5.0, 5.0), "🐸").into()],
            2.0,
            Color::WHITE,
            Some(&mark),
        );

        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::Save);
        assert_eq!(
            commands[2],
            DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 512.0,
                height: 512.0
            }
        );
        assert_eq!(commands[3], DrawCommand::Scale { sx: 2.0, sy: 2.0 });

        let reset = commands
            .iter()
            .position(|c| *c == DrawCommand::ResetTransform)
            .expect("watermark resets transform");
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Restore),
            "watermark state restored"
        );
        assert!(commands[reset..].contains(&DrawCommand::FillText {
            text: "Title".to_string(),
            at: Point::new(8.0, 504.0),
        }));
    }

    #[test]
    fn test_data_uri() {
        let image = ExportedImage {
            bytes: vec![1, 2, 3],
            format: ExportFormat::Png,
            width: 1,
            height: 1,
        };
        assert_eq!(image.to_data_uri(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!("jpg".parse::<ExportFormat>(), Ok(ExportFormat::Jpeg));
        assert!("svg".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
    }
}
