//! # Sketchpad CLI
//!
//! Headless host for the sketchpad core. It stands in for the browser
//! shell: a recorded script supplies pointer events and toolbar actions,
//! a live SVG surface is repainted on every change, and exports are
//! written to disk.
//!
//! ## Usage
//!
//! ```bash
//! sketchpad session.json --out-dir out --scale 4 --live-frame
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;
pub mod session;

use std::path::PathBuf;

use clap::Parser;
use sketchpad_core::DEFAULT_CANVAS_SIZE;
use sketchpad_renderer::ExportFormat;

pub use script::{load_script, parse_script, ScriptError, Step, ToolChoice};
pub use session::{Session, SessionReport};

/// Application title, also used as the export watermark.
pub const APP_TITLE: &str = "D's Rawing App";

/// Command-line arguments for sketchpad.
#[derive(Debug, Clone, Parser)]
#[command(name = "sketchpad")]
#[command(about = "Replay a recorded sketchpad session and export it")]
#[command(version)]
pub struct CliArgs {
    /// Session script (JSON array of steps)
    pub script: PathBuf,

    /// Directory for exported images
    #[arg(long, env = "SKETCHPAD_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Canvas edge length in pixels
    #[arg(long, default_value = "256")]
    pub size: u32,

    /// Scale factor of the final export
    #[arg(long, default_value = "4")]
    pub scale: f32,

    /// Export format (png or jpeg)
    #[arg(long, default_value = "png")]
    pub format: ExportFormat,

    /// Title stamped on exports
    #[arg(long, default_value = APP_TITLE)]
    pub title: String,

    /// Do not stamp the title on exports
    #[arg(long)]
    pub no_watermark: bool,

    /// Also write the final live frame as live.png
    #[arg(long)]
    pub live_frame: bool,
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Canvas edge length in pixels.
    pub size: f32,
    /// Scale factor of the final export.
    pub scale: f32,
    /// Export format.
    pub format: ExportFormat,
    /// Application title.
    pub title: String,
    /// Whether exports carry the title watermark.
    pub watermark: bool,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Whether to write the live frame.
    pub live_frame: bool,
    /// Whether to load system fonts for text rendering.
    pub system_fonts: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: DEFAULT_CANVAS_SIZE,
            scale: 4.0,
            format: ExportFormat::Png,
            title: APP_TITLE.to_string(),
            watermark: true,
            out_dir: PathBuf::from("."),
            live_frame: false,
            system_fonts: true,
        }
    }
}

impl From<CliArgs> for SessionConfig {
    #[allow(clippy::cast_precision_loss)]
    fn from(args: CliArgs) -> Self {
        Self {
            size: args.size.max(1) as f32,
            scale: args.scale,
            format: args.format,
            title: args.title,
            watermark: !args.no_watermark,
            out_dir: args.out_dir,
            live_frame: args.live_frame,
            system_fonts: true,
        }
    }
}

/// Replay `steps` under `config`.
///
/// # Errors
///
/// Returns an error if a step fails or an output cannot be written.
pub fn run(config: SessionConfig, steps: &[Step]) -> anyhow::Result<SessionReport> {
    tracing::info!(
        "Replaying {} steps on a {}x{} canvas",
        steps.len(),
        config.size,
        config.size
    );
    Session::new(config).run(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_into_config() {
        let args = CliArgs::parse_from([
            "sketchpad",
            "session.json",
            "--size",
            "128",
            "--scale",
            "2",
            "--format",
            "jpeg",
            "--no-watermark",
        ]);
        let config = SessionConfig::from(args);
        assert!((config.size - 128.0).abs() < f32::EPSILON);
        assert!((config.scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.format, ExportFormat::Jpeg);
        assert!(!config.watermark);
        assert_eq!(config.title, APP_TITLE);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = CliArgs::try_parse_from(["sketchpad", "s.json", "--format", "svg"]);
        assert!(result.is_err());
    }
}
