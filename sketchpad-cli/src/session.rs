//! Replays a script against a live canvas and writes the results.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use sketchpad_core::{Canvas, ToolSelection};
use sketchpad_renderer::{
    live_view, ExportConfig, ExportedImage, LiveSvgView, Rasterizer, SnapshotExporter, Watermark,
};

use crate::script::{Step, ToolChoice};
use crate::SessionConfig;

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Drawables committed at the end.
    pub committed: usize,
    /// Drawables left in the redo buffer.
    pub redo: usize,
    /// Live repaints performed.
    pub repaints: u64,
    /// Files written, in order.
    pub outputs: Vec<PathBuf>,
}

/// A headless drawing session.
pub struct Session {
    config: SessionConfig,
    canvas: Canvas<LiveSvgView>,
    tools: ToolSelection,
    exporter: SnapshotExporter,
    rasterizer: Rasterizer,
    exports: usize,
    outputs: Vec<PathBuf>,
}

impl Session {
    /// Start a session with an empty canvas.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let rasterizer = || {
            if config.system_fonts {
                Rasterizer::new()
            } else {
                Rasterizer::without_fonts()
            }
        };
        let export_config = ExportConfig {
            format: config.format,
            watermark: config.watermark.then(|| Watermark::new(config.title.clone())),
            ..ExportConfig::default()
        };
        let size = config.size;
        Self {
            canvas: Canvas::with_observer(size, size, live_view(size, size)),
            tools: ToolSelection::default(),
            exporter: SnapshotExporter::with_rasterizer(export_config, rasterizer()),
            rasterizer: rasterizer(),
            exports: 0,
            outputs: Vec::new(),
            config,
        }
    }

    /// The canvas being drawn on.
    #[must_use]
    pub fn canvas(&self) -> &Canvas<LiveSvgView> {
        &self.canvas
    }

    /// The current tool selection.
    #[must_use]
    pub fn tools(&self) -> &ToolSelection {
        &self.tools
    }

    /// Apply one step to completion.
    ///
    /// # Errors
    ///
    /// Returns an error for steps the toolbar could not have produced
    /// (unknown sticker, blank custom sticker) or when an export fails.
    pub fn apply(&mut self, step: &Step) -> anyhow::Result<()> {
        match step {
            Step::Pointer(event) => self.canvas.pointer(*event, &self.tools),
            Step::Tool(ToolChoice::Marker) => {
                self.tools.select_marker();
                self.canvas.tools_changed(&self.tools);
            }
            Step::Tool(ToolChoice::Sticker(glyph)) => {
                if !self.canvas.palette().contains(glyph) {
                    bail!("sticker {glyph:?} is not in the palette");
                }
                self.tools.select_sticker(glyph.clone());
                self.canvas.tools_changed(&self.tools);
            }
            Step::CycleThickness => {
                let tier = self.tools.cycle_thickness();
                tracing::debug!("Thickness now {tier:?}");
                self.canvas.tools_changed(&self.tools);
            }
            Step::Color(color) => {
                self.tools.color = *color;
                self.canvas.tools_changed(&self.tools);
            }
            Step::CustomSticker(text) => {
                let glyph = self.canvas.add_custom_sticker(text)?;
                self.tools.select_sticker(glyph);
                self.canvas.tools_changed(&self.tools);
            }
            Step::Undo => {
                if !self.canvas.undo() {
                    tracing::debug!("Nothing to undo");
                }
            }
            Step::Redo => {
                if !self.canvas.redo() {
                    tracing::debug!("Nothing to redo");
                }
            }
            Step::Clear => self.canvas.clear(),
            Step::Export { scale } => {
                self.exports += 1;
                let image = self.exporter.export_canvas(&self.canvas, *scale)?;
                let name = format!("export-{}.{}", self.exports, image.format.extension());
                self.write(&name, &image)?;
            }
        }
        Ok(())
    }

    /// Apply every step, then write the final export (and live frame).
    ///
    /// # Errors
    ///
    /// Returns an error if a step fails or an output cannot be written.
    pub fn run(mut self, steps: &[Step]) -> anyhow::Result<SessionReport> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(step)
                .with_context(|| format!("step {index} ({step:?}) failed"))?;
        }
        self.finish()
    }

    /// Write the final export (and live frame) and report.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn finish(mut self) -> anyhow::Result<SessionReport> {
        let image = self
            .exporter
            .export_canvas(&self.canvas, self.config.scale)?;
        let name = format!("sketch.{}", image.format.extension());
        self.write(&name, &image)?;

        if self.config.live_frame {
            let png = self.rasterizer.to_png(self.canvas.observer().surface())?;
            let path = self.config.out_dir.join("live.png");
            write_file(&path, &png)?;
            self.outputs.push(path);
        }

        let store = self.canvas.store();
        let report = SessionReport {
            committed: store.len(),
            redo: store.redo_buffer().len(),
            repaints: self.canvas.observer().repaint_count(),
            outputs: self.outputs,
        };
        tracing::info!(
            "Session finished: {} committed, {} redo, {} repaints, {} files",
            report.committed,
            report.redo,
            report.repaints,
            report.outputs.len()
        );
        Ok(report)
    }

    fn write(&mut self, name: &str, image: &ExportedImage) -> anyhow::Result<()> {
        let path = self.config.out_dir.join(name);
        write_file(&path, &image.bytes)?;
        tracing::info!(
            "Wrote {}x{} export to {}",
            image.width,
            image.height,
            path.display()
        );
        self.outputs.push(path);
        Ok(())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
