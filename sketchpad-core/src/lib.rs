//! # Sketchpad Core
//!
//! Scene model and redraw pipeline for a fixed-size sketchpad: free-hand
//! strokes and stickers with whole-gesture undo/redo.
//!
//! ## Architecture
//!
//! ```text
//! pointer events ──▶ GestureTranslator ──▶ SceneStore ──▶ SceneObserver
//!                          ▲                  │              (LiveView
//!                   ToolSelection        committed /          repaints a
//!                   (toolbar-owned)      redo buffer          Surface)
//! ```
//!
//! Everything is single-threaded: each event is handled to completion,
//! including the synchronous repaint, before the next is accepted.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod color;
pub mod cursor;
pub mod drawable;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod render;
pub mod scene;
pub mod surface;
pub mod tool;

pub use canvas::{Canvas, DEFAULT_CANVAS_SIZE};
pub use color::Color;
pub use cursor::CursorPreview;
pub use drawable::{Drawable, DrawableId, GlyphClass, Sticker, Stroke};
pub use error::{check_scale, CanvasError, CanvasResult};
pub use event::{PointerEvent, PointerPhase};
pub use geometry::Point;
pub use gesture::{GestureState, GestureTranslator};
pub use render::{render_drawables, repaint, LiveView};
pub use scene::{ChangeLog, Frame, SceneChange, SceneObserver, SceneStore};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use tool::{
    GlyphMetrics, StickerPalette, Thickness, ToolKind, ToolSelection, DEFAULT_STICKERS,
    MARKER_PREVIEW_GLYPH,
};

/// Sketchpad core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
