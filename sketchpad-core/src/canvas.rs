//! Drawing session: the scene store, gesture translator and sticker palette
//! behind one handle.

use crate::{
    CanvasResult, Frame, GestureState, GestureTranslator, PointerEvent, SceneObserver,
    SceneStore, StickerPalette, ToolSelection,
};

/// Default canvas edge length in pixels.
pub const DEFAULT_CANVAS_SIZE: f32 = 256.0;

/// A fixed-size drawing session.
#[derive(Debug)]
pub struct Canvas<O = ()> {
    width: f32,
    height: f32,
    store: SceneStore<O>,
    gestures: GestureTranslator,
    palette: StickerPalette,
}

impl Canvas {
    /// Create a canvas without an observer.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_observer(width, height, ())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }
}

impl<O: SceneObserver> Canvas<O> {
    /// Create a canvas whose store notifies `observer`.
    #[must_use]
    pub fn with_observer(width: f32, height: f32, observer: O) -> Self {
        Self {
            width,
            height,
            store: SceneStore::with_observer(observer),
            gestures: GestureTranslator::new(),
            palette: StickerPalette::default(),
        }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Feed one pointer event through the gesture translator.
    pub fn pointer(&mut self, event: PointerEvent, tools: &ToolSelection) {
        self.gestures.handle(event, tools, &mut self.store);
    }

    /// Refresh the cursor preview after the toolbar changed `tools`.
    ///
    /// Only repaints when the preview is on screen.
    pub fn tools_changed(&mut self, tools: &ToolSelection) {
        if self.store.cursor().is_visible() {
            self.store.update_cursor(|cursor| cursor.sync_tools(tools));
        } else {
            self.store.cursor_mut().sync_tools(tools);
        }
    }

    /// Undo the most recent gesture. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        self.store.undo().is_some()
    }

    /// Redo the most recently undone gesture. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        self.store.redo().is_some()
    }

    /// Discard all drawables and redo history.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Register a custom sticker glyph and return it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::EmptyGlyph`] for blank text.
    pub fn add_custom_sticker(&mut self, text: &str) -> CanvasResult<String> {
        self.palette.add_custom(text).map(ToString::to_string)
    }

    /// Stickers offered by the toolbar.
    #[must_use]
    pub fn palette(&self) -> &StickerPalette {
        &self.palette
    }

    /// Read-only access to the scene store.
    #[must_use]
    pub fn store(&self) -> &SceneStore<O> {
        &self.store
    }

    /// The current frame.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        self.store.frame()
    }

    /// Gesture translator state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    /// The store's observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        self.store.observer()
    }

    /// Consume the canvas, returning the store's observer.
    #[must_use]
    pub fn into_observer(self) -> O {
        self.store.into_observer()
    }
}
