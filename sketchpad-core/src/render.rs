//! Full-surface repaint pipeline.
//!
//! Every change repaints everything: clear, committed drawables in
//! insertion order (later ones occlude earlier ones), then the cursor
//! preview on top when it is visible. There is no dirty-rect tracking.

use crate::{Drawable, Frame, SceneChange, SceneObserver, Surface};

/// Render committed drawables back-to-front without clearing.
pub fn render_drawables(surface: &mut dyn Surface, drawables: &[Drawable]) {
    for drawable in drawables {
        drawable.render(surface);
    }
}

/// Clear `surface` and paint `frame` onto it.
pub fn repaint(surface: &mut dyn Surface, frame: &Frame<'_>) {
    surface.clear();
    render_drawables(surface, frame.committed);
    frame.cursor.render(surface);
    tracing::trace!(
        "Repainted {} drawables (preview visible: {})",
        frame.committed.len(),
        frame.cursor.is_visible()
    );
}

/// A live surface repainted on every scene change.
#[derive(Debug, Clone, Default)]
pub struct LiveView<S> {
    surface: S,
    repaints: u64,
}

impl<S: Surface> LiveView<S> {
    /// Wrap a surface.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            repaints: 0,
        }
    }

    /// The surface as of the last repaint.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of repaints performed.
    #[must_use]
    pub fn repaint_count(&self) -> u64 {
        self.repaints
    }

    /// Repaint immediately, outside of a change notification.
    pub fn refresh(&mut self, frame: &Frame<'_>) {
        repaint(&mut self.surface, frame);
        self.repaints += 1;
    }

    /// Unwrap the surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: Surface> SceneObserver for LiveView<S> {
    fn scene_changed(&mut self, change: &SceneChange, frame: &Frame<'_>) {
        tracing::trace!("Repaint for {change:?}");
        self.refresh(frame);
    }
}
