//! Scene store: committed drawables, the redo buffer and change notification.
//!
//! # History discipline
//!
//! - `committed` is in insertion order, which is also paint order.
//! - The redo buffer is only non-empty right after an undo; starting a new
//!   gesture or clearing empties it.
//! - Undo and redo move drawables between the two sequences, they never copy.
//!
//! Every successful mutation synchronously notifies the store's
//! [`SceneObserver`] before the mutating call returns.

use crate::{CursorPreview, Drawable, DrawableId, Point};

/// What changed in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    /// A new drawable was committed by a gesture start.
    GestureBegan(DrawableId),
    /// The active gesture's drawable received a new point.
    GestureExtended(DrawableId),
    /// A drawable moved from committed to the redo buffer.
    Undone(DrawableId),
    /// A drawable moved from the redo buffer back to committed.
    Redone(DrawableId),
    /// Both sequences were emptied.
    Cleared,
    /// Only the cursor preview changed.
    PreviewMoved,
}

/// Everything a repaint needs, borrowed from the store.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Committed drawables in paint order.
    pub committed: &'a [Drawable],
    /// The transient cursor preview.
    pub cursor: &'a CursorPreview,
}

/// Receives change notifications from a [`SceneStore`].
pub trait SceneObserver {
    /// Called after every successful mutation, in mutation order.
    fn scene_changed(&mut self, change: &SceneChange, frame: &Frame<'_>);
}

impl SceneObserver for () {
    fn scene_changed(&mut self, _change: &SceneChange, _frame: &Frame<'_>) {}
}

impl<F> SceneObserver for F
where
    F: FnMut(&SceneChange, &Frame<'_>),
{
    fn scene_changed(&mut self, change: &SceneChange, frame: &Frame<'_>) {
        self(change, frame);
    }
}

impl<A: SceneObserver, B: SceneObserver> SceneObserver for (A, B) {
    fn scene_changed(&mut self, change: &SceneChange, frame: &Frame<'_>) {
        self.0.scene_changed(change, frame);
        self.1.scene_changed(change, frame);
    }
}

/// An observer that records every change it sees.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    changes: Vec<SceneChange>,
}

impl ChangeLog {
    /// Changes seen so far, oldest first.
    #[must_use]
    pub fn changes(&self) -> &[SceneChange] {
        &self.changes
    }

    /// Number of notifications received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether no notification has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl SceneObserver for ChangeLog {
    fn scene_changed(&mut self, change: &SceneChange, _frame: &Frame<'_>) {
        self.changes.push(*change);
    }
}

/// Ordered committed drawables plus a redo buffer.
///
/// The store also carries the transient [`CursorPreview`] so observers
/// receive a complete [`Frame`]; the cursor is never part of history.
#[derive(Debug, Default)]
pub struct SceneStore<O = ()> {
    committed: Vec<Drawable>,
    redo_buffer: Vec<Drawable>,
    active: Option<DrawableId>,
    cursor: CursorPreview,
    observer: O,
}

impl SceneStore {
    /// Create an empty store without an observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: SceneObserver> SceneStore<O> {
    /// Create an empty store notifying `observer`.
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self {
            committed: Vec::new(),
            redo_buffer: Vec::new(),
            active: None,
            cursor: CursorPreview::default(),
            observer,
        }
    }

    /// Commit `drawable` as the start of a new gesture.
    ///
    /// Discards the redo buffer: redo history does not survive a new branch.
    pub fn begin_gesture(&mut self, drawable: Drawable) -> DrawableId {
        let id = drawable.id();
        let discarded = self.redo_buffer.len();
        self.redo_buffer.clear();
        tracing::debug!(
            "Begin {} {id} (discarded {discarded} redo entries)",
            drawable.kind_name()
        );
        self.committed.push(drawable);
        self.active = Some(id);
        self.notify(SceneChange::GestureBegan(id));
        id
    }

    /// Extend the active gesture's drawable with `point`.
    ///
    /// Returns `false` and does nothing when no gesture is active.
    pub fn extend_current(&mut self, point: Point) -> bool {
        let Some(id) = self.active else {
            tracing::trace!("Extend at {point} ignored: no active gesture");
            return false;
        };
        let Some(drawable) = self.committed.last_mut().filter(|d| d.id() == id) else {
            self.active = None;
            return false;
        };
        drawable.extend(point);
        tracing::trace!("Extend {id} to {point}");
        self.notify(SceneChange::GestureExtended(id));
        true
    }

    /// Finish the active gesture; its drawable becomes immutable history.
    pub fn end_gesture(&mut self) -> Option<DrawableId> {
        let id = self.active.take();
        if let Some(id) = id {
            tracing::trace!("End gesture {id}");
        }
        id
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn has_active_gesture(&self) -> bool {
        self.active.is_some()
    }

    /// Empty both committed drawables and the redo buffer.
    ///
    /// A clear cannot itself be undone.
    pub fn clear(&mut self) {
        tracing::debug!(
            "Clear scene ({} committed, {} redo)",
            self.committed.len(),
            self.redo_buffer.len()
        );
        self.committed.clear();
        self.redo_buffer.clear();
        self.active = None;
        self.notify(SceneChange::Cleared);
    }

    /// Move the most recent drawable to the redo buffer.
    ///
    /// Returns `None` (and notifies nobody) when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Drawable> {
        let drawable = self.committed.pop()?;
        let id = drawable.id();
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!("Undo {} {id}", drawable.kind_name());
        self.redo_buffer.push(drawable);
        self.notify(SceneChange::Undone(id));
        self.redo_buffer.last()
    }

    /// Move the most recently undone drawable back onto committed.
    ///
    /// Returns `None` (and notifies nobody) when the redo buffer is empty.
    pub fn redo(&mut self) -> Option<&Drawable> {
        let drawable = self.redo_buffer.pop()?;
        let id = drawable.id();
        tracing::debug!("Redo {} {id}", drawable.kind_name());
        self.committed.push(drawable);
        self.notify(SceneChange::Redone(id));
        self.committed.last()
    }

    /// Mutate the cursor preview and request a preview-only repaint.
    pub fn update_cursor(&mut self, update: impl FnOnce(&mut CursorPreview)) {
        update(&mut self.cursor);
        self.notify(SceneChange::PreviewMoved);
    }

    /// Mutate the cursor preview without notifying.
    ///
    /// Used when a history mutation follows immediately and its notification
    /// repaints the frame anyway.
    pub fn cursor_mut(&mut self) -> &mut CursorPreview {
        &mut self.cursor
    }

    /// The cursor preview.
    #[must_use]
    pub fn cursor(&self) -> &CursorPreview {
        &self.cursor
    }

    /// Committed drawables in paint order.
    #[must_use]
    pub fn committed(&self) -> &[Drawable] {
        &self.committed
    }

    /// Undone drawables, most recently undone last.
    #[must_use]
    pub fn redo_buffer(&self) -> &[Drawable] {
        &self.redo_buffer
    }

    /// Whether [`SceneStore::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Whether [`SceneStore::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Number of committed drawables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Whether nothing is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Borrow the current frame.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            committed: &self.committed,
            cursor: &self.cursor,
        }
    }

    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the store, returning its observer.
    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }

    fn notify(&mut self, change: SceneChange) {
        let frame = Frame {
            committed: &self.committed,
            cursor: &self.cursor,
        };
        self.observer.scene_changed(&change, &frame);
    }
}
