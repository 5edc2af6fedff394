//! Translates raw pointer events into scene-store mutations.
//!
//! ```text
//!            enter/move                 down
//!   Idle ───────────────▶ Hovering ──────────────▶ Gesturing
//!    ▲                      │  ▲                       │
//!    └──────── leave ───────┘  └───────── up ──────────┤
//!    ▲                                                 │
//!    └──────────── leave (ends the gesture) ───────────┘
//! ```
//!
//! Leaving the surface while pressed ends the gesture exactly like a
//! pointer-up; the drawable is committed history from then on.

use crate::{PointerEvent, PointerPhase, SceneObserver, SceneStore, ToolSelection};

/// Translator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureState {
    /// Pointer is outside the surface.
    #[default]
    Idle,
    /// Pointer is over the surface, no button held.
    Hovering,
    /// A gesture is in progress.
    Gesturing,
}

/// Pointer-event state machine driving a [`SceneStore`].
#[derive(Debug, Clone, Default)]
pub struct GestureTranslator {
    state: GestureState,
}

impl GestureTranslator {
    /// Create an idle translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Handle one pointer event to completion.
    ///
    /// `tools` is read when a gesture starts and to refresh the cursor
    /// preview; it is never modified.
    pub fn handle<O: SceneObserver>(
        &mut self,
        event: PointerEvent,
        tools: &ToolSelection,
        store: &mut SceneStore<O>,
    ) {
        let at = event.position();
        match (event.phase, self.state) {
            (PointerPhase::Enter | PointerPhase::Move, GestureState::Gesturing) => {
                store.cursor_mut().location = at;
                store.extend_current(at);
            }
            (PointerPhase::Enter, _) | (PointerPhase::Move, GestureState::Hovering) => {
                self.state = GestureState::Hovering;
                store.update_cursor(|cursor| {
                    cursor.sync_tools(tools);
                    cursor.location = at;
                    cursor.active = true;
                });
            }
            (PointerPhase::Move, GestureState::Idle) => {
                tracing::trace!("Move at {at} ignored while idle");
            }
            (PointerPhase::Down, state) => {
                if state == GestureState::Gesturing {
                    store.end_gesture();
                }
                self.state = GestureState::Gesturing;
                let cursor = store.cursor_mut();
                cursor.sync_tools(tools);
                cursor.location = at;
                cursor.active = true;
                cursor.pressed = true;
                store.begin_gesture(tools.drawable_at(at));
            }
            (PointerPhase::Up, GestureState::Gesturing) => {
                store.end_gesture();
                self.state = GestureState::Hovering;
                store.update_cursor(|cursor| {
                    cursor.location = at;
                    cursor.active = true;
                    cursor.pressed = false;
                });
            }
            (PointerPhase::Up, state) => {
                tracing::trace!("Up at {at} outside a gesture ({state:?})");
                store.cursor_mut().pressed = false;
            }
            (PointerPhase::Leave, state) => {
                if state == GestureState::Gesturing {
                    tracing::debug!("Pointer left at {at} while pressed, ending gesture");
                    store.end_gesture();
                }
                self.state = GestureState::Idle;
                store.update_cursor(|cursor| {
                    cursor.location = at;
                    cursor.active = false;
                    cursor.pressed = false;
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangeLog, Drawable, Point, SceneChange};

    fn run(
        events: &[PointerEvent],
        tools: &ToolSelection,
    ) -> (GestureTranslator, SceneStore<ChangeLog>) {
        let mut translator = GestureTranslator::new();
        let mut store = SceneStore::with_observer(ChangeLog::default());
        for event in events {
            translator.handle(*event, tools, &mut store);
        }
        (translator, store)
    }

    #[test]
    fn test_stroke_scenario() {
        let tools = ToolSelection::default();
        let (translator, store) = run(
            &[
                PointerEvent::enter(10.0, 10.0),
                PointerEvent::down(10.0, 10.0),
                PointerEvent::moved(20.0, 10.0),
                PointerEvent::moved(20.0, 20.0),
                PointerEvent::up(20.0, 20.0),
            ],
            &tools,
        );

        assert_eq!(translator.state(), GestureState::Hovering);
        assert_eq!(store.len(), 1);
        let Drawable::Stroke(stroke) = &store.committed()[0] else {
            panic!("expected stroke");
        };
        assert_eq!(
            stroke.points(),
            &[
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(20.0, 20.0)
            ]
        );
        assert!(store.cursor().is_visible());
    }

    #[test]
    fn test_sticker_drag_repositions() {
        let mut tools = ToolSelection::default();
        tools.select_sticker("A");
        let (_, store) = run(
            &[
                PointerEvent::down(5.0, 5.0),
                PointerEvent::moved(8.0, 8.0),
                PointerEvent::up(8.0, 8.0),
            ],
            &tools,
        );

        let Drawable::Sticker(sticker) = &store.committed()[0] else {
            panic!("expected sticker");
        };
        assert_eq!(sticker.location, Point::new(8.0, 8.0));
        assert_eq!(sticker.glyph, "A");
    }

    #[test]
    fn test_hover_is_preview_only() {
        let tools = ToolSelection::default();
        let (translator, store) = run(
            &[PointerEvent::enter(1.0, 1.0), PointerEvent::moved(2.0, 2.0)],
            &tools,
        );
        assert_eq!(translator.state(), GestureState::Hovering);
        assert!(store.is_empty());
        assert_eq!(
            store.observer().changes(),
            &[SceneChange::PreviewMoved, SceneChange::PreviewMoved]
        );
        assert_eq!(store.cursor().location, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_move_while_idle_ignored() {
        let tools = ToolSelection::default();
        let (_, store) = run(&[PointerEvent::moved(3.0, 3.0)], &tools);
        assert!(store.observer().is_empty());
        assert!(!store.cursor().active);
    }

    #[test]
    fn test_leave_while_pressed_ends_gesture() {
        let tools = ToolSelection::default();
        let (translator, mut store) = run(
            &[
                PointerEvent::enter(0.0, 0.0),
                PointerEvent::down(1.0, 1.0),
                PointerEvent::moved(2.0, 2.0),
                PointerEvent::leave(3.0, 3.0),
            ],
            &tools,
        );
        assert_eq!(translator.state(), GestureState::Idle);
        assert!(!store.has_active_gesture());
        assert!(!store.cursor().active);
        assert!(!store.cursor().pressed);

        // Re-entering does not resume the stroke
        let mut translator = translator;
        translator.handle(PointerEvent::enter(4.0, 4.0), &tools, &mut store);
        translator.handle(PointerEvent::moved(5.0, 5.0), &tools, &mut store);
        let Drawable::Stroke(stroke) = &store.committed()[0] else {
            panic!("expected stroke");
        };
        assert_eq!(stroke.points().len(), 2);
    }

    #[test]
    fn test_up_while_idle_keeps_cursor_hidden() {
        let tools = ToolSelection::default();
        let (translator, store) = run(&[PointerEvent::up(300.0, 300.0)], &tools);
        assert_eq!(translator.state(), GestureState::Idle);
        assert!(!store.cursor().active);
        assert!(!store.cursor().is_visible());
        assert!(store.is_empty());
        assert!(store.observer().is_empty());

        // After leaving, a release off-surface does not revive the preview
        let (translator, store) = run(
            &[
                PointerEvent::enter(10.0, 10.0),
                PointerEvent::leave(-1.0, 10.0),
                PointerEvent::up(-5.0, 10.0),
            ],
            &tools,
        );
        assert_eq!(translator.state(), GestureState::Idle);
        assert!(!store.cursor().is_visible());
    }

    #[test]
    fn test_up_while_hovering_only_releases() {
        let tools = ToolSelection::default();
        let (translator, store) = run(
            &[PointerEvent::enter(10.0, 10.0), PointerEvent::up(12.0, 12.0)],
            &tools,
        );
        assert_eq!(translator.state(), GestureState::Hovering);
        assert!(store.cursor().is_visible());
        assert_eq!(store.cursor().location, Point::new(10.0, 10.0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_click_without_move_commits_degenerate_stroke() {
        let tools = ToolSelection::default();
        let (_, store) = run(
            &[PointerEvent::down(7.0, 7.0), PointerEvent::up(7.0, 7.0)],
            &tools,
        );
        assert_eq!(store.len(), 1);
        let Drawable::Stroke(stroke) = &store.committed()[0] else {
            panic!("expected stroke");
        };
        assert_eq!(stroke.points(), &[Point::new(7.0, 7.0)]);
    }

    #[test]
    fn test_pressed_cursor_hidden_during_gesture() {
        let tools = ToolSelection::default();
        let (_, store) = run(
            &[PointerEvent::enter(0.0, 0.0), PointerEvent::down(1.0, 1.0)],
            &tools,
        );
        assert!(store.cursor().active);
        assert!(store.cursor().pressed);
        assert!(!store.cursor().is_visible());
    }

    #[test]
    fn test_tool_change_applies_to_next_gesture_only() {
        let mut tools = ToolSelection::default();
        let mut translator = GestureTranslator::new();
        let mut store = SceneStore::new();
        translator.handle(PointerEvent::down(0.0, 0.0), &tools, &mut store);
        translator.handle(PointerEvent::moved(1.0, 1.0), &tools, &mut store);
        translator.handle(PointerEvent::up(1.0, 1.0), &tools, &mut store);

        tools.cycle_thickness();
        tools.select_sticker("🐸");
        translator.handle(PointerEvent::down(9.0, 9.0), &tools, &mut store);
        translator.handle(PointerEvent::up(9.0, 9.0), &tools, &mut store);

        let Drawable::Stroke(first) = &store.committed()[0] else {
            panic!("expected stroke");
        };
        assert!((first.width - 2.0).abs() < f32::EPSILON);
        assert!(matches!(store.committed()[1], Drawable::Sticker(_)));
    }
}
