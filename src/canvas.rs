//! The drawing canvas: pointer gestures in, render snapshots out.
//!
//! [`Canvas`] ties together the live brush template, the [`StrokeBuilder`] for
//! the gesture in progress and the [`StrokeHistory`] of committed strokes. It
//! is `Send + Sync`, so the input side and the renderer can share it through an
//! `Arc`.
//!
//! Locks are always taken gesture state first, history second. Events are
//! emitted once both are released.

use egui::Color32;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::attributes::PaintAttributes;
use crate::builder::StrokeBuilder;
use crate::config::CanvasConfig;
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::history::{HistoryChange, StrokeHistory};
use crate::path::StrokePath;
use crate::stroke::Stroke;

#[derive(Debug, Default)]
struct GestureState {
    builder: StrokeBuilder,
    attributes: PaintAttributes,
    active: bool,
}

/// Everything a renderer needs for one frame, copied out under the locks.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    /// Committed strokes in draw order
    pub strokes: Vec<Stroke>,
    /// Path of the gesture in progress, if any
    pub in_progress: Option<StrokePath>,
    /// Template the in-progress path is drawn with
    pub live_attributes: PaintAttributes,
}

impl RenderSnapshot {
    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty() && self.in_progress.is_none()
    }
}

#[derive(Debug)]
pub struct Canvas {
    history: StrokeHistory,
    gesture: Mutex<GestureState>,
    events: EventBus,
    background: Color32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl Canvas {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            history: StrokeHistory::new(),
            gesture: Mutex::new(GestureState {
                attributes: config.initial_attributes(),
                ..Default::default()
            }),
            events: EventBus::new(),
            background: config.background,
        }
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Register an event handler. Handlers may call back into the canvas;
    /// events raised from inside a handler are delivered after the current one.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    // ---- gestures ----

    /// Pointer down. Starts a fresh path and invalidates redo.
    pub fn on_gesture_start(&self, x: f32, y: f32) {
        let change = {
            let mut gesture = self.gesture.lock();
            gesture.builder.begin(x, y);
            gesture.active = true;
            self.history.new_gesture()
        };

        let redo_discarded = match change {
            HistoryChange::RedoDiscarded { strokes } => strokes,
            _ => 0,
        };
        debug!("Gesture started at ({x}, {y})");
        self.events.emit(CanvasEvent::GestureStarted { redo_discarded });
    }

    /// Pointer move. Ignored when no gesture is active.
    pub fn on_gesture_move(&self, x: f32, y: f32) {
        {
            let mut gesture = self.gesture.lock();
            if !gesture.active {
                return;
            }
            gesture.builder.extend(x, y);
        }
        self.events.emit(CanvasEvent::GestureMoved);
    }

    /// Pointer up. Commits the finished path with a copy of the current
    /// template. Ignored when no gesture is active.
    pub fn on_gesture_end(&self) {
        let id = {
            let mut gesture = self.gesture.lock();
            if !gesture.active {
                return;
            }
            gesture.active = false;
            let path = gesture.builder.finish();
            // Committed while still holding the gesture lock so a renderer
            // sees the stroke either in progress or committed, never neither.
            self.history.commit(path, gesture.attributes)
        };

        info!("Committed {id}");
        self.events.emit(CanvasEvent::StrokeCommitted { id });
    }

    // ---- history ----

    pub fn undo(&self) {
        match self.history.undo() {
            HistoryChange::Undone(id) => self.events.emit(CanvasEvent::StrokeUndone { id }),
            HistoryChange::ClearRestored { strokes } => {
                info!("Restored {strokes} strokes after clear");
                self.events.emit(CanvasEvent::ClearRestored { strokes });
            }
            _ => {}
        }
    }

    pub fn redo(&self) {
        if let HistoryChange::Redone(id) = self.history.redo() {
            self.events.emit(CanvasEvent::StrokeRedone { id });
        }
    }

    /// Clear the canvas, dropping any gesture in progress. A following undo
    /// brings the cleared strokes back.
    pub fn clear(&self) {
        let (change, dropped_gesture) = {
            let mut gesture = self.gesture.lock();
            let dropped_gesture = gesture.active;
            gesture.builder.reset();
            gesture.active = false;
            (self.history.clear(), dropped_gesture)
        };

        let strokes = match change {
            HistoryChange::Cleared { strokes } => strokes,
            _ if dropped_gesture => 0,
            _ => return,
        };
        info!("Cleared canvas ({strokes} strokes)");
        self.events.emit(CanvasEvent::Cleared { strokes });
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- brush template ----

    pub fn attributes(&self) -> PaintAttributes {
        self.gesture.lock().attributes
    }

    pub fn is_eraser_on(&self) -> bool {
        self.gesture.lock().attributes.is_eraser()
    }

    /// Change the brush color. The alpha of `color` is ignored; the
    /// template keeps its own alpha.
    pub fn set_color(&self, color: Color32) {
        self.update_attributes(|attributes| attributes.set_color(color));
    }

    /// Set brush opacity from a percentage; values above 100 count as 100.
    pub fn set_alpha(&self, percent: u8) {
        self.update_attributes(|attributes| attributes.set_alpha_percent(percent));
    }

    pub fn set_stroke_width(&self, width: f32) {
        self.update_attributes(|attributes| {
            if !attributes.set_stroke_width(width) {
                warn!("Ignoring invalid stroke width {width}");
            }
        });
    }

    pub fn toggle_eraser(&self) {
        self.update_attributes(|attributes| {
            let on = attributes.toggle_eraser();
            debug!("Eraser {}", if on { "on" } else { "off" });
        });
    }

    /// Apply `update` to the template and emit `AttributesChanged` only if
    /// the template actually changed.
    fn update_attributes(&self, update: impl FnOnce(&mut PaintAttributes)) {
        let changed = {
            let mut gesture = self.gesture.lock();
            let before = gesture.attributes;
            update(&mut gesture.attributes);
            (gesture.attributes != before).then_some(gesture.attributes)
        };

        if let Some(attributes) = changed {
            self.events.emit(CanvasEvent::AttributesChanged(attributes));
        }
    }

    // ---- rendering ----

    pub fn snapshot_for_render(&self) -> RenderSnapshot {
        let gesture = self.gesture.lock();
        let in_progress = gesture
            .builder
            .is_drawing()
            .then(|| gesture.builder.current_path().clone());

        RenderSnapshot {
            strokes: self.history.strokes(),
            in_progress,
            live_attributes: gesture.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Canvas>();
    }

    #[test]
    fn test_moves_without_gesture_are_ignored() {
        let canvas = Canvas::default();
        canvas.on_gesture_move(3.0, 3.0);
        canvas.on_gesture_end();

        assert!(canvas.history().is_empty());
        assert!(canvas.snapshot_for_render().is_blank());
    }

    #[test]
    fn test_in_progress_path_in_snapshot() {
        let canvas = Canvas::default();
        canvas.on_gesture_start(0.0, 0.0);
        canvas.on_gesture_move(4.0, 4.0);

        let snapshot = canvas.snapshot_for_render();
        assert!(snapshot.strokes.is_empty());
        assert_eq!(snapshot.in_progress.map(|p| p.len()), Some(2));

        canvas.on_gesture_end();
        let snapshot = canvas.snapshot_for_render();
        assert_eq!(snapshot.strokes.len(), 1);
        assert!(snapshot.in_progress.is_none());
    }
}
