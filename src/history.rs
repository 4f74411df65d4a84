use std::collections::HashSet;

use log::debug;
use parking_lot::Mutex;

use crate::attributes::PaintAttributes;
use crate::path::StrokePath;
use crate::stroke::{Stroke, StrokeId};

/// What a history operation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryChange {
    /// Nothing to do (empty undo or redo stack)
    Unchanged,
    Undone(StrokeId),
    Redone(StrokeId),
    /// Committed strokes were moved into the clear snapshot
    Cleared { strokes: usize },
    /// An empty canvas was refilled from the clear snapshot
    ClearRestored { strokes: usize },
    /// A new gesture dropped this many redoable strokes
    RedoDiscarded { strokes: usize },
}

impl HistoryChange {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Debug, Default)]
struct HistoryState {
    /// Visible strokes; order is draw order and undo order
    committed: Vec<Stroke>,
    /// Ids in `committed`
    committed_index: HashSet<StrokeId>,
    /// Strokes removed by undo, last one is redone first
    undone: Vec<Stroke>,
    /// Copy of `committed` taken by the last clear
    pre_clear_snapshot: Vec<Stroke>,
    /// Ids in `pre_clear_snapshot`
    snapshot_index: HashSet<StrokeId>,
}

impl HistoryState {
    fn insert(&mut self, stroke: Stroke) -> StrokeId {
        let id = stroke.id();
        if !self.committed_index.insert(id) {
            // Keyed by identity: re-committing a present stroke keeps its slot
            if let Some(existing) = self.committed.iter_mut().find(|s| s.id() == id) {
                existing.set_attributes(stroke.attributes());
            }
            return id;
        }
        self.committed.push(stroke);
        id
    }

    fn pop_committed(&mut self) -> Option<Stroke> {
        let stroke = self.committed.pop()?;
        self.committed_index.remove(&stroke.id());
        Some(stroke)
    }

    fn take_snapshot(&mut self) {
        self.pre_clear_snapshot = std::mem::take(&mut self.committed);
        self.snapshot_index = std::mem::take(&mut self.committed_index);
    }

    fn restore_snapshot(&mut self) {
        self.committed = std::mem::take(&mut self.pre_clear_snapshot);
        self.committed_index = std::mem::take(&mut self.snapshot_index);
    }
}

/// Committed strokes together with their undo/redo and clear-recovery state.
///
/// All state sits behind one mutex, so a render traversal never observes a
/// half-applied mutation. Each operation holds the lock only for the container
/// update itself.
///
/// Clear is not an undo-stack entry. It parks the committed strokes in a
/// single-slot snapshot that the next undo restores, but only if the canvas is
/// still empty at that point.
#[derive(Debug, Default)]
pub struct StrokeHistory {
    state: Mutex<HistoryState>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze `path` into a new stroke and append it.
    pub fn commit(&self, path: StrokePath, attributes: PaintAttributes) -> StrokeId {
        self.commit_stroke(Stroke::new(path, attributes))
    }

    /// Append an existing stroke. Does not touch the redo stack.
    pub fn commit_stroke(&self, stroke: Stroke) -> StrokeId {
        let id = self.state.lock().insert(stroke);
        debug!("Committed {id}");
        id
    }

    pub fn undo(&self) -> HistoryChange {
        let mut state = self.state.lock();

        if state.committed.is_empty() {
            if state.pre_clear_snapshot.is_empty() {
                return HistoryChange::Unchanged;
            }
            state.restore_snapshot();
            let strokes = state.committed.len();
            debug!("Restored {strokes} strokes from clear snapshot");
            return HistoryChange::ClearRestored { strokes };
        }

        match state.pop_committed() {
            Some(stroke) => {
                let id = stroke.id();
                state.undone.push(stroke);
                debug!("Undid {id}");
                HistoryChange::Undone(id)
            }
            None => HistoryChange::Unchanged,
        }
    }

    /// Re-commit the most recently undone stroke through the normal commit path.
    pub fn redo(&self) -> HistoryChange {
        let mut state = self.state.lock();
        match state.undone.pop() {
            Some(stroke) => {
                let id = state.insert(stroke);
                debug!("Redid {id}");
                HistoryChange::Redone(id)
            }
            None => HistoryChange::Unchanged,
        }
    }

    /// Move every committed stroke into the clear snapshot, replacing whatever
    /// an earlier clear left there. The redo stack is left alone.
    ///
    /// Unchanged when there is neither a stroke to clear nor a snapshot to
    /// overwrite.
    pub fn clear(&self) -> HistoryChange {
        let mut state = self.state.lock();
        if state.committed.is_empty() && state.pre_clear_snapshot.is_empty() {
            return HistoryChange::Unchanged;
        }
        state.take_snapshot();
        let strokes = state.pre_clear_snapshot.len();
        debug!("Cleared {strokes} strokes");
        HistoryChange::Cleared { strokes }
    }

    /// Called when a pointer goes down: any new drawing invalidates redo.
    pub fn new_gesture(&self) -> HistoryChange {
        let mut state = self.state.lock();
        if state.undone.is_empty() {
            return HistoryChange::Unchanged;
        }
        let strokes = state.undone.len();
        state.undone.clear();
        HistoryChange::RedoDiscarded { strokes }
    }

    /// Consistent copy of the committed strokes in draw order.
    pub fn strokes(&self) -> Vec<Stroke> {
        self.state.lock().committed.clone()
    }

    /// Visit committed strokes in draw order while holding the lock.
    ///
    /// Calling back into this history from `visit` deadlocks.
    pub fn for_each_stroke(&self, mut visit: impl FnMut(&Stroke)) {
        let state = self.state.lock();
        for stroke in &state.committed {
            visit(stroke);
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().committed.is_empty()
    }

    pub fn undone_len(&self) -> usize {
        self.state.lock().undone.len()
    }

    /// True if `undo` would change anything.
    pub fn can_undo(&self) -> bool {
        let state = self.state.lock();
        !state.committed.is_empty() || !state.pre_clear_snapshot.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.lock().undone.is_empty()
    }

    pub fn has_clear_snapshot(&self) -> bool {
        !self.state.lock().pre_clear_snapshot.is_empty()
    }

    pub fn committed_ids(&self) -> Vec<StrokeId> {
        self.state.lock().committed.iter().map(Stroke::id).collect()
    }

    pub fn undone_ids(&self) -> Vec<StrokeId> {
        self.state.lock().undone.iter().map(Stroke::id).collect()
    }

    pub fn snapshot_ids(&self) -> Vec<StrokeId> {
        self.state
            .lock()
            .pre_clear_snapshot
            .iter()
            .map(Stroke::id)
            .collect()
    }
}
