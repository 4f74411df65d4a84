use crate::attributes::PaintAttributes;
use crate::stroke::StrokeId;

/// Emitted by the canvas after each change that affects what is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    GestureStarted {
        /// Redoable strokes dropped because a new gesture began
        redo_discarded: usize,
    },
    /// The in-progress path grew
    GestureMoved,
    StrokeCommitted {
        id: StrokeId,
    },
    StrokeUndone {
        id: StrokeId,
    },
    StrokeRedone {
        id: StrokeId,
    },
    Cleared {
        strokes: usize,
    },
    ClearRestored {
        strokes: usize,
    },
    AttributesChanged(PaintAttributes),
}
