use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::attributes::PaintAttributes;
use crate::path::StrokePath;

// Single static counter for all strokes
static NEXT_STROKE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique handle identifying one committed stroke.
///
/// Two strokes with identical geometry still get different ids, which is what
/// the history keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeId(u64);

impl StrokeId {
    pub fn next() -> Self {
        Self(NEXT_STROKE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stroke#{}", self.0)
    }
}

/// A committed stroke: frozen path plus the attributes it was drawn with.
///
/// Cloning is cheap, the path is reference counted.
#[derive(Debug, Clone)]
pub struct Stroke {
    id: StrokeId,
    path: Arc<StrokePath>,
    attributes: PaintAttributes,
}

impl Stroke {
    /// Freeze `path` into a new stroke with a fresh id.
    pub fn new(path: StrokePath, attributes: PaintAttributes) -> Self {
        Self {
            id: StrokeId::next(),
            path: Arc::new(path),
            attributes,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    pub fn attributes(&self) -> PaintAttributes {
        self.attributes
    }

    pub(crate) fn set_attributes(&mut self, attributes: PaintAttributes) {
        self.attributes = attributes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_identical_paths_get_distinct_ids() {
        let mut path = StrokePath::new();
        path.move_to(pos2(1.0, 1.0));
        path.line_to(pos2(2.0, 2.0));

        let a = Stroke::new(path.clone(), PaintAttributes::default());
        let b = Stroke::new(path, PaintAttributes::default());

        assert_eq!(a.path(), b.path());
        assert_ne!(a.id(), b.id());
    }
}
