use egui::{Pos2, vec2};

use crate::path::StrokePath;

/// Builds the path of the gesture currently being drawn.
///
/// Pointer samples are smoothed by drawing a quadratic curve to the midpoint
/// of each pair of samples, with the earlier sample as control point.
#[derive(Debug, Clone, Default)]
pub struct StrokeBuilder {
    path: StrokePath,
    start: Pos2,
    last: Pos2,
}

impl StrokeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new gesture at (`x`, `y`), discarding any unfinished path.
    pub fn begin(&mut self, x: f32, y: f32) {
        let point = Pos2::new(x, y);
        self.path.clear();
        self.path.move_to(point);
        self.start = point;
        self.last = point;
    }

    /// Feed the next pointer sample.
    pub fn extend(&mut self, x: f32, y: f32) {
        let point = Pos2::new(x, y);
        self.ensure_started();
        let midpoint = Pos2::new((point.x + self.last.x) / 2.0, (point.y + self.last.y) / 2.0);
        self.path.quad_to(self.last, midpoint);
        self.last = point;
    }

    /// Close the path at the last sample and hand it over. The builder is
    /// empty afterwards.
    ///
    /// A tap that never moved gets a tiny right-angle mark appended so it
    /// still shows up as a dot.
    pub fn finish(&mut self) -> StrokePath {
        self.ensure_started();
        self.path.line_to(self.last);

        if self.start == self.last {
            self.path.line_to(self.last + vec2(0.0, 2.0));
            self.path.line_to(self.last + vec2(1.0, 2.0));
            self.path.line_to(self.last + vec2(1.0, 0.0));
        }

        std::mem::take(&mut self.path)
    }

    /// Drop the in-progress path without producing anything.
    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// The path drawn so far, for live preview.
    pub fn current_path(&self) -> &StrokePath {
        &self.path
    }

    pub fn is_drawing(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn start_point(&self) -> Pos2 {
        self.start
    }

    pub fn last_point(&self) -> Pos2 {
        self.last
    }

    // Samples arriving without a begin continue from the last known point
    fn ensure_started(&mut self) {
        if self.path.is_empty() {
            self.path.move_to(self.last);
            self.start = self.last;
        }
    }
}
