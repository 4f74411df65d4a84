use egui::{Pos2, Rect};

/// Flattening tolerance used when the caller passes a non-positive one.
pub const DEFAULT_FLATTEN_TOLERANCE: f32 = 0.5;
const MAX_CURVE_STEPS: usize = 64;

/// A single drawing command of a [`StrokePath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos2),
    QuadTo { control: Pos2, to: Pos2 },
    LineTo(Pos2),
}

impl PathCommand {
    /// The point the pen ends up at after this command.
    pub fn end_point(&self) -> Pos2 {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
            Self::QuadTo { to, .. } => to,
        }
    }
}

/// Ordered vector geometry of one gesture.
///
/// Equality here is geometric. Strokes in the history are told apart by their
/// `StrokeId`, never by comparing paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokePath {
    commands: Vec<PathCommand>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn quad_to(&mut self, control: Pos2, to: Pos2) {
        self.commands.push(PathCommand::QuadTo { control, to });
    }

    pub fn line_to(&mut self, point: Pos2) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn start_point(&self) -> Option<Pos2> {
        self.commands.first().map(PathCommand::end_point)
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.commands.last().map(PathCommand::end_point)
    }

    /// Convert the path into a polyline. Curves are subdivided so that no
    /// emitted segment is much longer than `tolerance`.
    pub fn flatten(&self, tolerance: f32) -> Vec<Pos2> {
        let tolerance = if tolerance > 0.0 {
            tolerance
        } else {
            DEFAULT_FLATTEN_TOLERANCE
        };

        let mut points = Vec::with_capacity(self.commands.len());
        let mut current: Option<Pos2> = None;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => points.push(p),
                PathCommand::QuadTo { control, to } => {
                    let from = current.unwrap_or(control);
                    let estimate = from.distance(control) + control.distance(to);
                    let steps = ((estimate / tolerance).ceil() as usize).clamp(1, MAX_CURVE_STEPS);
                    for step in 1..=steps {
                        let t = step as f32 / steps as f32;
                        points.push(quadratic_point(from, control, to, t));
                    }
                }
            }
            current = Some(command.end_point());
        }

        points
    }

    /// Bounding box of every point the path touches, control points included,
    /// grown by `padding` on each side.
    pub fn bounds(&self, padding: f32) -> Rect {
        if self.commands.is_empty() {
            return Rect::NOTHING;
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        let mut include = |p: Pos2| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for command in &self.commands {
            if let PathCommand::QuadTo { control, .. } = *command {
                include(control);
            }
            include(command.end_point());
        }

        Rect::from_min_max(
            Pos2::new(min_x - padding, min_y - padding),
            Pos2::new(max_x + padding, max_y + padding),
        )
    }
}

fn quadratic_point(from: Pos2, control: Pos2, to: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    (from.to_vec2() * (mt * mt) + control.to_vec2() * (2.0 * mt * t) + to.to_vec2() * (t * t)).to_pos2()
}

/// Distance from `point` to the segment `start..end`.
pub(crate) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq == 0.0 {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}
