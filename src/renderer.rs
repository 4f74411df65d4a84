// src/renderer.rs
use egui::{Color32, Painter, Pos2, Rect, Shape};

use crate::attributes::PaintAttributes;
use crate::canvas::RenderSnapshot;
use crate::path::{DEFAULT_FLATTEN_TOLERANCE, StrokePath};

/// Paints a [`RenderSnapshot`] into an egui painter.
///
/// Canvas coordinates are relative to `rect.min`.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    background: Color32,
    tolerance: f32,
}

impl Renderer {
    pub fn new(background: Color32) -> Self {
        Self {
            background,
            tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Fill the background, draw committed strokes in order, then the
    /// gesture in progress on top.
    pub fn render(&self, painter: &Painter, rect: Rect, snapshot: &RenderSnapshot) {
        painter.rect_filled(rect, 0.0, self.background);

        for stroke in &snapshot.strokes {
            self.paint_path(painter, rect, stroke.path(), &stroke.attributes());
        }

        if let Some(path) = &snapshot.in_progress {
            self.paint_path(painter, rect, path, &snapshot.live_attributes);
        }
    }

    fn paint_path(&self, painter: &Painter, rect: Rect, path: &StrokePath, attributes: &PaintAttributes) {
        let shapes = self.path_shapes(rect.min, path, attributes);
        painter.extend(shapes);
    }

    /// Shapes for one path, offset so canvas (0, 0) lands on `origin`.
    pub fn path_shapes(&self, origin: Pos2, path: &StrokePath, attributes: &PaintAttributes) -> Vec<Shape> {
        let offset = origin.to_vec2();
        let points: Vec<Pos2> = path
            .flatten(self.tolerance)
            .into_iter()
            .map(|p| p + offset)
            .collect();

        let color = attributes.render_color(self.background);
        let width = attributes.stroke_width();

        match points.len() {
            0 => Vec::new(),
            1 => vec![Shape::circle_filled(points[0], width / 2.0, color)],
            _ => {
                let first = points[0];
                let last = points[points.len() - 1];
                let mut shapes = vec![Shape::line(points, egui::Stroke::new(width, color))];
                // Round caps, which a plain egui line does not have. A
                // translucent cap would blend over the line end a second time.
                if color.a() == u8::MAX {
                    shapes.push(Shape::circle_filled(first, width / 2.0, color));
                    shapes.push(Shape::circle_filled(last, width / 2.0, color));
                }
                shapes
            }
        }
    }
}
