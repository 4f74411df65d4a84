use egui::Color32;

pub const DEFAULT_STROKE_WIDTH: f32 = 8.0;
pub const OPAQUE_ALPHA: u8 = 255;

/// Paint settings attached to a single stroke.
///
/// This is a plain `Copy` value: the canvas keeps one as the live template and
/// every committed stroke receives its own copy, so changing the template later
/// never touches strokes that are already drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintAttributes {
    color: Color32,
    stroke_width: f32,
    alpha: u8,
    eraser: bool,
}

impl Default for PaintAttributes {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            alpha: OPAQUE_ALPHA,
            eraser: false,
        }
    }
}

impl PaintAttributes {
    pub fn new(color: Color32, stroke_width: f32, alpha: u8, eraser: bool) -> Self {
        Self {
            color: opaque(color),
            stroke_width,
            alpha,
            eraser,
        }
    }

    /// The RGB color, always stored opaque. See [`Self::render_color`] for the
    /// color with alpha applied.
    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn is_eraser(&self) -> bool {
        self.eraser
    }

    /// Replace the RGB part of the color. Any alpha carried by `color` is
    /// dropped in favour of the attribute's own alpha.
    pub fn set_color(&mut self, color: Color32) {
        self.color = opaque(color);
    }

    /// Set alpha from a 0..=100 percentage (clamped), using integer math so
    /// 50% maps to 127.
    pub fn set_alpha_percent(&mut self, percent: u8) {
        let percent = u32::from(percent.min(100));
        self.alpha = (percent * 255 / 100) as u8;
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    /// Returns false and leaves the width alone for non-finite or
    /// non-positive values.
    pub fn set_stroke_width(&mut self, stroke_width: f32) -> bool {
        if !is_valid_stroke_width(stroke_width) {
            return false;
        }
        self.stroke_width = stroke_width;
        true
    }

    pub fn set_eraser(&mut self, eraser: bool) {
        self.eraser = eraser;
    }

    /// Flip the eraser flag and return the new state.
    pub fn toggle_eraser(&mut self) -> bool {
        self.eraser = !self.eraser;
        self.eraser
    }

    /// The color a renderer should actually paint with. Erasing paints the
    /// canvas background.
    pub fn render_color(&self, background: Color32) -> Color32 {
        if self.eraser {
            background
        } else {
            let [r, g, b, _] = self.color.to_array();
            Color32::from_rgba_unmultiplied(r, g, b, self.alpha)
        }
    }
}

pub(crate) fn is_valid_stroke_width(stroke_width: f32) -> bool {
    stroke_width.is_finite() && stroke_width > 0.0
}

fn opaque(color: Color32) -> Color32 {
    Color32::from_rgb(color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_percent_conversion() {
        let mut attrs = PaintAttributes::default();
        attrs.set_alpha_percent(50);
        assert_eq!(attrs.alpha(), 127);
        attrs.set_alpha_percent(100);
        assert_eq!(attrs.alpha(), 255);
        attrs.set_alpha_percent(0);
        assert_eq!(attrs.alpha(), 0);
        attrs.set_alpha_percent(250);
        assert_eq!(attrs.alpha(), 255);
    }

    #[test]
    fn test_invalid_width_is_ignored() {
        let mut attrs = PaintAttributes::default();
        assert!(!attrs.set_stroke_width(0.0));
        assert!(!attrs.set_stroke_width(-3.0));
        assert!(!attrs.set_stroke_width(f32::NAN));
        assert_eq!(attrs.stroke_width(), DEFAULT_STROKE_WIDTH);
        assert!(attrs.set_stroke_width(2.5));
        assert_eq!(attrs.stroke_width(), 2.5);
    }

    #[test]
    fn test_render_color() {
        let mut attrs = PaintAttributes::new(Color32::RED, 4.0, 255, false);
        assert_eq!(attrs.render_color(Color32::WHITE), Color32::RED);

        attrs.toggle_eraser();
        assert_eq!(attrs.render_color(Color32::WHITE), Color32::WHITE);

        attrs.toggle_eraser();
        attrs.set_alpha(128);
        assert_eq!(
            attrs.render_color(Color32::WHITE),
            Color32::from_rgba_unmultiplied(255, 0, 0, 128)
        );
    }

    #[test]
    fn test_set_color_keeps_alpha() {
        let mut attrs = PaintAttributes::default();
        attrs.set_alpha_percent(50);
        attrs.set_color(Color32::from_rgb(10, 20, 30));
        assert_eq!(attrs.color(), Color32::from_rgb(10, 20, 30));
        assert_eq!(attrs.alpha(), 127);
    }
}
