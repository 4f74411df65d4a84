use std::path::Path;

use egui::Color32;
use log::info;
use serde::{Deserialize, Serialize};

use crate::attributes::{DEFAULT_STROKE_WIDTH, PaintAttributes, is_valid_stroke_width};
use crate::error::{ConfigError, ConfigResult};

/// Initial brush settings and canvas background.
///
/// Missing fields fall back to their defaults when deserializing, so older or
/// partial config files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub color: Color32,
    /// 0..=100
    pub alpha_percent: u8,
    pub stroke_width: f32,
    pub eraser: bool,
    /// Fill color of the canvas, also what the eraser paints with
    pub background: Color32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            alpha_percent: 100,
            stroke_width: DEFAULT_STROKE_WIDTH,
            eraser: false,
            background: Color32::WHITE,
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !is_valid_stroke_width(self.stroke_width) {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        if self.alpha_percent > 100 {
            return Err(ConfigError::InvalidAlpha(self.alpha_percent));
        }
        Ok(())
    }

    /// The brush template a fresh canvas starts with.
    pub fn initial_attributes(&self) -> PaintAttributes {
        let mut attributes = PaintAttributes::default();
        attributes.set_color(self.color);
        attributes.set_alpha_percent(self.alpha_percent);
        attributes.set_stroke_width(self.stroke_width);
        attributes.set_eraser(self.eraser);
        attributes
    }
}
