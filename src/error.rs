use thiserror::Error;

/// Errors raised while loading or validating a [`crate::CanvasConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stroke width must be a positive number, got {0}")]
    InvalidStrokeWidth(f32),

    #[error("alpha must be a percentage between 0 and 100, got {0}")]
    InvalidAlpha(u8),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while writing a rasterized canvas to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("canvas size must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
