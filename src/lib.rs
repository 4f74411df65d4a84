#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod attributes;
pub mod builder;
pub mod canvas;
pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod panels;
pub mod path;
pub mod raster;
pub mod renderer;
pub mod stroke;

pub use app::PaintApp;
pub use attributes::PaintAttributes;
pub use builder::StrokeBuilder;
pub use canvas::{Canvas, RenderSnapshot};
pub use config::CanvasConfig;
pub use error::{ConfigError, ConfigResult, ExportError};
pub use event::{CanvasEvent, EventBus, EventHandler};
pub use history::{HistoryChange, StrokeHistory};
pub use path::{PathCommand, StrokePath};
pub use raster::{render_to_image, save_png};
pub use renderer::Renderer;
pub use stroke::{Stroke, StrokeId};
