use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::error::ExportError;
use crate::event::RepaintHandler;
use crate::panels::{central_panel, tools_panel};
use crate::raster;
use crate::renderer::Renderer;

/// Desktop front end: feeds egui pointer input into a [`Canvas`] and paints
/// its snapshots.
///
/// Only the brush settings are persisted between runs, never the strokes.
pub struct PaintApp {
    canvas: Arc<Canvas>,
    renderer: Renderer,
    config: CanvasConfig,
    // A gesture started inside the canvas and the button is still down
    drawing: bool,
    // Size the canvas was last shown at, used for export
    canvas_size: egui::Vec2,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// An explicit `config` wins over the one stored by a previous run.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<CanvasConfig>) -> Self {
        let config = config
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value::<CanvasConfig>(storage, eframe::APP_KEY))
            })
            .filter(|config| config.validate().is_ok())
            .unwrap_or_default();

        let app = Self::with_config(config);
        app.canvas
            .subscribe(Box::new(RepaintHandler::new(cc.egui_ctx.clone())));
        app
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        info!("🖌️ Starting canvas with {config:?}");
        Self {
            canvas: Arc::new(Canvas::new(&config)),
            renderer: Renderer::new(config.background),
            config,
            drawing: false,
            canvas_size: egui::Vec2::ZERO,
        }
    }

    pub fn canvas(&self) -> &Arc<Canvas> {
        &self.canvas
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn set_color(&mut self, color: egui::Color32) {
        self.config.color = color;
        self.canvas.set_color(color);
    }

    pub fn set_alpha_percent(&mut self, percent: u8) {
        self.config.alpha_percent = percent.min(100);
        self.canvas.set_alpha(percent);
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.canvas.set_stroke_width(width);
        self.config.stroke_width = self.canvas.attributes().stroke_width();
    }

    pub fn toggle_eraser(&mut self) {
        self.canvas.toggle_eraser();
        self.config.eraser = self.canvas.is_eraser_on();
    }

    pub fn undo(&mut self) {
        self.canvas.undo();
    }

    pub fn redo(&mut self) {
        self.canvas.redo();
    }

    pub fn clear(&mut self) {
        self.drawing = false;
        self.canvas.clear();
    }

    pub fn set_canvas_size(&mut self, size: egui::Vec2) {
        self.canvas_size = size;
    }

    /// Write the canvas, at the size it is currently shown, to a PNG file.
    pub fn export_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        raster::save_png(
            &self.canvas.snapshot_for_render(),
            self.canvas_size.x.round() as u32,
            self.canvas_size.y.round() as u32,
            self.renderer.background(),
            path,
        )
    }

    /// Translate this frame's pointer state into gesture calls. `canvas_rect`
    /// is where the canvas is shown; its top-left corner is canvas (0, 0).
    pub fn handle_pointer(&mut self, pointer: PointerInput, canvas_rect: egui::Rect) {
        if let Some(pos) = pointer.pos {
            let local = pos - canvas_rect.min;
            if pointer.pressed && canvas_rect.contains(pos) {
                self.canvas.on_gesture_start(local.x, local.y);
                self.drawing = true;
            } else if self.drawing && pointer.moved {
                self.canvas.on_gesture_move(local.x, local.y);
            }
        }

        if pointer.released && self.drawing {
            self.canvas.on_gesture_end();
            self.drawing = false;
        }
    }

    /// Undo/redo keyboard shortcuts.
    pub fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let redo = ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
        });
        let undo = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z));

        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
    }
}

/// The parts of egui's pointer state a gesture cares about.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    pub pos: Option<egui::Pos2>,
    pub pressed: bool,
    pub released: bool,
    pub moved: bool,
}

impl PointerInput {
    pub fn from_ctx(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            pos: i.pointer.interact_pos(),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            moved: i.pointer.delta() != egui::Vec2::ZERO,
        })
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
