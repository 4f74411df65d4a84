#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_draw::{CanvasConfig, PaintApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optional path to a JSON brush config as the first argument
    let config = std::env::args()
        .nth(1)
        .and_then(|path| match CanvasConfig::load(&path) {
            Ok(config) => Some(config),
            Err(err) => {
                log::error!("Ignoring config {path}: {err}");
                None
            }
        });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 650.0])
            .with_min_inner_size([300.0, 220.0]),
        ..Default::default()
    };

    eframe::run_native(
        "eframe draw",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)))),
    )
}
