use crate::PaintApp;

const EXPORT_PATH: &str = "drawing.png";

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.config().color;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.set_color(color);
                }
            });

            let mut alpha = app.config().alpha_percent;
            if ui
                .add(egui::Slider::new(&mut alpha, 0..=100).text("Opacity %"))
                .changed()
            {
                app.set_alpha_percent(alpha);
            }

            let mut width = app.config().stroke_width;
            if ui
                .add(egui::Slider::new(&mut width, 1.0..=50.0).text("Width"))
                .changed()
            {
                app.set_stroke_width(width);
            }

            if ui
                .selectable_label(app.canvas().is_eraser_on(), "⌫ Eraser")
                .clicked()
            {
                log::info!("Eraser toggled from UI");
                app.toggle_eraser();
            }

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.canvas().can_undo();
                let can_redo = app.canvas().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
                if ui.button("Clear").clicked() {
                    app.clear();
                }
            });

            if ui.button("Export PNG").clicked() {
                if let Err(err) = app.export_png(EXPORT_PATH) {
                    log::error!("Export to {EXPORT_PATH} failed: {err}");
                }
            }

            ui.separator();

            let history = app.canvas().history();
            ui.label(format!("Strokes: {}", history.len()));
            ui.label(format!("Redo stack size: {}", history.undone_len()));
            if history.is_empty() && history.has_clear_snapshot() {
                ui.label("Cleared strokes can be restored with Undo");
            }
        });
}
