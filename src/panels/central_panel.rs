use crate::PaintApp;
use crate::app::PointerInput;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;
            app.set_canvas_size(canvas_rect.size());

            // Handle input
            app.handle_pointer(PointerInput::from_ctx(ctx), canvas_rect);

            // Render the canvas
            let snapshot = app.canvas().snapshot_for_render();
            app.renderer().render(&painter, canvas_rect, &snapshot);
        });
}
