use egui::{CentralPanel, Color32, Context, Frame, RichText, ScrollArea, Ui, Visuals};

pub fn top_panel(ctx: &Context) {
    egui::TopBottomPanel::top("disclaimer_panel").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(
                    "⚠ IMPORTANT: This system only supports AI/ML related documents in English language. \
                     Other document types or languages are not supported.",
                )
                .color(Color32::from_rgb(0xE0, 0xB0, 0x20))
                .strong(),
            );
        });
        ui.add_space(4.0);
    });
}

pub fn bottom_panel(ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(
            egui::Layout::right_to_left(egui::Align::Center),
            |ui| {
                if ui.button("🌙 Dark mode").clicked() {
                    ctx.set_visuals(Visuals::dark());
                }
                if ui.button("☀ Light mode").clicked() {
                    ctx.set_visuals(Visuals::light());
                }
            },
        );
    });
}

/// Panel central con ancho máximo y scroll vertical.
pub fn content_panel(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let w = ui.available_width().min(max_width);
                let side = ((ui.available_width() - w) / 2.0).max(0.0);
                ui.horizontal(|ui| {
                    ui.add_space(side);
                    Frame::default()
                        .fill(ui.visuals().window_fill())
                        .inner_margin(egui::Margin::symmetric(16, 16))
                        .show(ui, |ui| {
                            ui.set_width(w);
                            ui.vertical(|ui| inner(ui));
                        });
                });
            });
    });
}
