use crate::QuizApp;
use egui::{Align2, Context, Window};

pub fn ui_alert(app: &mut QuizApp, ctx: &Context) {
    let Some(message) = app.alert.clone() else {
        return;
    };

    Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    app.dismiss_alert();
                }
            });
        });
}
