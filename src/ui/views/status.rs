use crate::QuizApp;
use crate::ui::helpers::error_box;
use egui::{Spinner, Ui};

/// Cabecera común: título, indicador de carga y último error de subida.
pub fn ui_status(app: &QuizApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.heading("Quiz Generator");
    });
    ui.add_space(10.0);

    if app.is_busy() {
        ui.horizontal(|ui| {
            ui.add(Spinner::new());
            ui.label("Loading...");
        });
        ui.add_space(6.0);
    }

    if let Some(err) = &app.upload_error {
        error_box(ui, &err.message, &err.files);
        ui.add_space(10.0);
    }
}
