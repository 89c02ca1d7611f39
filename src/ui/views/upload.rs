use crate::QuizApp;
use crate::ui::helpers::big_button;
use egui::{Button, Layout, Align, Ui};

pub fn ui_upload(app: &mut QuizApp, ui: &mut Ui) {
    let width = ui.available_width();
    let busy = app.is_busy();

    if big_button(ui, "📂 Select PDFs...", width, !busy) {
        app.pick_files();
    }
    ui.add_space(8.0);

    let mut to_remove = None;
    if !app.files.is_empty() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong(format!("Selected PDFs ({})", app.files.len()));
            ui.add_space(4.0);
            for (index, file) in app.files.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("📄 {}", file.name));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.add_enabled(!busy, Button::new("Remove").small()).clicked() {
                            to_remove = Some(index);
                        }
                    });
                });
            }
        });
        ui.add_space(8.0);
    }
    if let Some(index) = to_remove {
        app.remove_file(index);
    }

    if big_button(ui, "Generate Quiz", width, !app.files.is_empty() && !busy) {
        app.generate_quiz();
    }
}
