use crate::QuizApp;
use crate::ui::helpers::big_button;
use egui::Ui;

pub fn ui_submit(app: &mut QuizApp, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.label(format!(
            "You answered {} multiple-choice and {} short-answer question(s).",
            app.mcq_answers.len(),
            app.saq_answers.len()
        ));
        ui.add_space(10.0);
        let width = (ui.available_width() / 2.0).max(160.0);
        if big_button(ui, "Submit Quiz", width, !app.is_busy()) {
            app.submit_quiz();
        }
    });
}
