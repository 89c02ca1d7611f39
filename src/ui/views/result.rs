use crate::QuizApp;
use crate::ui::helpers::{BUTTON_HEIGHT, verdict_card};
use egui::{Button, RichText, Ui};

pub fn ui_result(app: &mut QuizApp, ui: &mut Ui) {
    // Sin corrección no hay nada que pintar
    let Some(score) = app.score_line() else {
        return;
    };

    ui.heading("Quiz Results");
    ui.add_space(6.0);
    ui.label(RichText::new(format!("Score: {score}")).size(18.0).strong());
    if let Some(msg) = app.result.as_ref().and_then(|r| r.message.as_deref()) {
        ui.label(RichText::new(msg).weak());
    }
    ui.add_space(10.0);

    for card in app.feedback_cards() {
        verdict_card(ui, card.is_correct, |ui| {
            ui.strong(card.heading());
            for line in &card.options {
                ui.label(format!("    {line}"));
            }
            ui.add_space(4.0);
            ui.label(format!("Your Answer: {}", card.user_answer));
            ui.label(format!("Correct Answer: {}", card.correct_answer));
            if let Some(sim) = &card.similarity {
                ui.label(format!("Similarity: {sim}"));
            }
            if let Some(score) = &card.score {
                ui.label(format!("Score: {score}"));
            }
            if let Some(verdict) = &card.verdict {
                ui.label(format!("Verdict: {verdict}"));
            }
            if let Some(explanation) = &card.explanation {
                ui.label(RichText::new(format!("Explanation: {explanation}")).small());
            }
            ui.add_space(2.0);
            ui.strong(card.status_label());
        });
        ui.add_space(8.0);
    }

    ui.add_space(10.0);
    let btn_w = (ui.available_width() - 8.0) / 2.0;
    let mut retake = false;
    let mut new_quiz = false;
    ui.horizontal(|ui| {
        retake = ui
            .add_sized([btn_w, BUTTON_HEIGHT], Button::new("Retake Quiz"))
            .clicked();
        new_quiz = ui
            .add_sized([btn_w, BUTTON_HEIGHT], Button::new("New Quiz"))
            .clicked();
    });

    if retake {
        app.retake_quiz();
    }
    if new_quiz {
        app.start_new_quiz();
    }
}
