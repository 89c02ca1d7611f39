use crate::QuizApp;
use crate::model::{QuestionKind, option_label};
use crate::ui::helpers::{BUTTON_HEIGHT, option_button};
use egui::{Align, Button, Color32, Layout, RichText, TextEdit, Ui};

enum QuestionAction {
    Select(String),
    Edit(String),
    Advance,
}

/// Pinta la pregunta actual del presentador de `kind`. Sin quiz no pinta nada.
pub fn ui_questions(app: &mut QuizApp, ui: &mut Ui, kind: QuestionKind) {
    if !app.has_quiz() {
        return;
    }

    // Se copia lo necesario para soltar el préstamo antes de mutar.
    let presenter = app.presenter(kind);
    let questions = app.questions(kind);
    let index = presenter.index();
    let heading = presenter.heading(questions);
    let next_label = presenter.next_label(questions);
    let warning = presenter.warning().map(str::to_owned);
    let answer = presenter
        .current_answer(questions, app.answers(kind))
        .map(str::to_owned);
    let current = presenter.current(questions).cloned();

    let mut action = None;

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            match &current {
                None => {
                    ui.label(match kind {
                        QuestionKind::Mcq => "No multiple-choice questions were generated.",
                        _ => "No short-answer questions were generated.",
                    });
                }
                Some(q) => {
                    ui.heading(heading);
                    ui.add_space(8.0);
                    ui.label(RichText::new(&q.prompt).size(16.0));
                    ui.add_space(10.0);

                    if kind == QuestionKind::Mcq {
                        let texts = q.options.as_ref().map(|o| o.texts()).unwrap_or_default();
                        for (idx, text) in texts.into_iter().enumerate() {
                            let label = option_label(idx);
                            let selected = answer.as_deref() == Some(label.as_str());
                            if option_button(ui, &format!("{label}. {text}"), selected) {
                                action = Some(QuestionAction::Select(label));
                            }
                            ui.add_space(2.0);
                        }
                    } else {
                        let mut text = answer.clone().unwrap_or_default();
                        let edit = TextEdit::multiline(&mut text)
                            .id_salt(("saq_answer", index))
                            .desired_rows(5)
                            .desired_width(f32::INFINITY)
                            .hint_text("Write your answer here...");
                        if ui.add(edit).changed() {
                            action = Some(QuestionAction::Edit(text));
                        }
                    }
                }
            }

            if let Some(w) = &warning {
                ui.add_space(6.0);
                ui.label(RichText::new(w).color(Color32::from_rgb(0xE0, 0x50, 0x50)));
            }

            ui.add_space(10.0);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .add(Button::new(next_label).min_size(egui::vec2(140.0, BUTTON_HEIGHT)))
                    .clicked()
                {
                    action = Some(QuestionAction::Advance);
                }
            });
        });

    match action {
        Some(QuestionAction::Select(label)) => app.select_option(kind, &label),
        Some(QuestionAction::Edit(text)) => app.edit_text(kind, text),
        Some(QuestionAction::Advance) => app.advance(kind),
        None => {}
    }
}
