mod helpers;
pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::{QuestionKind, Stage};
use eframe::{App, Frame};
use egui::Context;
use layout::{bottom_panel, content_panel, top_panel};
use std::time::Duration;

const MAX_CONTENT_WIDTH: f32 = 720.0;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_pending();

        // Sin esto egui no repinta hasta el siguiente evento de usuario.
        if self.is_busy() || self.picked_rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // AVISO SUPERIOR y PANEL INFERIOR TEMA OSCURO O CLARO
        top_panel(ctx);
        bottom_panel(ctx);

        content_panel(ctx, MAX_CONTENT_WIDTH, |ui| {
            views::status::ui_status(self, ui);

            // Dispatch por fase
            match self.stage {
                Stage::Upload => views::upload::ui_upload(self, ui),
                Stage::Mcq => views::question::ui_questions(self, ui, QuestionKind::Mcq),
                Stage::Saq => views::question::ui_questions(self, ui, QuestionKind::Saq),
                Stage::Submit => views::submit::ui_submit(self, ui),
                Stage::Result => views::result::ui_result(self, ui),
            }
        });

        if self.alert.is_some() {
            views::alert::ui_alert(self, ctx);
        }
    }
}
