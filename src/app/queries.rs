use super::*;

impl QuizApp {
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Preguntas activas de un tipo; vacío si no hay quiz.
    pub fn questions(&self, kind: QuestionKind) -> &[Question] {
        self.quiz
            .as_ref()
            .map(|q| q.questions(kind))
            .unwrap_or(&[])
    }

    pub fn answers(&self, kind: QuestionKind) -> &AnswerSet {
        match kind {
            QuestionKind::Saq => &self.saq_answers,
            _ => &self.mcq_answers,
        }
    }

    pub fn presenter(&self, kind: QuestionKind) -> &QuestionPresenter {
        match kind {
            QuestionKind::Saq => &self.saq_presenter,
            _ => &self.mcq_presenter,
        }
    }

    pub fn has_quiz(&self) -> bool {
        self.quiz.is_some()
    }
}
