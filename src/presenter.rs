use crate::model::{AnswerSet, Question, QuestionKind};

pub const MCQ_WARNING: &str = "Please choose an option before proceeding!";

/// Lo que el presentador pide al controlador.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    AnswerChanged { question_id: String, value: String },
    Finished,
}

/// Recorre una lista de preguntas de un solo tipo, una a una.
/// No guarda ni preguntas ni respuestas: las recibe del controlador.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionPresenter {
    pub kind: QuestionKind,
    index: usize,
    warning: Option<String>,
}

impl QuestionPresenter {
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            kind,
            index: 0,
            warning: None,
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.warning = None;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn current<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        questions.get(self.index)
    }

    /// Id de la pregunta actual. Las listas de `ActiveQuiz` siempre traen id;
    /// `q_<índice>` solo aplica a listas montadas a mano.
    pub fn current_id(&self, questions: &[Question]) -> Option<String> {
        self.current(questions)
            .map(|q| q.id_or_position(self.index))
    }

    pub fn current_answer<'a>(
        &self,
        questions: &[Question],
        answers: &'a AnswerSet,
    ) -> Option<&'a str> {
        let id = self.current_id(questions)?;
        answers.get(&id).map(String::as_str)
    }

    pub fn is_last(&self, questions: &[Question]) -> bool {
        self.index + 1 >= questions.len()
    }

    /// "Question 2 of 5" con el tipo delante.
    pub fn heading(&self, questions: &[Question]) -> String {
        format!(
            "{} Question {} of {}",
            self.kind.label(),
            (self.index + 1).min(questions.len().max(1)),
            questions.len()
        )
    }

    pub fn next_label(&self, questions: &[Question]) -> &'static str {
        if !self.is_last(questions) {
            "Next"
        } else if self.kind == QuestionKind::Mcq {
            "Start Short QAs"
        } else {
            "Finish"
        }
    }

    pub fn select_option(&self, questions: &[Question], label: &str) -> Option<PresenterEvent> {
        self.answer_changed(questions, label.to_string())
    }

    pub fn edit_text(&self, questions: &[Question], text: String) -> Option<PresenterEvent> {
        self.answer_changed(questions, text)
    }

    fn answer_changed(&self, questions: &[Question], value: String) -> Option<PresenterEvent> {
        let question_id = self.current_id(questions)?;
        Some(PresenterEvent::AnswerChanged { question_id, value })
    }

    /// Avanza a la siguiente pregunta. En MCQ no deja pasar sin respuesta.
    /// Devuelve `Finished` al pasar de la última.
    pub fn advance(&mut self, questions: &[Question], answers: &AnswerSet) -> Option<PresenterEvent> {
        if questions.is_empty() {
            self.warning = None;
            return Some(PresenterEvent::Finished);
        }

        let answered = self
            .current_answer(questions, answers)
            .is_some_and(|a| !a.is_empty());
        if self.kind == QuestionKind::Mcq && !answered {
            self.warning = Some(MCQ_WARNING.to_string());
            return None;
        }

        self.warning = None;
        if self.index + 1 < questions.len() {
            self.index += 1;
            None
        } else {
            Some(PresenterEvent::Finished)
        }
    }
}
