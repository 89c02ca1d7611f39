use super::*;

impl QuizApp {
    /// Vuelve a las MCQ con las mismas preguntas y ficheros, sin respuestas.
    pub fn retake_quiz(&mut self) {
        self.mcq_answers.clear();
        self.saq_answers.clear();
        self.result = None;
        self.mcq_presenter.reset();
        self.saq_presenter.reset();
        self.stage = Stage::Mcq;
    }

    /// Borra toda la sesión y vuelve a la subida de PDFs.
    pub fn start_new_quiz(&mut self) {
        self.files.clear();
        self.mcq_answers.clear();
        self.saq_answers.clear();
        self.quiz = None;
        self.result = None;
        self.upload_error = None;
        self.mcq_presenter.reset();
        self.saq_presenter.reset();
        self.stage = Stage::Upload;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvaluatedQuestion, QuestionOptions};

    fn graded_app() -> QuizApp {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        app.add_files(vec![UploadedFile::new("a.pdf", vec![1])]);
        let quiz = ActiveQuiz::from_questions(vec![
            Question {
                id: Some("m1".into()),
                kind: QuestionKind::Mcq,
                prompt: "Pick".into(),
                options: Some(QuestionOptions::List(vec!["yes".into(), "no".into()])),
            },
            Question {
                id: Some("s1".into()),
                kind: QuestionKind::Saq,
                prompt: "Say".into(),
                options: None,
            },
        ])
        .unwrap();
        app.apply_upload_outcome(Ok(quiz));
        app.record_answer(QuestionKind::Mcq, "m1", "A".into());
        app.record_answer(QuestionKind::Saq, "s1", "text".into());
        app.stage = Stage::Result;
        app.result = Some(SubmissionResult {
            total_correct: 1,
            total_questions: 2,
            evaluated_quiz: vec![EvaluatedQuestion {
                question_id: "m1".into(),
                prompt: "Pick".into(),
                kind: QuestionKind::Mcq,
                options: None,
                user_answer: Some("A".into()),
                correct_answer: "A".into(),
                is_correct: true,
                similarity: None,
                explanation: None,
                score: None,
                verdict: None,
            }],
            message: None,
        });
        app
    }

    #[test]
    fn retake_keeps_questions_and_files() {
        let mut app = graded_app();
        let quiz_before = app.quiz.clone();
        app.retake_quiz();

        assert_eq!(app.stage, Stage::Mcq);
        assert_eq!(app.quiz, quiz_before);
        assert_eq!(app.file_names(), vec!["a.pdf"]);
        assert!(app.mcq_answers.is_empty());
        assert!(app.saq_answers.is_empty());
        assert!(app.result.is_none());
        assert_eq!(app.mcq_presenter.index(), 0);
    }

    #[test]
    fn new_quiz_clears_everything() {
        let mut app = graded_app();
        app.upload_error = Some(UploadError::new("old"));
        app.start_new_quiz();

        assert_eq!(app.stage, Stage::Upload);
        assert!(app.files.is_empty());
        assert!(app.quiz.is_none());
        assert!(app.mcq_answers.is_empty());
        assert!(app.saq_answers.is_empty());
        assert!(app.result.is_none());
        assert!(app.upload_error.is_none());
    }
}
