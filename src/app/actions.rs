use super::*;
use crate::api::{self, SubmitRequest};
use std::sync::mpsc::{Sender, TryRecvError, channel};

type UploadOutcome = Result<ActiveQuiz, ApiError>;
type SubmitOutcome = Result<SubmissionResult, ApiError>;

#[cfg(not(target_arch = "wasm32"))]
fn spawn_upload(base: String, files: Vec<UploadedFile>, tx: Sender<UploadOutcome>) {
    std::thread::spawn(move || {
        let _ = tx.send(api::upload_pdfs(&base, &files));
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_upload(base: String, files: Vec<UploadedFile>, tx: Sender<UploadOutcome>) {
    wasm_bindgen_futures::spawn_local(async move {
        let _ = tx.send(api::upload_pdfs(&base, &files).await);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_submit(base: String, request: SubmitRequest, tx: Sender<SubmitOutcome>) {
    std::thread::spawn(move || {
        let _ = tx.send(api::submit_quiz(&base, &request));
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_submit(base: String, request: SubmitRequest, tx: Sender<SubmitOutcome>) {
    wasm_bindgen_futures::spawn_local(async move {
        let _ = tx.send(api::submit_quiz(&base, &request).await);
    });
}

impl QuizApp {
    pub fn generate_quiz(&mut self) {
        if self.is_busy() {
            log::warn!("generate_quiz ignored: a request is already in flight");
            return;
        }
        if self.files.is_empty() {
            self.alert = Some(NO_FILES_ALERT.into());
            return;
        }

        self.upload_error = None;
        let (tx, rx) = channel();
        self.pending = Some(PendingRequest::Upload(rx));
        spawn_upload(self.backend_url.clone(), self.files.clone(), tx);
    }

    pub fn submit_quiz(&mut self) {
        if self.is_busy() {
            log::warn!("submit_quiz ignored: a request is already in flight");
            return;
        }
        if self.stage != Stage::Submit {
            log::warn!("submit_quiz ignored in stage {:?}", self.stage);
            return;
        }

        let request = SubmitRequest {
            pdf_names: self.file_names(),
            mcq_answers: self.mcq_answers.clone(),
            saq_answers: self.saq_answers.clone(),
        };
        let (tx, rx) = channel();
        self.pending = Some(PendingRequest::Submit(rx));
        spawn_submit(self.backend_url.clone(), request, tx);
    }

    /// Recoge, si ya han terminado, la petición en curso y la lectura de ficheros.
    /// Se llama una vez por frame.
    pub fn poll_pending(&mut self) {
        self.poll_picked_files();

        match self.pending.take() {
            Some(PendingRequest::Upload(rx)) => match rx.try_recv() {
                Ok(outcome) => self.apply_upload_outcome(outcome),
                Err(TryRecvError::Empty) => self.pending = Some(PendingRequest::Upload(rx)),
                Err(TryRecvError::Disconnected) => {
                    self.apply_upload_outcome(Err(ApiError::Transport("request aborted".into())))
                }
            },
            Some(PendingRequest::Submit(rx)) => match rx.try_recv() {
                Ok(outcome) => self.apply_submit_outcome(outcome),
                Err(TryRecvError::Empty) => self.pending = Some(PendingRequest::Submit(rx)),
                Err(TryRecvError::Disconnected) => {
                    self.apply_submit_outcome(Err(ApiError::Transport("request aborted".into())))
                }
            },
            None => {}
        }
    }

    pub fn apply_upload_outcome(&mut self, outcome: UploadOutcome) {
        self.pending = None;
        match outcome {
            Ok(quiz) => {
                log::info!(
                    "Quiz generated: {} MCQ, {} SAQ",
                    quiz.mcq.len(),
                    quiz.saq.len()
                );
                self.quiz = Some(quiz);
                self.mcq_answers.clear();
                self.saq_answers.clear();
                self.mcq_presenter.reset();
                self.saq_presenter.reset();
                self.upload_error = None;
                self.stage = Stage::Mcq;
            }
            Err(ApiError::Rejected(rejection)) => {
                log::warn!("Upload rejected: {} {:?}", rejection.message, rejection.files);
                self.upload_error = Some(rejection);
            }
            Err(ApiError::Transport(err)) => {
                log::error!("Upload failed: {err}");
                self.upload_error = Some(UploadError::new(SERVER_UNREACHABLE));
            }
            Err(ApiError::Request(err)) => {
                log::error!("Could not prepare upload: {err}");
                self.upload_error = Some(UploadError::new(UPLOAD_NOT_SENT));
            }
            Err(ApiError::Http { status, body }) => {
                log::error!("Upload failed with HTTP {status}: {body}");
                self.upload_error = Some(UploadError::new(format!(
                    "{} (HTTP {status})",
                    api::UPLOAD_FAILED_MESSAGE
                )));
            }
            Err(ApiError::Malformed(err)) => {
                log::error!("Unexpected upload response: {err}");
                self.upload_error = Some(UploadError::new(UNEXPECTED_RESPONSE));
            }
        }
    }

    pub fn apply_submit_outcome(&mut self, outcome: SubmitOutcome) {
        self.pending = None;
        match outcome {
            Ok(result) => {
                log::info!(
                    "Quiz graded: {} / {}",
                    result.total_correct,
                    result.total_questions
                );
                self.result = Some(result);
                self.stage = Stage::Result;
            }
            Err(err) => {
                log::error!("Submission failed: {err}");
                self.alert = Some(match err {
                    ApiError::Http { body, .. } if !body.is_empty() => {
                        format!("{SUBMIT_FAILED_ALERT}: {body}")
                    }
                    _ => SUBMIT_FAILED_ALERT.to_string(),
                });
            }
        }
    }

    /// Guarda la respuesta si el id pertenece a las preguntas activas de ese tipo.
    /// `ActiveQuiz` ya ha rellenado todos los ids.
    pub fn record_answer(&mut self, kind: QuestionKind, question_id: &str, value: String) {
        let known = self
            .questions(kind)
            .iter()
            .any(|q| q.id.as_deref() == Some(question_id));
        if !known {
            log::warn!("Ignoring answer for unknown {kind:?} question {question_id}");
            return;
        }

        match kind {
            QuestionKind::Mcq => self.mcq_answers.insert(question_id.to_string(), value),
            QuestionKind::Saq => self.saq_answers.insert(question_id.to_string(), value),
            QuestionKind::Other => None,
        };
    }

    pub fn select_option(&mut self, kind: QuestionKind, label: &str) {
        let event = {
            let questions = self.questions(kind);
            self.presenter(kind).select_option(questions, label)
        };
        if let Some(event) = event {
            self.handle_presenter_event(kind, event);
        }
    }

    pub fn edit_text(&mut self, kind: QuestionKind, text: String) {
        let event = {
            let questions = self.questions(kind);
            self.presenter(kind).edit_text(questions, text)
        };
        if let Some(event) = event {
            self.handle_presenter_event(kind, event);
        }
    }

    pub fn advance(&mut self, kind: QuestionKind) {
        let questions = match (&self.quiz, kind) {
            (Some(quiz), QuestionKind::Mcq) => quiz.mcq.as_slice(),
            (Some(quiz), QuestionKind::Saq) => quiz.saq.as_slice(),
            _ => return,
        };
        let event = match kind {
            QuestionKind::Mcq => self.mcq_presenter.advance(questions, &self.mcq_answers),
            _ => self.saq_presenter.advance(questions, &self.saq_answers),
        };
        if let Some(event) = event {
            self.handle_presenter_event(kind, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionOptions;
    use crate::presenter::MCQ_WARNING;

    fn question(id: &str, kind: QuestionKind) -> Question {
        Question {
            id: Some(id.into()),
            kind,
            prompt: format!("prompt {id}"),
            options: match kind {
                QuestionKind::Mcq => Some(QuestionOptions::List(vec!["x".into(), "y".into()])),
                _ => None,
            },
        }
    }

    fn quiz(questions: Vec<Question>) -> ActiveQuiz {
        ActiveQuiz::from_questions(questions).unwrap()
    }

    fn app_with_quiz() -> QuizApp {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        app.add_files(vec![UploadedFile::new("a.pdf", vec![1])]);
        app.apply_upload_outcome(Ok(quiz(vec![
            question("m1", QuestionKind::Mcq),
            question("s1", QuestionKind::Saq),
            question("m2", QuestionKind::Mcq),
        ])));
        app
    }

    #[test]
    fn generate_without_files_alerts_and_stays() {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        app.generate_quiz();
        assert_eq!(app.alert.as_deref(), Some(NO_FILES_ALERT));
        assert!(!app.is_busy());
        assert_eq!(app.stage, Stage::Upload);
    }

    #[test]
    fn successful_generation_partitions_and_resets_answers() {
        let mut app = app_with_quiz();
        app.mcq_answers.insert("m1".into(), "A".into());
        app.apply_upload_outcome(Ok(quiz(vec![
            question("m1", QuestionKind::Mcq),
            question("s1", QuestionKind::Saq),
            question("m2", QuestionKind::Mcq),
        ])));

        assert_eq!(app.stage, Stage::Mcq);
        assert_eq!(app.questions(QuestionKind::Mcq).len(), 2);
        assert_eq!(app.questions(QuestionKind::Saq).len(), 1);
        assert!(app.mcq_answers.is_empty());
        assert!(app.saq_answers.is_empty());
        assert_eq!(app.file_names(), vec!["a.pdf"]);
    }

    #[test]
    fn rejection_keeps_upload_stage_and_files() {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        app.add_files(vec![UploadedFile::new("bad.pdf", vec![0])]);
        app.apply_upload_outcome(Err(ApiError::Rejected(UploadError {
            message: api::INVALID_FILE_MESSAGE.into(),
            files: vec!["bad.pdf".into()],
        })));

        assert_eq!(app.stage, Stage::Upload);
        assert_eq!(app.files.len(), 1);
        let err = app.upload_error.as_ref().unwrap();
        assert_eq!(err.files, vec!["bad.pdf".to_string()]);
    }

    #[test]
    fn transport_failure_reports_server_not_reachable() {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        app.apply_upload_outcome(Err(ApiError::Transport("refused".into())));
        assert_eq!(app.upload_error, Some(UploadError::new(SERVER_UNREACHABLE)));

        app.apply_upload_outcome(Err(ApiError::Malformed("no quiz".into())));
        assert_eq!(app.upload_error, Some(UploadError::new(UNEXPECTED_RESPONSE)));
        assert!(app.quiz.is_none());
    }

    #[test]
    fn request_that_never_left_is_not_blamed_on_the_server() {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        app.add_files(vec![UploadedFile::new("a.pdf", vec![1])]);
        app.apply_upload_outcome(Err(ApiError::Request("bad mime".into())));

        assert_eq!(app.stage, Stage::Upload);
        assert_eq!(app.upload_error, Some(UploadError::new(UPLOAD_NOT_SENT)));
        assert_ne!(app.upload_error, Some(UploadError::new(SERVER_UNREACHABLE)));
    }

    #[test]
    fn answers_use_ids_synthesized_for_the_quiz() {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        let mut unnamed = question("", QuestionKind::Saq);
        unnamed.id = None;
        app.apply_upload_outcome(Ok(quiz(vec![question("m1", QuestionKind::Mcq), unnamed])));

        app.record_answer(QuestionKind::Saq, "q_0", "wrong slot".into());
        app.record_answer(QuestionKind::Saq, "q_1", "because".into());

        assert_eq!(app.saq_answers.len(), 1);
        assert_eq!(app.saq_answers.get("q_1").map(String::as_str), Some("because"));
    }

    #[test]
    fn answers_for_unknown_ids_are_ignored() {
        let mut app = app_with_quiz();
        app.record_answer(QuestionKind::Mcq, "s1", "A".into());
        app.record_answer(QuestionKind::Mcq, "nope", "A".into());
        app.record_answer(QuestionKind::Mcq, "m2", "B".into());

        assert_eq!(app.mcq_answers.len(), 1);
        assert_eq!(app.mcq_answers.get("m2").map(String::as_str), Some("B"));
    }

    #[test]
    fn wizard_walks_mcq_then_saq_then_submit() {
        let mut app = app_with_quiz();

        app.advance(QuestionKind::Mcq);
        assert_eq!(app.mcq_presenter.warning(), Some(MCQ_WARNING));
        assert_eq!(app.mcq_presenter.index(), 0);

        app.select_option(QuestionKind::Mcq, "A");
        app.advance(QuestionKind::Mcq);
        assert_eq!(app.mcq_presenter.index(), 1);
        assert_eq!(app.mcq_presenter.warning(), None);

        app.select_option(QuestionKind::Mcq, "B");
        app.advance(QuestionKind::Mcq);
        assert_eq!(app.stage, Stage::Saq);

        app.edit_text(QuestionKind::Saq, "because".into());
        app.advance(QuestionKind::Saq);
        assert_eq!(app.stage, Stage::Submit);
        assert_eq!(app.saq_answers.get("s1").map(String::as_str), Some("because"));
    }

    #[test]
    fn submit_is_ignored_outside_submit_stage_and_while_busy() {
        let mut app = app_with_quiz();
        app.submit_quiz();
        assert!(!app.is_busy());

        app.stage = Stage::Submit;
        let (_tx, rx) = channel();
        app.pending = Some(PendingRequest::Submit(rx));
        app.submit_quiz();
        app.generate_quiz();
        assert!(matches!(app.pending, Some(PendingRequest::Submit(_))));
    }

    #[test]
    fn failed_submission_alerts_and_stays_on_submit() {
        let mut app = app_with_quiz();
        app.stage = Stage::Submit;
        app.apply_submit_outcome(Err(ApiError::Transport("refused".into())));

        assert_eq!(app.stage, Stage::Submit);
        assert_eq!(app.alert.as_deref(), Some(SUBMIT_FAILED_ALERT));
        assert!(app.result.is_none());
        assert!(!app.is_busy());
    }

    #[test]
    fn dropped_request_clears_busy() {
        let mut app = app_with_quiz();
        let (tx, rx) = channel::<UploadOutcome>();
        app.pending = Some(PendingRequest::Upload(rx));

        app.poll_pending();
        assert!(app.is_busy());

        drop(tx);
        app.poll_pending();
        assert!(!app.is_busy());
        assert_eq!(app.upload_error, Some(UploadError::new(SERVER_UNREACHABLE)));
    }
}
