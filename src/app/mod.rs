use crate::api::ApiError;
use crate::config;
use crate::model::{
    ActiveQuiz, AnswerSet, Question, QuestionKind, Stage, SubmissionResult, UploadError,
    UploadedFile,
};
use crate::presenter::{PresenterEvent, QuestionPresenter};
use std::sync::mpsc::Receiver;

// Submódulos
pub mod actions;
pub mod files;
pub mod queries;
pub mod resets;
pub mod view_models;

pub use crate::view_models::FeedbackCard;

pub const NO_FILES_ALERT: &str = "Please select at least one PDF";
pub const SERVER_UNREACHABLE: &str = "Server not reachable";
pub const UPLOAD_NOT_SENT: &str = "Could not prepare the upload";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from server";
pub const SUBMIT_FAILED_ALERT: &str = "Error submitting quiz";

/// Petición de red en curso. Solo puede haber una.
pub(crate) enum PendingRequest {
    Upload(Receiver<Result<ActiveQuiz, ApiError>>),
    Submit(Receiver<Result<SubmissionResult, ApiError>>),
}

/// Controlador del asistente: dueño de todo el estado de la sesión.
pub struct QuizApp {
    pub stage: Stage,
    pub files: Vec<UploadedFile>,
    pub mcq_answers: AnswerSet,
    pub saq_answers: AnswerSet,
    pub quiz: Option<ActiveQuiz>,
    pub result: Option<SubmissionResult>,
    pub upload_error: Option<UploadError>,
    /// Aviso modal pendiente de cerrar.
    pub alert: Option<String>,
    pub mcq_presenter: QuestionPresenter,
    pub saq_presenter: QuestionPresenter,
    pub backend_url: String,
    pub(crate) pending: Option<PendingRequest>,
    pub(crate) picked_rx: Option<Receiver<Vec<UploadedFile>>>,
}

impl QuizApp {
    pub fn new() -> Self {
        let backend_url = config::backend_base_url();
        log::info!("Backend URL: {backend_url}");
        Self::with_backend(backend_url)
    }

    pub fn with_backend(backend_url: impl Into<String>) -> Self {
        Self {
            stage: Stage::Upload,
            files: Vec::new(),
            mcq_answers: AnswerSet::new(),
            saq_answers: AnswerSet::new(),
            quiz: None,
            result: None,
            upload_error: None,
            alert: None,
            mcq_presenter: QuestionPresenter::new(QuestionKind::Mcq),
            saq_presenter: QuestionPresenter::new(QuestionKind::Saq),
            backend_url: backend_url.into(),
            pending: None,
            picked_rx: None,
        }
    }

    /// Aplica un evento del presentador del tipo `kind`.
    pub fn handle_presenter_event(&mut self, kind: QuestionKind, event: PresenterEvent) {
        match event {
            PresenterEvent::AnswerChanged { question_id, value } => {
                self.record_answer(kind, &question_id, value);
            }
            PresenterEvent::Finished => match (kind, self.stage) {
                (QuestionKind::Mcq, Stage::Mcq) => {
                    self.saq_presenter.reset();
                    self.stage = Stage::Saq;
                }
                (QuestionKind::Saq, Stage::Saq) => self.stage = Stage::Submit,
                (kind, stage) => {
                    log::warn!("Ignoring finish of {kind:?} questions while in {stage:?}");
                }
            },
        }
    }
}

impl Default for QuizApp {
    fn default() -> Self {
        Self::new()
    }
}
