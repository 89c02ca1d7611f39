//! Cliente HTTP del backend: subida de PDFs y corrección del quiz.
//!
//! En nativo se usa `reqwest::blocking` (se llama desde un hilo aparte);
//! en WASM se usa `fetch` a través de `web_sys`. El parseo de las respuestas
//! es común a los dos.

use crate::config;
use crate::model::{ActiveQuiz, AnswerSet, Question, SubmissionResult, UploadError, UploadedFile};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const INVALID_FILE_MESSAGE: &str =
    "Invalid file detected. Please upload a valid, unprotected PDF.";
pub const NON_ENGLISH_MESSAGE: &str = "Only English-language documents are supported.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("server not reachable: {0}")]
    Transport(String),
    /// La petición no se pudo montar en local; nunca llegó a salir.
    #[error("could not build request: {0}")]
    Request(String),
    #[error("upload rejected: {}", .0.message)]
    Rejected(UploadError),
    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unexpected response from backend: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitRequest {
    pub pdf_names: Vec<String>,
    pub mcq_answers: AnswerSet,
    pub saq_answers: AnswerSet,
}

/// `error` solo cuenta si trae algo: `null`, `false` o `""` se ignoran.
fn has_error_field(value: &Value) -> bool {
    value.get("error").is_some_and(|e| match e {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn rejection_from(value: &Value) -> UploadError {
    let code = value.get("error").and_then(Value::as_str);
    let server_message = value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty());

    let message = match code {
        Some("invalid_file") => INVALID_FILE_MESSAGE.to_string(),
        Some("non_english_file") => NON_ENGLISH_MESSAGE.to_string(),
        _ => server_message.unwrap_or(UPLOAD_FAILED_MESSAGE).to_string(),
    };

    let files = value
        .get("files")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    UploadError { message, files }
}

/// Interpreta la respuesta de `/upload_pdfs/` y valida el quiz recibido.
pub fn parse_upload_response(status: u16, ok: bool, body: &str) -> Result<ActiveQuiz, ApiError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(err) if ok => return Err(ApiError::Malformed(err.to_string())),
        Err(_) => {
            return Err(ApiError::Http {
                status,
                body: body.trim().to_string(),
            });
        }
    };

    if !ok || has_error_field(&value) {
        return Err(ApiError::Rejected(rejection_from(&value)));
    }

    let quiz = value
        .get("quiz")
        .filter(|q| !q.is_null())
        .ok_or_else(|| ApiError::Malformed("missing `quiz` field".into()))?;

    let questions = serde_json::from_value::<Vec<Question>>(quiz.clone())
        .map_err(|err| ApiError::Malformed(format!("invalid `quiz` field: {err}")))?;
    ActiveQuiz::from_questions(questions).map_err(ApiError::Malformed)
}

/// Interpreta la respuesta de `/submit_quiz/`.
pub fn parse_submit_response(
    status: u16,
    ok: bool,
    body: &str,
) -> Result<SubmissionResult, ApiError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(err) if ok => return Err(ApiError::Malformed(err.to_string())),
        Err(_) => {
            return Err(ApiError::Http {
                status,
                body: body.trim().to_string(),
            });
        }
    };

    if !ok || has_error_field(&value) {
        let detail = value
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string());
        return Err(ApiError::Http {
            status,
            body: detail,
        });
    }

    serde_json::from_value::<SubmissionResult>(value)
        .map_err(|err| ApiError::Malformed(format!("invalid submission result: {err}")))
}

#[cfg(not(target_arch = "wasm32"))]
fn http_client() -> Result<reqwest::blocking::Client, ApiError> {
    // Generar el quiz puede tardar bastante: sin timeout.
    reqwest::blocking::Client::builder()
        .timeout(None)
        .build()
        .map_err(|err| ApiError::Request(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_response(response: reqwest::blocking::Response) -> Result<(u16, bool, String), ApiError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    Ok((status.as_u16(), status.is_success(), body))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn upload_pdfs(base: &str, files: &[UploadedFile]) -> Result<ActiveQuiz, ApiError> {
    use reqwest::blocking::multipart::{Form, Part};

    let mut form = Form::new();
    for file in files {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str("application/pdf")
            .map_err(|err| ApiError::Request(err.to_string()))?;
        form = form.part("files", part);
    }

    let url = config::upload_url(base);
    log::info!("Uploading {} PDF(s) to {url}", files.len());

    let response = http_client()?
        .post(&url)
        .multipart(form)
        .send()
        .map_err(|err| ApiError::Transport(err.to_string()))?;

    let (status, ok, body) = read_response(response)?;
    parse_upload_response(status, ok, &body)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn submit_quiz(base: &str, request: &SubmitRequest) -> Result<SubmissionResult, ApiError> {
    let url = config::submit_url(base);
    log::info!(
        "Submitting {} MCQ and {} SAQ answer(s) to {url}",
        request.mcq_answers.len(),
        request.saq_answers.len()
    );

    let response = http_client()?
        .post(&url)
        .json(request)
        .send()
        .map_err(|err| ApiError::Transport(err.to_string()))?;

    let (status, ok, body) = read_response(response)?;
    parse_submit_response(status, ok, &body)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(
    url: &str,
    body: &wasm_bindgen::JsValue,
    json: bool,
) -> Result<(u16, bool, String), ApiError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(body);

    let window = web_sys::window()
        .ok_or_else(|| ApiError::Request("no window in WASM environment".into()))?;

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|err| ApiError::Request(format!("{err:?}")))?;

    // Con FormData el navegador pone el boundary del multipart.
    if json {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| ApiError::Request(format!("could not set headers: {err:?}")))?;
    }

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| ApiError::Transport(format!("fetch failed: {err:?}")))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch did not return a Response".into()))?;

    let promise = response
        .text()
        .map_err(|err| ApiError::Transport(format!("could not read body: {err:?}")))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|err| ApiError::Transport(format!("could not read body: {err:?}")))?
        .as_string()
        .unwrap_or_default();

    Ok((response.status(), response.ok(), text))
}

#[cfg(target_arch = "wasm32")]
fn pdf_blob(file: &UploadedFile) -> Result<web_sys::Blob, ApiError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let props = web_sys::BlobPropertyBag::new();
    props.set_type("application/pdf");

    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|err| ApiError::Request(format!("could not build blob: {err:?}")))
}

#[cfg(target_arch = "wasm32")]
pub async fn upload_pdfs(base: &str, files: &[UploadedFile]) -> Result<ActiveQuiz, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|err| ApiError::Request(format!("could not build form: {err:?}")))?;

    for file in files {
        let blob = pdf_blob(file)?;
        form.append_with_blob_and_filename("files", &blob, &file.name)
            .map_err(|err| ApiError::Request(format!("could not attach file: {err:?}")))?;
    }

    let url = config::upload_url(base);
    log::info!("Uploading {} PDF(s) to {url}", files.len());

    let (status, ok, body) = fetch_text(&url, &form, false).await?;
    parse_upload_response(status, ok, &body)
}

#[cfg(target_arch = "wasm32")]
pub async fn submit_quiz(base: &str, request: &SubmitRequest) -> Result<SubmissionResult, ApiError> {
    let payload = serde_json::to_string(request)
        .map_err(|err| ApiError::Request(format!("could not serialize answers: {err}")))?;

    let url = config::submit_url(base);
    log::info!(
        "Submitting {} MCQ and {} SAQ answer(s) to {url}",
        request.mcq_answers.len(),
        request.saq_answers.len()
    );

    let body = wasm_bindgen::JsValue::from_str(&payload);
    let (status, ok, text) = fetch_text(&url, &body, true).await?;
    parse_submit_response(status, ok, &text)
}
