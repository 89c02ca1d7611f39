//! Resolución de la URL del backend del quiz.

pub const BACKEND_PORT: u16 = 8005;
pub const UPLOAD_PATH: &str = "/upload_pdfs/";
pub const SUBMIT_PATH: &str = "/submit_quiz/";

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_NATIVE_BACKEND: &str = "http://127.0.0.1:8005";

pub fn normalize_base(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let trimmed = trimmed.trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `base` + ruta del endpoint, sin barras duplicadas.
pub fn endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{}", path.trim_start_matches('/'))
}

pub fn upload_url(base: &str) -> String {
    endpoint(base, UPLOAD_PATH)
}

pub fn submit_url(base: &str) -> String {
    endpoint(base, SUBMIT_PATH)
}

/// Backend servido desde el mismo host que la página, puerto fijo, HTTP plano.
pub fn base_for_hostname(hostname: &str) -> String {
    let host = if hostname.trim().is_empty() {
        "127.0.0.1"
    } else {
        hostname.trim()
    };
    format!("http://{host}:{BACKEND_PORT}")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn backend_base_url() -> String {
    std::env::var("PDF_QUIZ_BACKEND_URL")
        .ok()
        .and_then(|v| normalize_base(&v))
        .unwrap_or_else(|| DEFAULT_NATIVE_BACKEND.to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn backend_base_url() -> String {
    backend_from_build_env()
        .or_else(backend_from_querystring)
        .or_else(backend_from_meta)
        .or_else(backend_from_local_storage)
        .unwrap_or_else(backend_from_page_host)
}

#[cfg(target_arch = "wasm32")]
fn backend_from_build_env() -> Option<String> {
    option_env!("PDF_QUIZ_BACKEND_URL").and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn backend_from_querystring() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "backend" {
            let decoded = js_sys::decode_uri_component(value).ok()?;
            let decoded = decoded.as_string()?;
            return normalize_base(&decoded);
        }
    }

    None
}

#[cfg(target_arch = "wasm32")]
fn backend_from_meta() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector("meta[name='pdf-quiz-backend']")
        .ok()??;

    meta.get_attribute("content")
        .as_deref()
        .and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn backend_from_local_storage() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item("pdf_quiz_backend")
        .ok()?
        .as_deref()
        .and_then(normalize_base)
}

#[cfg(target_arch = "wasm32")]
fn backend_from_page_host() -> String {
    let hostname = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    base_for_hostname(&hostname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slashes() {
        assert_eq!(
            upload_url("http://localhost:8005/"),
            "http://localhost:8005/upload_pdfs/"
        );
        assert_eq!(
            submit_url("http://localhost:8005"),
            "http://localhost:8005/submit_quiz/"
        );
    }

    #[test]
    fn blank_base_is_rejected() {
        assert_eq!(normalize_base("   "), None);
        assert_eq!(normalize_base("/"), None);
        assert_eq!(
            normalize_base(" http://quiz.local:8005// ").as_deref(),
            Some("http://quiz.local:8005")
        );
    }

    #[test]
    fn page_host_maps_to_fixed_port() {
        assert_eq!(base_for_hostname("quiz.example.org"), "http://quiz.example.org:8005");
        assert_eq!(base_for_hostname(""), "http://127.0.0.1:8005");
    }
}
