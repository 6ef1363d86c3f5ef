//! Client for the training service's analyze endpoint.
//!
//! Submits the dashboard form as multipart/form-data and decodes the JSON
//! result. Success bodies carry the test accuracy and per-epoch history;
//! failure bodies carry an `error` string. Errors are terminal for the
//! attempt; the caller never retries automatically.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::http_client;

/// Base URL used when the config file does not name a service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const MAX_ANALYZE_RESPONSE_BYTES: usize = 1024 * 1024;

/// Form fields submitted to the analyze endpoint.
#[derive(Clone, Debug)]
pub struct AnalyzeRequest {
    /// Model identifier understood by the service.
    pub model_name: String,
    /// Number of training epochs to request.
    pub epochs: u32,
    /// Optional dataset file uploaded with the form.
    pub dataset: Option<PathBuf>,
}

/// Per-epoch accuracy series returned by the service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TrainingHistory {
    pub accuracy: Vec<f64>,
    pub val_accuracy: Vec<f64>,
}

/// Successful analyze result.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    /// Held-out accuracy in `[0, 1]`.
    pub test_accuracy: f64,
    pub training_history: TrainingHistory,
}

/// Failure modes of one analyze attempt.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The service rejected the submission and explained why.
    #[error("{0}")]
    Server(String),
    /// The service base URL in the config is not usable.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
    /// The dataset file could not be read before upload.
    #[error("Failed to read dataset {path}: {source}")]
    Dataset {
        path: PathBuf,
        source: io::Error,
    },
    /// The request never completed.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

/// Submit the form to `POST {base_url}/analyze` and decode the result.
pub fn analyze(base_url: &str, request: &AnalyzeRequest) -> Result<AnalyzeResponse, AnalyzeError> {
    let url = analyze_url(base_url)?;
    let boundary = format!("trainboard-{}", uuid::Uuid::new_v4().simple());
    let body = encode_multipart(request, &boundary)?;

    let response = match http_client::agent()
        .post(url.as_str())
        .set("Accept", "application/json")
        .set(
            "Content-Type",
            &format!("multipart/form-data; boundary={boundary}"),
        )
        .send_bytes(&body)
    {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = read_body_limited(response).unwrap_or_else(|err| err);
            return Err(map_status_error(code, body));
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(AnalyzeError::Transport(err.to_string()));
        }
    };

    let body = read_body_limited(response).map_err(AnalyzeError::Json)?;
    parse_analyze_response(&body)
}

fn analyze_url(base_url: &str) -> Result<Url, AnalyzeError> {
    let base = Url::parse(base_url).map_err(|err| AnalyzeError::InvalidUrl(err.to_string()))?;
    base.join("analyze")
        .map_err(|err| AnalyzeError::InvalidUrl(err.to_string()))
}

fn map_status_error(code: u16, body: String) -> AnalyzeError {
    match parse_error_message(&body) {
        Some(message) => AnalyzeError::Server(message),
        None => AnalyzeError::Server(format!("HTTP {code}: {body}")),
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorBodyWire {
    error: Option<String>,
    message: Option<String>,
}

fn parse_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBodyWire = serde_json::from_str(body.trim()).ok()?;
    parsed.error.or(parsed.message)
}

fn parse_analyze_response(body: &str) -> Result<AnalyzeResponse, AnalyzeError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AnalyzeError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| AnalyzeError::Json(format!("{err}: {trimmed}")))
}

fn encode_multipart(request: &AnalyzeRequest, boundary: &str) -> Result<Vec<u8>, AnalyzeError> {
    let mut body = Vec::new();
    push_text_part(&mut body, boundary, "model_name", &request.model_name);
    push_text_part(&mut body, boundary, "epochs", &request.epochs.to_string());
    if let Some(path) = &request.dataset {
        let bytes = std::fs::read(path).map_err(|source| AnalyzeError::Dataset {
            path: path.clone(),
            source,
        })?;
        push_file_part(&mut body, boundary, "dataset", path, &bytes);
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    Ok(body)
}

fn push_text_part(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .as_bytes(),
    );
}

fn push_file_part(body: &mut Vec<u8>, boundary: &str, name: &str, path: &Path, bytes: &[u8]) {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("dataset");
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, MAX_ANALYZE_RESPONSE_BYTES)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
