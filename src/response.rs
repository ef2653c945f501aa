//! Recognizing API-level failures inside JSON responses.
//!
//! The API reports errors in two unrelated envelopes, independently of the
//! HTTP status:
//!
//! - `{"status": "FALSE", "error": ...}`
//! - `{"request": {"result": "0", "errorId": ..., "errorMessage": ...}}`

use serde::Deserialize;

use crate::types::AnyJson;

/// Outcome of inspecting a parsed response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// No error envelope was found.
    Ok,
    /// An error envelope was found, with the message to report.
    Failed(String),
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiStatus::Ok)
    }

    pub fn as_failed(&self) -> Option<&str> {
        match self {
            ApiStatus::Failed(message) => Some(message.as_str()),
            ApiStatus::Ok => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    #[serde(default)]
    status: Option<AnyJson>,
    #[serde(default)]
    error: Option<AnyJson>,
    #[serde(default)]
    request: Option<AnyJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestEnvelope {
    #[serde(default)]
    result: Option<AnyJson>,
    #[serde(default)]
    error_id: Option<AnyJson>,
    #[serde(default)]
    error_message: Option<AnyJson>,
}

/// Text of a scalar field, treating empty strings and zero as absent.
fn scalar_text(value: &AnyJson) -> Option<String> {
    match value {
        AnyJson::String(s) if !s.is_empty() => Some(s.clone()),
        AnyJson::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Classify a parsed response body.
///
/// ```
/// use paynl_kit::response::{ApiStatus, classify};
/// use serde_json::json;
///
/// let body = json!({"status": "FALSE", "error": "invalid amount"});
/// assert_eq!(classify(&body), ApiStatus::Failed("invalid amount".into()));
///
/// let body = json!({"request": {"result": "1"}, "transaction": {}});
/// assert_eq!(classify(&body), ApiStatus::Ok);
/// ```
pub fn classify(body: &AnyJson) -> ApiStatus {
    // Bodies that are not objects cannot carry an envelope.
    if !body.is_object() {
        return ApiStatus::Ok;
    }
    let envelope = ErrorEnvelope::deserialize(body).unwrap_or_default();

    if envelope.status.as_ref().and_then(AnyJson::as_str) == Some("FALSE")
        && let Some(error) = envelope.error.filter(|e| !e.is_null())
    {
        let message = match error {
            AnyJson::String(s) => s,
            other => other.to_string(),
        };
        return ApiStatus::Failed(message);
    }

    if let Some(request) = envelope.request.filter(AnyJson::is_object)
        && let Ok(request) = RequestEnvelope::deserialize(&request)
        && request.result.as_ref().and_then(AnyJson::as_str) == Some("0")
        && let Some(error_id) = request.error_id.as_ref().and_then(scalar_text)
        && let Some(error_message) = request.error_message.as_ref().and_then(scalar_text)
    {
        return ApiStatus::Failed(format!("{error_id} {error_message}"));
    }

    ApiStatus::Ok
}
