use std::time::Duration;

use http::StatusCode;

/// Error types for Pay.nl client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required request field is missing. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, DNS or client construction failure.
    #[error("HTTP request error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered, but with an error.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// JSON serialization/deserialization errors.
    #[error("Serde JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL is not valid.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// A field the operation depends on is absent from the API response.
    #[error("Missing field `{0}` in API response")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

/// Failures reported by the remote API, either through the HTTP status or
/// through an error envelope in the response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// An error envelope was recognized in the body.
    #[error("{0}")]
    Api(String),

    /// Non-success status with no usable body.
    #[error("{}", status_line(.0))]
    Status(StatusCode),

    /// Non-success status with a body that is not JSON.
    #[error("{body}")]
    Body { status: StatusCode, body: String },
}

impl ProtocolError {
    /// The HTTP status attached to this failure, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProtocolError::Api(_) => None,
            ProtocolError::Status(status) | ProtocolError::Body { status, .. } => Some(*status),
        }
    }
}

fn status_line(status: &StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// A specialized `Result` type for Pay.nl client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reads_code_and_reason() {
        let err = ProtocolError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "503 Service Unavailable");
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn unknown_status_has_no_trailing_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(ProtocolError::Status(status).to_string(), "599");
    }

    #[test]
    fn api_and_body_errors_carry_their_text() {
        assert_eq!(
            Error::from(ProtocolError::Api("invalid amount".into())).to_string(),
            "invalid amount"
        );

        let body = ProtocolError::Body {
            status: StatusCode::BAD_GATEWAY,
            body: "<html>bad gateway</html>".into(),
        };
        assert_eq!(body.to_string(), "<html>bad gateway</html>");
    }
}
