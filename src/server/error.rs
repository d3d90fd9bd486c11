//! Mapping analysis failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::DebriefError;

pub type Result<T> = core::result::Result<T, Error>;

/// Error returned by handlers; renders as `{"error", "status", "kind"}`.
#[derive(Debug)]
pub struct Error(pub DebriefError);

impl Error {
    /// Machine-readable category sent alongside the message.
    pub fn kind(&self) -> &'static str {
        match &self.0 {
            DebriefError::InvalidRequest(_) => "invalid_request",
            DebriefError::InvalidTranscript(_) => "invalid_transcript",
            DebriefError::ModelInvocation(_) | DebriefError::Pipeline(_) => "model_invocation",
            DebriefError::ResultParsing(_) => "result_parsing",
            DebriefError::Timeout(_) => "timeout",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            DebriefError::InvalidRequest(_) | DebriefError::InvalidTranscript(_) => {
                StatusCode::BAD_REQUEST
            }
            DebriefError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl Error {
    /// JSON error envelope, with raw model output attached on parse failures.
    pub fn body(&self) -> Value {
        let mut body = json!({
            "error": self.0.to_string(),
            "status": "error",
            "kind": self.kind(),
        });

        if let DebriefError::ResultParsing(err) = &self.0 {
            body["raw_results"] = json!(err.raw);
        }

        body
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();

        if status.is_server_error() {
            error!(kind, "Analysis request failed: {}", self.0);
        } else {
            warn!(kind, "Rejected analysis request: {}", self.0);
        }

        (status, Json(self.body())).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DebriefError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
