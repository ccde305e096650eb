//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Whether internal error messages are shown to API callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailPolicy {
    Expose,
    #[default]
    Omit,
}

impl DetailPolicy {
    pub fn apply(self, details: impl FnOnce() -> String) -> Option<String> {
        match self {
            DetailPolicy::Expose => Some(details()),
            DetailPolicy::Omit => None,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub fn bad_request(message: impl Into<String>, details: Option<String>) -> Response {
    error(StatusCode::BAD_REQUEST, message.into(), details)
}

pub fn internal_error(message: impl Into<String>, details: Option<String>) -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, message.into(), details)
}

fn error(status: StatusCode, message: String, details: Option<String>) -> Response {
    let body = ErrorBody {
        error: message,
        details,
    };
    (status, Json(body)).into_response()
}
