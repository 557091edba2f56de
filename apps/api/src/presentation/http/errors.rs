//! HTTP error handling and response conversion.
//!
//! Errors are mapped to status codes and a `{"error": ...}` JSON body. Only a
//! short user-safe message is returned; the detail goes to the log.

use crate::domain::submission::SubmissionError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// A required field is missing (400).
    BadRequest(String),

    /// A field is present but malformed (400).
    ValidationError(String),

    /// Body is not valid JSON or does not match the payload shape (400).
    InvalidBody(String),

    /// Body exceeds the configured limit (413).
    PayloadTooLarge,

    /// Wrong HTTP method for the route (405).
    MethodNotAllowed,

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::InvalidBody(msg) => write!(f, "Invalid body: {}", msg),
            Self::PayloadTooLarge => write!(f, "Payload too large"),
            Self::MethodNotAllowed => write!(f, "Method not allowed"),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource not found".into(),
            Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError(msg) => msg.clone(),
            Self::InvalidBody(_) => "Invalid request body".into(),
            Self::PayloadTooLarge => "Request body too large".into(),
            Self::MethodNotAllowed => "Method not allowed".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }

    /// Parse detail for malformed bodies. Echoes serde's message only, which
    /// names the offending field but never carries server state.
    fn detail(&self) -> Option<&str> {
        match self {
            Self::InvalidBody(detail) => Some(detail),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        let body = match self.detail() {
            Some(detail) => json!({ "error": message, "detail": detail }),
            None => json!({ "error": message }),
        };
        (status, Json(body)).into_response()
    }
}

// === Domain Error Conversion ===

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::MissingField(field) => {
                tracing::debug!(field, "missing required field");
                AppError::BadRequest(err.to_string())
            }
            SubmissionError::InvalidField(field) => {
                AppError::ValidationError(format!("Invalid field: {}", field))
            }
            SubmissionError::UploadFailed { .. }
            | SubmissionError::NotificationDispatchFailed(_)
            | SubmissionError::UnexpectedFailure(_) => AppError::Internal(err.to_string()),
        }
    }
}

// === Extractor Rejection Conversion ===

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::InvalidBody(rejection.body_text())
    }
}
