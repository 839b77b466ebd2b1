// src/error.rs
// Error taxonomy for the triage service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Generic detail returned on any classification failure. The underlying
/// error goes to the server log, never to the caller.
pub const GENERIC_FAILURE_DETAIL: &str =
    "An error occurred while processing the message. Please check the server logs.";

/// Main error type for the triage library
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("model output failed validation: {0}")]
    InvalidOutput(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for TriageError {
    fn from(err: reqwest::Error) -> Self {
        TriageError::Upstream(err.to_string())
    }
}

/// HTTP-facing error: a status code plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: GENERIC_FAILURE_DETAIL.to_string(),
        }
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            // Input problems carry their detail back to the caller.
            TriageError::InvalidInput(detail) => ApiError::bad_request(detail),
            // Everything else is logged by the handler and surfaced generically.
            TriageError::Config(_) | TriageError::InvalidOutput(_) | TriageError::Upstream(_) => {
                ApiError::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = TriageError::InvalidInput("too short".to_string());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_config_error() {
        let err = TriageError::Config("missing key".to_string());
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("missing key"));
    }

    #[test]
    fn test_upstream_error() {
        let err = TriageError::Upstream("connection refused".to_string());
        assert!(err.to_string().contains("upstream error"));
    }

    #[test]
    fn test_invalid_input_maps_to_400_with_detail() {
        let api: ApiError = TriageError::InvalidInput("Message cannot be empty.".to_string()).into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.detail, "Message cannot be empty.");
    }

    #[test]
    fn test_upstream_maps_to_generic_500() {
        let api: ApiError = TriageError::Upstream("api key secret-123 rejected".to_string()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.detail, GENERIC_FAILURE_DETAIL);
        assert!(!api.detail.contains("secret-123"));
    }

    #[test]
    fn test_invalid_output_maps_to_generic_500() {
        let api: ApiError = TriageError::InvalidOutput("score out of range".to_string()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.detail, GENERIC_FAILURE_DETAIL);
    }
}
