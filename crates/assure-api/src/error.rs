//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from assure-assess and assure-catalog to HTTP
//! status codes and the dashboard error envelope
//! `{ "success": false, "error": { "code", "message" } }`.
//! Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use assure_assess::{AnswerError, ScoringError, WizardError};

/// The error envelope returned for every failed request.
///
/// `success` is always `false` — the discriminator lets dashboard
/// clients branch on a single field before reading either `data` or
/// `error`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// The error detail.
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Build an error envelope from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure — missing or malformed bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict with the current session state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status code and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}

/// Wizard failures map to two client-visible failure kinds: validation
/// problems (incomplete controls, bad answers) are 422, and out-of-order
/// operations on a session are 409 conflicts.
impl From<WizardError> for ApiError {
    fn from(err: WizardError) -> Self {
        match &err {
            WizardError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
            WizardError::IncompleteControl { .. }
            | WizardError::EmptyFramework { .. }
            | WizardError::Answer(_)
            | WizardError::Scoring(_) => Self::Validation(err.to_string()),
        }
    }
}

impl From<AnswerError> for ApiError {
    fn from(err: AnswerError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<assure_core::ValidationError> for ApiError {
    fn from(err: assure_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn status_codes() {
        let cases: Vec<(ApiError, StatusCode, &str)> = vec![
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                ApiError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (
                ApiError::BadRequest("x".into()),
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                ApiError::Unauthorized("x".into()),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                ApiError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            let (s, c) = err.status_and_code();
            assert_eq!(s, status);
            assert_eq!(c, code);
        }
    }

    #[test]
    fn error_body_carries_success_false() {
        let body = ErrorBody::new("TEST", "test message");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], serde_json::json!(false));
        assert_eq!(json["error"]["code"], "TEST");
        assert_eq!(json["error"]["message"], "test message");
    }

    #[test]
    fn wizard_invalid_transition_is_conflict() {
        let err = WizardError::InvalidTransition {
            from: "REVIEW".into(),
            to: "ANSWER_CONTROL".into(),
            reason: "already reviewing".into(),
        };
        let api: ApiError = err.into();
        let (status, _) = api.status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn wizard_incomplete_control_is_validation() {
        let err = WizardError::IncompleteControl {
            control_id: assure_core::ControlId::new("c1").unwrap(),
            control_title: "Access control".into(),
            missing: vec![assure_core::QuestionId::new("q1").unwrap()],
        };
        let api: ApiError = err.into();
        let (status, _) = api.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(format!("{api}").contains("Access control"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let response = ApiError::Internal("db connection failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.error.message.contains("db connection"));
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(!body.success);
    }

    #[tokio::test]
    async fn into_response_not_found_keeps_message() {
        let response = ApiError::NotFound("framework pci-dss".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("pci-dss"));
    }
}
