//! Service error types with HTTP status code mapping.
//!
//! [`SantaError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and a flat JSON error response.
//! User-facing variants carry an already-localized message (see
//! [`crate::domain::Messages`]).

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": "Name is not allowed!",
///   "code": "INVALID_NAME"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable (localized for client errors) message.
    pub error: String,
    /// Stable machine-readable error code.
    pub code: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant             | HTTP Status               |
/// |---------------------|---------------------------|
/// | `InvalidName`       | 400 Bad Request           |
/// | `AlreadyRegistered` | 400 Bad Request           |
/// | `Exhausted`         | 400 Bad Request           |
/// | `EmailRequired`     | 400 Bad Request           |
/// | `MalformedRequest`  | 400 Bad Request           |
/// | `PersistenceError`  | 500 Internal Server Error |
/// | `Config`            | 500 (startup only)        |
#[derive(Debug, thiserror::Error)]
pub enum SantaError {
    /// The name is not on the allow-list.
    #[error("{0}")]
    InvalidName(String),

    /// A registration for this name already exists.
    #[error("{0}")]
    AlreadyRegistered(String),

    /// Every allow-listed name has already been assigned as a receiver.
    #[error("{0}")]
    Exhausted(String),

    /// The service requires an email and none was supplied.
    #[error("{0}")]
    EmailRequired(String),

    /// The request body could not be read as a registration.
    #[error("{0}")]
    MalformedRequest(String),

    /// Storage layer failure (connectivity, constraint violation, I/O).
    #[error("{0}")]
    PersistenceError(String),

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SantaError {
    /// Returns the machine-readable error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "INVALID_NAME",
            Self::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            Self::Exhausted(_) => "EXHAUSTED",
            Self::EmailRequired(_) => "EMAIL_REQUIRED",
            Self::MalformedRequest(_) => "MALFORMED_REQUEST",
            Self::PersistenceError(_) => "PERSISTENCE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidName(_)
            | Self::AlreadyRegistered(_)
            | Self::Exhausted(_)
            | Self::EmailRequired(_)
            | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::PersistenceError(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for SantaError {
    fn from(e: sqlx::Error) -> Self {
        Self::PersistenceError(e.to_string())
    }
}

impl From<std::io::Error> for SantaError {
    fn from(e: std::io::Error) -> Self {
        Self::PersistenceError(e.to_string())
    }
}

impl From<serde_json::Error> for SantaError {
    fn from(e: serde_json::Error) -> Self {
        Self::PersistenceError(format!("document encoding error: {e}"))
    }
}

impl From<JsonRejection> for SantaError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for SantaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let errors = [
            SantaError::InvalidName("x".to_string()),
            SantaError::AlreadyRegistered("x".to_string()),
            SantaError::Exhausted("x".to_string()),
            SantaError::EmailRequired("x".to_string()),
            SantaError::MalformedRequest("x".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn persistence_error_maps_to_internal_server_error() {
        let err = SantaError::PersistenceError("disk full".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "PERSISTENCE_ERROR");
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn display_is_the_carried_message() {
        let err = SantaError::AlreadyRegistered("Already registered!".to_string());
        assert_eq!(err.to_string(), "Already registered!");
    }

    #[tokio::test]
    async fn into_response_sets_status_and_body() {
        let response = SantaError::Exhausted("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(json) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("body is not json");
        };
        assert_eq!(json["error"], "gone");
        assert_eq!(json["code"], "EXHAUSTED");
    }
}
