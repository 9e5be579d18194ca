use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinerate_core::error::{CoreError, StoreError};
use serde_json::json;

/// Message returned to clients for any failure whose detail stays internal.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred, try again";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for adapter
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinerate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by a store adapter.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a message that is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Store adapter errors ---
            AppError::Store(store) => match store {
                StoreError::Duplicate(detail) => {
                    tracing::warn!(error = %detail, "Store rejected duplicate record");
                    (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        "Resource already exists".to_string(),
                    )
                }
                StoreError::MovieNotFound(name) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Movie '{name}' not found"),
                ),
                StoreError::Backend(detail) => {
                    tracing::error!(error = %detail, "Store failure");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
