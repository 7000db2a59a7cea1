use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nodeflow_core::error::CoreError;
use nodeflow_events::DeliveryError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the two external collaborators'
/// failures. Nothing is retried or recovered here; every variant becomes the
/// procedure's result via [`IntoResponse`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `nodeflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The relational store failed (unreachable, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The orchestrator did not accept an event.
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// The orchestrator asked this process to run a function it does not host.
    #[error("Function not served: {0}")]
    FunctionNotServed(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Unauthenticated(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Orchestrator errors ---
            AppError::Delivery(err) => {
                tracing::error!(error = %err, "Event delivery failed");
                (StatusCode::BAD_GATEWAY, "DELIVERY_ERROR", err.to_string())
            }
            AppError::FunctionNotServed(fn_id) => (
                StatusCode::NOT_IMPLEMENTED,
                "FUNCTION_NOT_SERVED",
                format!("Function '{fn_id}' is executed by the orchestrator worker, not this server"),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
