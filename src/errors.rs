use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional detail, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

/// Failures raised by the data-access services.
///
/// Read-path database errors are isolated per endpoint: one failing panel
/// query reports "data unavailable" for that panel only. Write-path errors
/// carry the underlying cause. Nothing here retries; every failure is
/// terminal for that one operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// HTTP-facing wrapper mapping service failures onto status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("validation error: {0}")]
    Validation(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String, Option<String>) {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(msg.clone()),
            ),
            ApiError::Service(err) => match err {
                ServiceError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(msg.clone()),
                ),
                ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
                ServiceError::InvalidOperation(msg) => (StatusCode::CONFLICT, msg.clone(), None),
                ServiceError::Connection(msg) => {
                    tracing::error!("store connection failure: {}", msg);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Database connection unavailable".to_string(),
                        None,
                    )
                }
                ServiceError::Database(db_err) => {
                    // Underlying driver detail stays in the logs, not the body.
                    tracing::error!("database failure: {}", db_err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Data unavailable".to_string(),
                        None,
                    )
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = self.status_and_message();
        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message,
            details,
            timestamp: Utc::now().to_rfc3339(),
        };
        (status, Json(body)).into_response()
    }
}
