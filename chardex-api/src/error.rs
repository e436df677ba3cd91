use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chardex::error::DocumentStoreError;

use crate::models::MessageResponse;

/// Application-level error type for HTTP handlers.
///
/// Every variant maps to one status code. Bodies are always `{ "message": ... }`;
/// 5xx responses carry a fixed message and the cause only goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The named character does not exist.
    #[error("Character not found")]
    NotFound,

    /// The request path or body could not be read as a character.
    #[error("{0}")]
    InvalidInput(String),

    /// A write would duplicate a unique value.
    #[error("{0}")]
    Conflict(String),

    /// The document store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Conflict raised when a character called `name` already exists.
    pub fn name_taken(name: &str) -> Self {
        AppError::Conflict(format!("A character named '{name}' already exists"))
    }

    /// Converts a store error raised by a write of a character called `name`.
    pub fn from_write(err: DocumentStoreError, name: &str) -> Self {
        match err {
            DocumentStoreError::DuplicateKey(..) => AppError::name_taken(name),
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DocumentStoreError> for AppError {
    fn from(err: DocumentStoreError) -> Self {
        match err {
            DocumentStoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
            DocumentStoreError::DuplicateKey(field, _) => {
                AppError::Conflict(format!("Duplicate value for {field}"))
            }
            DocumentStoreError::InvalidDocument(msg) => {
                AppError::InvalidInput(format!("Invalid character: {msg}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::StoreUnavailable(cause) => {
                tracing::error!(error = %cause, "Document store unavailable");
                "Service temporarily unavailable".to_string()
            }
            AppError::Internal(cause) => {
                tracing::error!(error = %cause, "Internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
