// Error types for the storage boundary and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;

// Failures reported by a storage backend.
//
// The catalog core never lets these reach a client: the orchestrator logs
// them and answers with an empty, well-formed result instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage call exceeded {0:?}")]
    Timeout(Duration),
    #[error("stored document could not be decoded: {0}")]
    Corrupt(String),
}

// Application error type for handlers outside the always-succeeds listing path
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    NotFound(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::InternalServerError(error.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, format!("{} not found", what))
            }
        };

        (status, error_message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
