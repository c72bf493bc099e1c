//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fglist_repository::RepositoryError;
use serde_json::json;
use std::fmt;
use tracing::error;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Invalid request (bad filename, bad entry, bad index)
    InvalidRequest(String),

    /// Request conflicts with current file content
    Conflict(String),

    /// Internal server error
    InternalError(String),

    /// Not found
    NotFound(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::Conflict(msg)
            | ServerError::InternalError(msg)
            | ServerError::NotFound(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<RepositoryError> for ServerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidFilename { .. }
            | RepositoryError::InvalidEntry(_)
            | RepositoryError::IndexOutOfRange { .. } => ServerError::InvalidRequest(err.to_string()),
            RepositoryError::DuplicateEntry { .. } => ServerError::Conflict(err.to_string()),
            RepositoryError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            RepositoryError::Io(_)
            | RepositoryError::InvalidPath { .. }
            | RepositoryError::Other(_) => {
                error!("Repository failure: {}", err);
                ServerError::InternalError(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
