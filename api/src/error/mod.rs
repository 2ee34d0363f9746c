use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("API key not configured")]
    Configuration(String),
    #[error("Sync failed: {0}")]
    SyncFailed(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;

impl ExplorerError {
    fn status_and_summary(&self) -> (StatusCode, &'static str) {
        match self {
            ExplorerError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "API key not configured")
            }
            ExplorerError::SyncFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Sync failed"),
            ExplorerError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read from database")
            }
            ExplorerError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            ExplorerError::Conflict(_) => (StatusCode::CONFLICT, "Sync already in progress"),
        }
    }

    fn details(&self) -> &str {
        match self {
            ExplorerError::Configuration(msg)
            | ExplorerError::SyncFailed(msg)
            | ExplorerError::Database(msg)
            | ExplorerError::NotFound(msg)
            | ExplorerError::Conflict(msg) => msg,
        }
    }
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let (status, summary) = self.status_and_summary();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": summary,
            "details": self.details(),
        }));

        (status, body).into_response()
    }
}

// DbError to ExplorerError conversion implementation
impl From<DbError> for ExplorerError {
    fn from(err: DbError) -> Self {
        ExplorerError::Database(err.to_string())
    }
}
