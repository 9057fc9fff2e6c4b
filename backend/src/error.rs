use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Not found")]
    NotFound,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable kind, the only detail that crosses the boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingFields(_) => "missing_fields",
            AppError::InvalidFormat(_) => "invalid_format",
            AppError::UserNotFound => "user_not_found",
            AppError::NotFound => "not_found",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::InvalidFormat(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::InvalidFormat(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::InvalidFormat(e.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "Storage error");
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
            }
            other => {
                tracing::debug!(error = %other, kind = other.kind(), "Request rejected");
            }
        }

        let body = json!({ "error": self.kind() });

        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
