use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::ValidationError;

/// Errors surfaced at the HTTP boundary
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed fields, undecodable bodies, duplicate unique keys
    #[error("{0}")]
    Validation(String),

    /// No document with the requested id
    #[error("{0} not found!")]
    NotFound(&'static str),

    /// The path id is not a valid document id
    #[error("Invalid {entity} id: {value}")]
    InvalidId { entity: &'static str, value: String },

    /// Store or connectivity failure
    #[error(transparent)]
    Store(StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => AppError::Validation(err.to_string()),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::NotFound(_) => json!({ "message": self.to_string() }),
            AppError::Store(err) => {
                tracing::error!("Store failure: {}", err);
                json!({ "error": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
