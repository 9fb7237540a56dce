use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sources::SourceError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Watch-list error: {0}")]
    WatchList(#[from] SourceError),

    #[error("Invalid address format")]
    InvalidAddress,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred".to_string()),
            ApiError::WatchList(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update watch-list".to_string()),
            ApiError::InvalidAddress => (StatusCode::BAD_REQUEST, "Invalid blockchain address format".to_string()),
            ApiError::InvalidParameter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidAddress(_) => ApiError::InvalidAddress,
            ValidationError::InvalidAction(msg) => ApiError::InvalidParameter(format!("Invalid action: {}", msg)),
            ValidationError::MissingParameter(param) => ApiError::BadRequest(format!("Missing parameter: {}", param)),
            ValidationError::InvalidParameter(msg) => ApiError::InvalidParameter(msg),
        }
    }
}
