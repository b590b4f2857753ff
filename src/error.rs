//! Error types for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::{ExtractionError, UploadError};

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Upload(e) => match e {
                UploadError::Decode(_) => (StatusCode::BAD_REQUEST, "decode_error"),
                UploadError::Extraction(ExtractionError::Task(_)) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
                UploadError::Extraction(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "extraction_error")
                }
                UploadError::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "too_large"),
                UploadError::Superseded => (StatusCode::CONFLICT, "superseded"),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let message = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            "An internal error occurred".to_string()
        } else {
            match &self {
                AppError::Upload(e) => e.to_string(),
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
