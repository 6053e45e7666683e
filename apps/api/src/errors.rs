use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure in the predict flow maps to exactly one variant; the
/// response body is always `{"detail": <message>}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required upload field was absent from the multipart form.
    #[error("File not provided.")]
    MissingInput,

    #[error("File not found: {0}")]
    ExtractionNotFound(String),

    #[error("Expected a file, but got a directory: {0}")]
    ExtractionIsDirectory(String),

    /// Any other extraction failure (corrupt PDF, bad encoding).
    #[error("Error processing file: {filename}: {message}")]
    Extraction { filename: String, message: String },

    /// Any other failure in the predict flow (vectorization, scoring,
    /// malformed multipart payloads).
    #[error("{0}")]
    Pipeline(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::ExtractionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExtractionIsDirectory(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction { .. } | AppError::Pipeline(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("predict error: {self}");
        }

        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}
