//! Common error type and result alias.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Seedream API error: {0}")]
    Seedream(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid image data: {0}")]
    ImageData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body refused by an extractor, keeping the extractor's status.
    #[error("{1}")]
    Rejected(StatusCode, String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::ImageData(_) => StatusCode::BAD_REQUEST,
            AppError::HttpClient(_) | AppError::Seedream(_) => StatusCode::BAD_GATEWAY,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected(status, _) => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({"success": false, "error": self.to_string()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_is_a_client_error() {
        let err = AppError::InvalidInput("Prompt is required".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Prompt is required");
    }

    #[test]
    fn rejections_keep_their_status() {
        let err = AppError::Rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".into());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "too big");
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = AppError::Seedream("status 500".into());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
