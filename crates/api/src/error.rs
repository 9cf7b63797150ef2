use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logbook_core::error::LogbookError;

/// Failures surfaced to HTTP clients. Bodies are plain text; store details
/// are logged where the error is created and never returned.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    InvalidBody,
    SaveFailed,
    FetchFailed,
    MethodNotAllowed,
}

impl ApiError {
    pub fn from_write(err: LogbookError) -> Self {
        match err {
            LogbookError::Validation(msg) => ApiError::Validation(msg),
            LogbookError::Decode(detail) => {
                tracing::warn!(error = %detail, "log body decode failed");
                ApiError::InvalidBody
            }
            other => {
                tracing::error!(error = %other, "failed to save log");
                ApiError::SaveFailed
            }
        }
    }

    pub fn from_fetch(err: LogbookError) -> Self {
        tracing::error!(error = %err, "failed to fetch logs");
        ApiError::FetchFailed
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::SaveFailed | ApiError::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn message(self) -> String {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::InvalidBody => "Invalid request body".to_string(),
            ApiError::SaveFailed => "Failed to save log".to_string(),
            ApiError::FetchFailed => "Failed to fetch logs".to_string(),
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}
