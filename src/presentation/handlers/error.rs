use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{EMPTY_TRANSCRIPT_MESSAGE, PipelineError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        match self {
            PipelineError::InvalidRequest(message) => {
                error_response(StatusCode::BAD_REQUEST, message)
            }
            PipelineError::ServiceUnavailable(message) => {
                error_response(StatusCode::SERVICE_UNAVAILABLE, message)
            }
            PipelineError::EmptyTranscript => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, EMPTY_TRANSCRIPT_MESSAGE)
            }
            PipelineError::TranscriptPersistence(cause) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save transcript: {}", cause),
            ),
            other => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Processing failed: {}", other),
            ),
        }
    }
}
