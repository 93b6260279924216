use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AudioSource, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, OutputLanguage, ProcessingRequest,
    SummaryLength,
};
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Debug, Deserialize)]
pub struct ProcessRequestBody {
    #[serde(default)]
    pub file_key: Option<String>,
    #[serde(default, rename = "audioUrl")]
    pub audio_url: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id_camel: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_output_language")]
    pub force_output_language: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_min_length")]
    pub min_length: u32,
}

fn default_output_language() -> String {
    "auto".to_string()
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

fn default_min_length() -> u32 {
    DEFAULT_MIN_LENGTH
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub transcript_id: String,
    pub summary_id: String,
    pub transcript: String,
    pub summary: String,
    pub language: String,
    pub message: String,
}

impl ProcessRequestBody {
    fn into_request(self) -> Result<ProcessingRequest, Response> {
        let summary_length = SummaryLength::new(self.min_length, self.max_length)
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

        Ok(ProcessingRequest {
            source: AudioSource::resolve(self.audio_url.as_deref(), self.file_key.as_deref()),
            user_id: self.user_id_camel.or(self.user_id),
            output_language: OutputLanguage::parse(Some(self.force_output_language.as_str())),
            summary_length,
        })
    }
}

#[tracing::instrument(skip(state, body))]
pub async fn process_handler(
    State(state): State<AppState>,
    body: Result<Json<ProcessRequestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected malformed process request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let request = match body.into_request() {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.pipeline.process(request).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ProcessResponse {
                transcript_id: outcome.transcript.id.to_string(),
                summary_id: outcome.summary.id.to_string(),
                language: outcome.language().to_string(),
                message: outcome.message().to_string(),
                transcript: outcome.transcript.text,
                summary: outcome.summary.text,
            }),
        )
            .into_response(),
        Err(e) => {
            if e.is_rejection() {
                tracing::warn!(error = %e, "Process request rejected");
            } else {
                tracing::error!(error = %e, "Process request failed");
            }
            e.into_response()
        }
    }
}
