use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

pub const SERVICE_NAME: &str = "AI Telugu Summarization";

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsLoaded {
    pub whisper: bool,
    pub summarizer: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub whisper_model: String,
    pub summarizer_model: String,
    pub models_loaded: ModelsLoaded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub whisper_loaded: bool,
    pub summarizer_loaded: bool,
    pub supabase_connected: bool,
}

pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let models = state.pipeline.models();
    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            whisper_model: state.info.whisper_model.clone(),
            summarizer_model: state.info.summarizer_model.clone(),
            models_loaded: ModelsLoaded {
                whisper: models.transcription_loaded(),
                summarizer: models.summarizer_loaded(),
            },
        }),
    )
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let models = state.pipeline.models();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            whisper_loaded: models.transcription_loaded(),
            summarizer_loaded: models.summarizer_loaded(),
            supabase_connected: state.info.database_configured,
        }),
    )
}
