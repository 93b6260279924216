use std::sync::Arc;

use crate::application::services::ProcessingPipeline;

/// Static identity reported by the status endpoints.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub whisper_model: String,
    pub summarizer_model: String,
    pub database_configured: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ProcessingPipeline>,
    pub info: ServiceInfo,
}
