use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{ModelSettings, TranscriptionProviderSetting};

use super::remote_whisper_engine::RemoteWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(settings: &ModelSettings) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.transcription_provider {
            TranscriptionProviderSetting::Remote => {
                let engine = RemoteWhisperEngine::new(
                    &settings.whisper_base_url,
                    &settings.whisper_model,
                    settings.whisper_api_key.clone(),
                    settings.request_timeout(),
                )?;
                tracing::info!(
                    model = %settings.whisper_model,
                    base_url = %settings.whisper_base_url,
                    "Using remote Whisper transcription"
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Local => Self::create_local(&settings.whisper_model),
        }
    }

    #[cfg(feature = "local-whisper")]
    fn create_local(model: &str) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let engine = super::candle_whisper_engine::CandleWhisperEngine::new(model)?;
        Ok(Arc::new(engine))
    }

    #[cfg(not(feature = "local-whisper"))]
    fn create_local(_model: &str) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        Err(TranscriptionError::ModelLoadFailed(
            "local transcription requires the `local-whisper` feature".to_string(),
        ))
    }
}
