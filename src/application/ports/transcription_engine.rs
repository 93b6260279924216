use std::path::Path;

use async_trait::async_trait;

/// Decoding knobs passed to the recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOptions {
    /// `None` lets the model detect the spoken language.
    pub language: Option<String>,
    pub beam_size: usize,
    pub vad_filter: bool,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: None,
            beam_size: 5,
            vad_filter: true,
        }
    }
}

/// Recognizer output before any joining or validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTranscription {
    pub segments: Vec<String>,
    pub detected_language: Option<String>,
    pub language_probability: Option<f32>,
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError>;

    /// Model name reported on the status endpoint.
    fn model_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("empty transcript")]
    EmptyTranscript,
}
