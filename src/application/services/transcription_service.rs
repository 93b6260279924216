use std::path::Path;

use crate::application::ports::{TranscriptionEngine, TranscriptionError, TranscriptionOptions};

use super::{PipelineError, StageOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    pub confidence: Option<f32>,
    pub detected_language: Option<String>,
}

/// Runs the recognizer and turns its segments into one transcript.
pub struct TranscriptionService {
    options: TranscriptionOptions,
}

impl TranscriptionService {
    pub fn new(options: TranscriptionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranscriptionOptions {
        &self.options
    }

    #[tracing::instrument(skip(self, engine), fields(model = engine.model_name()))]
    pub async fn transcribe(
        &self,
        engine: &dyn TranscriptionEngine,
        audio_path: &Path,
    ) -> StageOutcome<TranscriptionResult> {
        let raw = match engine.transcribe(audio_path, &self.options).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Transcription failed");
                return StageOutcome::Fatal(PipelineError::from(e));
            }
        };

        let text = join_segments(&raw.segments);
        if text.is_empty() {
            tracing::warn!(segments = raw.segments.len(), "Recognizer produced no text");
            return StageOutcome::Fatal(PipelineError::from(TranscriptionError::EmptyTranscript));
        }

        tracing::info!(
            chars = text.chars().count(),
            segments = raw.segments.len(),
            detected_language = raw.detected_language.as_deref().unwrap_or("unknown"),
            "Transcript generated"
        );

        StageOutcome::Completed(TranscriptionResult {
            text,
            confidence: raw.language_probability.map(|p| p.clamp(0.0, 1.0)),
            detected_language: raw.detected_language,
        })
    }
}

impl Default for TranscriptionService {
    fn default() -> Self {
        Self::new(TranscriptionOptions::default())
    }
}

pub fn join_segments(segments: &[String]) -> String {
    segments.join(" ").trim().to_string()
}
