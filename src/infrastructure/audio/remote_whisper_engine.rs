use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{
    RawTranscription, TranscriptionEngine, TranscriptionError, TranscriptionOptions,
};

/// Whisper behind an OpenAI-compatible `/audio/transcriptions` endpoint
/// (faster-whisper-server, whisper.cpp server, OpenAI itself).
pub struct RemoteWhisperEngine {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    language_probability: Option<f32>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    text: String,
}

impl RemoteWhisperEngine {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl TranscriptionEngine for RemoteWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<RawTranscription, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriptionError::DecodingFailed(format!("read audio: {}", e)))?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.webm")
            .to_string();

        let file_part = multipart::Part::bytes(audio)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("beam_size", options.beam_size.to_string())
            .text("vad_filter", options.vad_filter.to_string())
            .part("file", file_part);
        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(model = %self.model, beam_size = options.beam_size, "Sending audio to Whisper server");

        let mut request = self.client.post(&url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        let segments = if body.segments.is_empty() {
            vec![body.text]
        } else {
            body.segments.into_iter().map(|s| s.text).collect()
        };

        tracing::info!(
            segments = segments.len(),
            language = body.language.as_deref().unwrap_or("unknown"),
            "Remote Whisper transcription completed"
        );

        Ok(RawTranscription {
            segments,
            detected_language: body.language,
            language_probability: body.language_probability,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
