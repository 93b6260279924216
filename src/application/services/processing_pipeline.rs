use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::application::ports::{Summarizer, TranscriptionEngine};
use crate::domain::{
    AudioArtifact, AudioSource, Language, PipelineStage, ProcessingRequest, Summary,
    SummaryLength, Transcript, UserId,
};

use super::{
    AudioRetriever, LanguageIdentifier, ModelContext, PersistenceGateway, PipelineError,
    StageOutcome, SummarizationService, TranscriptionService,
};

/// Name recorded on summary rows when the summarizer does not report one.
pub const DEFAULT_SUMMARY_METHOD: &str = "IndicBARTSS";

/// Everything the caller gets back from a completed run.
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub transcript: Transcript,
    pub summary: Summary,
    pub summary_generated: bool,
    pub summary_persisted: bool,
}

impl ProcessingOutcome {
    pub fn language(&self) -> Language {
        self.transcript.language
    }

    pub fn message(&self) -> &'static str {
        match (self.summary_generated, self.summary_persisted) {
            (true, true) => "Processing completed successfully",
            (false, true) => "Processing completed; summary generation failed",
            (true, false) => "Processing completed; summary could not be saved",
            (false, false) => {
                "Processing completed; summary generation failed and could not be saved"
            }
        }
    }
}

/// Fetch, transcribe, identify, persist, summarize, persist, clean up.
pub struct ProcessingPipeline {
    models: ModelContext,
    retriever: AudioRetriever,
    transcription: TranscriptionService,
    identifier: LanguageIdentifier,
    summarization: SummarizationService,
    persistence: PersistenceGateway,
}

impl ProcessingPipeline {
    pub fn new(
        models: ModelContext,
        retriever: AudioRetriever,
        identifier: LanguageIdentifier,
        persistence: PersistenceGateway,
    ) -> Self {
        Self {
            models,
            retriever,
            transcription: TranscriptionService::default(),
            identifier,
            summarization: SummarizationService::new(),
            persistence,
        }
    }

    pub fn models(&self) -> &ModelContext {
        &self.models
    }

    pub async fn process(
        &self,
        request: ProcessingRequest,
    ) -> Result<ProcessingOutcome, PipelineError> {
        let source = request.source.as_ref().ok_or_else(|| {
            PipelineError::InvalidRequest("Either audioUrl or file_key is required".to_string())
        })?;
        let engine = self.models.transcription.get().ok_or_else(|| {
            PipelineError::ServiceUnavailable("Whisper model not loaded".to_string())
        })?;
        let summarizer = self.models.summarizer.get().ok_or_else(|| {
            PipelineError::ServiceUnavailable("Summarizer model not loaded".to_string())
        })?;

        let user_id = resolve_user_id(request.user_id.as_deref());

        tracing::info!(
            stage = %PipelineStage::Start,
            source = source.kind(),
            file_key = storage_key(source).unwrap_or("-"),
            user_id = ?user_id.map(|u| u.to_string()),
            "Processing request"
        );

        let artifact = self.retriever.retrieve(source).await?;
        tracing::info!(
            stage = %PipelineStage::AudioFetched,
            path = %artifact.path().display(),
            "Audio downloaded"
        );

        let run = AssertUnwindSafe(self.run(
            &artifact,
            engine.as_ref(),
            summarizer.as_ref(),
            &request,
            user_id,
        ))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(PipelineError::Unexpected(panic_message(panic))));

        cleanup(&artifact).await;

        match &run {
            Ok(outcome) => tracing::info!(
                stage = %PipelineStage::Done,
                transcript_id = %outcome.transcript.id,
                summary_id = %outcome.summary.id,
                "Processing finished"
            ),
            Err(e) => tracing::error!(error = %e, "Processing failed"),
        }

        run
    }

    async fn run(
        &self,
        artifact: &AudioArtifact,
        engine: &dyn TranscriptionEngine,
        summarizer: &dyn Summarizer,
        request: &ProcessingRequest,
        user_id: Option<UserId>,
    ) -> Result<ProcessingOutcome, PipelineError> {
        let transcription = match self.transcription.transcribe(engine, artifact.path()).await {
            StageOutcome::Completed(result) | StageOutcome::Degraded { value: result, .. } => {
                result
            }
            StageOutcome::Fatal(e) => return Err(e),
        };
        tracing::info!(stage = %PipelineStage::Transcribed, "Transcription complete");

        let detected = self.identifier.identify(&transcription.text);
        let language = request.output_language.resolve(detected);
        tracing::info!(
            stage = %PipelineStage::LanguageResolved,
            detected = %detected,
            language = %language,
            "Language resolved"
        );

        let transcript = Transcript::new(
            user_id,
            transcription.text,
            language,
            transcription.confidence,
        );
        match self.persistence.save_transcript(&transcript).await {
            StageOutcome::Completed(()) | StageOutcome::Degraded { .. } => {}
            StageOutcome::Fatal(e) => return Err(e),
        }
        tracing::info!(
            stage = %PipelineStage::TranscriptPersisted,
            transcript_id = %transcript.id,
            "Transcript stored"
        );

        let (summary_text, summary_generated) = self
            .summarize(summarizer, &transcript.text, request.summary_length)
            .await?;
        tracing::info!(
            stage = %PipelineStage::Summarized,
            generated = summary_generated,
            "Summarization step finished"
        );

        let method = match summarizer.method() {
            "" => DEFAULT_SUMMARY_METHOD.to_string(),
            name => name.to_string(),
        };
        let summary = Summary::new(user_id, transcript.id, summary_text, method);
        let summary_persisted = match self.persistence.save_summary(&summary).await {
            StageOutcome::Completed(()) => {
                tracing::info!(
                    stage = %PipelineStage::SummaryPersisted,
                    summary_id = %summary.id,
                    "Summary stored"
                );
                true
            }
            StageOutcome::Degraded { reason, .. } => {
                tracing::warn!(
                    stage = %PipelineStage::SummaryPersistFailed,
                    summary_id = %summary.id,
                    reason = %reason,
                    "Continuing without a stored summary"
                );
                false
            }
            StageOutcome::Fatal(e) => return Err(e),
        };

        Ok(ProcessingOutcome {
            transcript,
            summary,
            summary_generated,
            summary_persisted,
        })
    }

    async fn summarize(
        &self,
        summarizer: &dyn Summarizer,
        text: &str,
        length: SummaryLength,
    ) -> Result<(String, bool), PipelineError> {
        match self.summarization.summarize(summarizer, text, length).await {
            StageOutcome::Completed(summary) => Ok((summary, true)),
            StageOutcome::Degraded { value, .. } => Ok((value, false)),
            StageOutcome::Fatal(e) => Err(e),
        }
    }
}

/// Parses the optional caller identifier; malformed values are dropped.
pub fn resolve_user_id(raw: Option<&str>) -> Option<UserId> {
    let raw = raw.filter(|r| !r.trim().is_empty())?;
    match UserId::parse(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(user_id = %raw, error = %e, "Invalid user_id format");
            None
        }
    }
}

/// Deletes the scratch file. Failures are logged, never returned.
pub async fn cleanup(artifact: &AudioArtifact) {
    match artifact.discard().await {
        Ok(()) => tracing::info!(
            stage = %PipelineStage::Cleanup,
            path = %artifact.path().display(),
            "Cleaned up temporary audio file"
        ),
        Err(e) => tracing::warn!(
            stage = %PipelineStage::Cleanup,
            path = %artifact.path().display(),
            error = %e,
            "Failed to delete temp file"
        ),
    }
}

fn storage_key(source: &AudioSource) -> Option<&str> {
    match source {
        AudioSource::StorageKey { key } => Some(key.as_str()),
        AudioSource::DirectUrl { .. } => None,
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
