use std::sync::Arc;

use crate::application::ports::{SummaryRepository, TranscriptRepository};
use crate::domain::{Summary, Transcript};

use super::{PipelineError, StageOutcome};

/// Writes transcripts and summaries. Only the transcript write is fatal.
pub struct PersistenceGateway {
    transcripts: Arc<dyn TranscriptRepository>,
    summaries: Arc<dyn SummaryRepository>,
}

impl PersistenceGateway {
    pub fn new(
        transcripts: Arc<dyn TranscriptRepository>,
        summaries: Arc<dyn SummaryRepository>,
    ) -> Self {
        Self {
            transcripts,
            summaries,
        }
    }

    pub async fn save_transcript(&self, transcript: &Transcript) -> StageOutcome<()> {
        match self.transcripts.create(transcript).await {
            Ok(()) => {
                tracing::info!(transcript_id = %transcript.id, "Transcript saved");
                StageOutcome::Completed(())
            }
            Err(e) => {
                tracing::error!(transcript_id = %transcript.id, error = %e, "Failed to save transcript");
                StageOutcome::Fatal(PipelineError::TranscriptPersistence(e))
            }
        }
    }

    pub async fn save_summary(&self, summary: &Summary) -> StageOutcome<()> {
        match self.summaries.create(summary).await {
            Ok(()) => {
                tracing::info!(summary_id = %summary.id, "Summary saved");
                StageOutcome::Completed(())
            }
            Err(e) => {
                tracing::error!(summary_id = %summary.id, error = %e, "Failed to save summary");
                StageOutcome::Degraded {
                    value: (),
                    reason: e.to_string(),
                }
            }
        }
    }
}
