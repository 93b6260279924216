use crate::application::ports::Summarizer;
use crate::domain::{SUMMARY_FAILED_SENTINEL, SummaryLength};

use super::StageOutcome;

/// Wraps the summarizer so that its failures never end the request.
///
/// Long transcripts are passed through whole; the model truncates whatever
/// exceeds its input window.
#[derive(Default)]
pub struct SummarizationService;

impl SummarizationService {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(skip(self, summarizer, text), fields(method = summarizer.method(), chars = text.chars().count()))]
    pub async fn summarize(
        &self,
        summarizer: &dyn Summarizer,
        text: &str,
        length: SummaryLength,
    ) -> StageOutcome<String> {
        match summarizer.summarize(text, length).await {
            Ok(summary) => {
                tracing::info!(chars = summary.chars().count(), "Summary generated");
                StageOutcome::Completed(summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "Summarization failed");
                StageOutcome::Degraded {
                    value: SUMMARY_FAILED_SENTINEL.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
