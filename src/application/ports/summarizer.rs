use async_trait::async_trait;

use crate::domain::SummaryLength;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces one abstractive summary with deterministic decoding.
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizerError>;

    /// Method name stored alongside each summary.
    fn method(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
