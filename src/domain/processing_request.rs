use super::{AudioSource, OutputLanguage, SummaryLength};

/// One `/process` call after wire-level decoding.
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    pub source: Option<AudioSource>,
    /// Raw caller-supplied user identifier; validated by the pipeline.
    pub user_id: Option<String>,
    pub output_language: OutputLanguage,
    pub summary_length: SummaryLength,
}
