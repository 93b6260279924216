use crate::application::ports::{
    AudioFetchError, RepositoryError, SignedUrlError, TranscriptionError,
};

pub const EMPTY_TRANSCRIPT_MESSAGE: &str = "Empty transcript - audio may be too short or unclear";

/// Every way a `/process` call can end without a success response.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("signed url: {0}")]
    SignedUrl(#[from] SignedUrlError),
    #[error("audio download: {0}")]
    AudioFetch(#[from] AudioFetchError),
    #[error("{}", EMPTY_TRANSCRIPT_MESSAGE)]
    EmptyTranscript,
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
    #[error("transcript persistence: {0}")]
    TranscriptPersistence(#[from] RepositoryError),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<TranscriptionError> for PipelineError {
    fn from(e: TranscriptionError) -> Self {
        match e {
            TranscriptionError::EmptyTranscript => PipelineError::EmptyTranscript,
            other => PipelineError::Transcription(other),
        }
    }
}

impl PipelineError {
    /// Client and availability errors are raised before any side effect.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidRequest(_) | PipelineError::ServiceUnavailable(_)
        )
    }
}
