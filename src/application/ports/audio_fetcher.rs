use async_trait::async_trait;

use crate::domain::AudioArtifact;

#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Downloads `url` into a fresh scratch file ending in `extension`.
    async fn fetch(&self, url: &str, extension: &str) -> Result<AudioArtifact, AudioFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioFetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
