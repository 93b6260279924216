use std::time::Duration;

use async_trait::async_trait;

/// Mints time-limited read URLs for objects in the audio bucket.
#[async_trait]
pub trait SignedUrlProvider: Send + Sync {
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, SignedUrlError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SignedUrlError {
    #[error("storage request failed: {0}")]
    RequestFailed(String),
    #[error("storage rejected signing: {0}")]
    Rejected(String),
    #[error("invalid storage configuration: {0}")]
    Configuration(String),
}
