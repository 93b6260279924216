use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioFetcher, SignedUrlProvider};
use crate::domain::{AudioArtifact, AudioSource, DEFAULT_AUDIO_EXTENSION, extension_of};

use super::PipelineError;

/// Resolves an [`AudioSource`] to a local scratch file.
pub struct AudioRetriever {
    fetcher: Arc<dyn AudioFetcher>,
    signer: Arc<dyn SignedUrlProvider>,
    signed_url_ttl: Duration,
}

impl AudioRetriever {
    pub fn new(
        fetcher: Arc<dyn AudioFetcher>,
        signer: Arc<dyn SignedUrlProvider>,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            fetcher,
            signer,
            signed_url_ttl,
        }
    }

    #[tracing::instrument(skip(self, source), fields(source = source.kind()))]
    pub async fn retrieve(&self, source: &AudioSource) -> Result<AudioArtifact, PipelineError> {
        match source {
            AudioSource::DirectUrl { url, extension } => {
                Ok(self.fetcher.fetch(url, extension).await?)
            }
            AudioSource::StorageKey { key } => {
                let url = self
                    .signer
                    .signed_url(key, self.signed_url_ttl)
                    .await
                    .inspect_err(|e| tracing::error!(key = %key, error = %e, "Failed to create signed URL"))?;
                let extension =
                    extension_of(key).unwrap_or_else(|| DEFAULT_AUDIO_EXTENSION.to_string());
                Ok(self.fetcher.fetch(&url, &extension).await?)
            }
        }
    }
}
