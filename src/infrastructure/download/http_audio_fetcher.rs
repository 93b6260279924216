use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{AudioFetchError, AudioFetcher};
use crate::domain::AudioArtifact;
use crate::infrastructure::observability::redact_url;

const SCRATCH_PREFIX: &str = "saaramsham-audio-";

/// Streams recordings over HTTP into scratch files.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
    scratch_dir: PathBuf,
}

impl HttpAudioFetcher {
    /// `timeout` bounds the whole transfer, body included.
    pub fn new(timeout: Duration, scratch_dir: Option<PathBuf>) -> Result<Self, AudioFetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AudioFetchError::RequestFailed(format!("client: {}", e)))?;

        let scratch_dir = scratch_dir.unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&scratch_dir)?;

        Ok(Self {
            client,
            scratch_dir,
        })
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &str, extension: &str) -> Result<AudioArtifact, AudioFetchError> {
        tracing::info!(url = %redact_url(url), "Downloading audio");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AudioFetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Audio download rejected");
            return Err(AudioFetchError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        // The temp path deletes the file on drop, so every early return
        // below leaves nothing behind.
        let (file, temp_path) = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(extension)
            .tempfile_in(&self.scratch_dir)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut body = response.bytes_stream();
        let mut total_bytes: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| AudioFetchError::RequestFailed(format!("body: {}", e)))?;
            file.write_all(&chunk).await?;
            total_bytes += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);

        let path = temp_path.keep().map_err(|e| AudioFetchError::Io(e.error))?;

        tracing::info!(path = %path.display(), bytes = total_bytes, "Downloaded audio");

        Ok(AudioArtifact::new(path))
    }
}
