use async_trait::async_trait;

use crate::domain::Transcript;

use super::RepositoryError;

#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    async fn create(&self, transcript: &Transcript) -> Result<(), RepositoryError>;
}
