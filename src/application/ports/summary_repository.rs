use async_trait::async_trait;

use crate::domain::Summary;

use super::RepositoryError;

#[async_trait]
pub trait SummaryRepository: Send + Sync {
    async fn create(&self, summary: &Summary) -> Result<(), RepositoryError>;
}
