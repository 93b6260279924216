use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{RepositoryError, SummaryRepository};
use crate::domain::Summary;

use super::sqlx_error::map_insert_error;

pub struct PgSummaryRepository {
    pool: PgPool,
}

impl PgSummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for PgSummaryRepository {
    #[instrument(skip(self, summary), fields(summary_id = %summary.id, transcript_id = %summary.transcript_id))]
    async fn create(&self, summary: &Summary) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO summaries (id, user_id, transcript_id, summary_text, method, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(summary.id.as_uuid())
        .bind(summary.user_id.map(|u| u.as_uuid()))
        .bind(summary.transcript_id.as_uuid())
        .bind(&summary.text)
        .bind(&summary.method)
        .bind(summary.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }
}
