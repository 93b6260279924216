use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{RepositoryError, TranscriptRepository};
use crate::domain::Transcript;

use super::sqlx_error::map_insert_error;

pub struct PgTranscriptRepository {
    pool: PgPool,
}

impl PgTranscriptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranscriptRepository for PgTranscriptRepository {
    #[instrument(skip(self, transcript), fields(transcript_id = %transcript.id))]
    async fn create(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO transcripts (id, user_id, transcript_text, language, confidence, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(transcript.id.as_uuid())
        .bind(transcript.user_id.map(|u| u.as_uuid()))
        .bind(&transcript.text)
        .bind(transcript.language.as_str())
        .bind(transcript.confidence)
        .bind(transcript.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }
}
