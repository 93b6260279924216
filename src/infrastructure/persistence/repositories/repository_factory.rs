use std::sync::Arc;

use crate::application::ports::{RepositoryError, SummaryRepository, TranscriptRepository};
use crate::infrastructure::persistence::{create_pool, run_migrations};
use crate::presentation::config::{DatabaseProvider, DatabaseSettings};

use super::{PgSummaryRepository, PgTranscriptRepository, SupabaseRestRepository};

/// Both write ports, backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub transcripts: Arc<dyn TranscriptRepository>,
    pub summaries: Arc<dyn SummaryRepository>,
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create(settings: &DatabaseSettings) -> Result<Repositories, RepositoryError> {
        match settings.provider {
            DatabaseProvider::Supabase => {
                let url = settings.url.as_deref().ok_or_else(|| {
                    RepositoryError::ConnectionFailed("SUPABASE_URL required".into())
                })?;
                let key = settings.service_key.as_deref().ok_or_else(|| {
                    RepositoryError::ConnectionFailed("SUPABASE_SERVICE_ROLE_KEY required".into())
                })?;
                let repository = Arc::new(SupabaseRestRepository::new(url, key)?);
                tracing::info!(url = %url, "Using Supabase REST persistence");
                Ok(Repositories {
                    transcripts: repository.clone(),
                    summaries: repository,
                })
            }
            DatabaseProvider::Postgres => {
                let url = settings.postgres_url.as_deref().ok_or_else(|| {
                    RepositoryError::ConnectionFailed("DATABASE_URL required".into())
                })?;
                let pool = create_pool(url, settings.max_connections).await?;
                run_migrations(&pool).await?;
                Ok(Repositories {
                    transcripts: Arc::new(PgTranscriptRepository::new(pool.clone())),
                    summaries: Arc::new(PgSummaryRepository::new(pool)),
                })
            }
        }
    }
}
