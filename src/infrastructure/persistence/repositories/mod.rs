mod pg_summary_repository;
mod pg_transcript_repository;
mod repository_factory;
mod sqlx_error;
mod supabase_rest_repository;

pub use pg_summary_repository::PgSummaryRepository;
pub use pg_transcript_repository::PgTranscriptRepository;
pub use repository_factory::{Repositories, RepositoryFactory};
pub use supabase_rest_repository::SupabaseRestRepository;
