use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use tracing::instrument;

use crate::application::ports::{
    RepositoryError, SummaryRepository, TranscriptRepository,
};
use crate::domain::{Summary, Transcript};

const TRANSCRIPTS_TABLE: &str = "transcripts";
const SUMMARIES_TABLE: &str = "summaries";

/// Inserts rows through Supabase's PostgREST endpoint using the
/// service-role key.
pub struct SupabaseRestRepository {
    client: reqwest::Client,
    rest_url: Url,
    service_key: String,
}

#[derive(Serialize)]
struct TranscriptRow<'a> {
    id: String,
    user_id: Option<String>,
    transcript_text: &'a str,
    language: &'static str,
    confidence: Option<f32>,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    id: String,
    user_id: Option<String>,
    transcript_id: String,
    summary_text: &'a str,
    method: &'a str,
    key_points: Option<serde_json::Value>,
    action_items: Option<serde_json::Value>,
}

impl SupabaseRestRepository {
    pub fn new(project_url: &str, service_key: &str) -> Result<Self, RepositoryError> {
        let rest_url = Url::parse(&format!("{}/rest/v1/", project_url.trim_end_matches('/')))
            .map_err(|e| RepositoryError::ConnectionFailed(format!("SUPABASE_URL: {}", e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            rest_url,
            service_key: service_key.to_string(),
        })
    }

    async fn insert<T: Serialize + Sync>(&self, table: &str, row: &T) -> Result<(), RepositoryError> {
        let url = self
            .rest_url
            .join(table)
            .map_err(|e| RepositoryError::InsertFailed(format!("table url: {}", e)))?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(RepositoryError::ConstraintViolation(body));
        }
        Err(RepositoryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TranscriptRepository for SupabaseRestRepository {
    #[instrument(skip(self, transcript), fields(transcript_id = %transcript.id))]
    async fn create(&self, transcript: &Transcript) -> Result<(), RepositoryError> {
        let row = TranscriptRow {
            id: transcript.id.to_string(),
            user_id: transcript.user_id.map(|u| u.to_string()),
            transcript_text: &transcript.text,
            language: transcript.language.as_str(),
            confidence: transcript.confidence,
        };
        self.insert(TRANSCRIPTS_TABLE, &row).await
    }
}

#[async_trait]
impl SummaryRepository for SupabaseRestRepository {
    #[instrument(skip(self, summary), fields(summary_id = %summary.id))]
    async fn create(&self, summary: &Summary) -> Result<(), RepositoryError> {
        let row = SummaryRow {
            id: summary.id.to_string(),
            user_id: summary.user_id.map(|u| u.to_string()),
            transcript_id: summary.transcript_id.to_string(),
            summary_text: &summary.text,
            method: &summary.method,
            key_points: None,
            action_items: None,
        };
        self.insert(SUMMARIES_TABLE, &row).await
    }
}
