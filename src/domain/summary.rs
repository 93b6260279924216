use chrono::{DateTime, Utc};

use super::{SummaryId, TranscriptId, UserId};

/// Summary text used when the summarization model fails.
pub const SUMMARY_FAILED_SENTINEL: &str = "Summary generation failed";

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub id: SummaryId,
    pub user_id: Option<UserId>,
    pub transcript_id: TranscriptId,
    pub text: String,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    pub fn new(
        user_id: Option<UserId>,
        transcript_id: TranscriptId,
        text: String,
        method: String,
    ) -> Self {
        Self {
            id: SummaryId::new(),
            user_id,
            transcript_id,
            text,
            method,
            created_at: Utc::now(),
        }
    }
}
