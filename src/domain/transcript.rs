use chrono::{DateTime, Utc};

use super::{Language, TranscriptId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub id: TranscriptId,
    pub user_id: Option<UserId>,
    pub text: String,
    pub language: Language,
    /// Language probability reported by the recognizer, in `[0, 1]`.
    pub confidence: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl Transcript {
    pub fn new(
        user_id: Option<UserId>,
        text: String,
        language: Language,
        confidence: Option<f32>,
    ) -> Self {
        Self {
            id: TranscriptId::new(),
            user_id,
            text,
            language,
            confidence: confidence.map(|c| c.clamp(0.0, 1.0)),
            created_at: Utc::now(),
        }
    }
}
