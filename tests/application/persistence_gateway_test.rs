use std::sync::Arc;

use saaramsham::application::services::{PersistenceGateway, PipelineError, StageOutcome};
use saaramsham::domain::{Language, Summary, Transcript};

use crate::helpers::mocks::{InMemorySummaryRepository, InMemoryTranscriptRepository};

fn transcript() -> Transcript {
    Transcript::new(None, "hello".to_string(), Language::English, Some(0.8))
}

#[tokio::test]
async fn given_failing_transcript_store_when_saving_then_outcome_is_fatal() {
    let gateway = PersistenceGateway::new(
        Arc::new(InMemoryTranscriptRepository {
            fail: true,
            ..Default::default()
        }),
        Arc::new(InMemorySummaryRepository::default()),
    );

    let outcome = gateway.save_transcript(&transcript()).await;

    assert!(matches!(
        outcome,
        StageOutcome::Fatal(PipelineError::TranscriptPersistence(_))
    ));
}

#[tokio::test]
async fn given_failing_summary_store_when_saving_then_outcome_is_degraded() {
    let gateway = PersistenceGateway::new(
        Arc::new(InMemoryTranscriptRepository::default()),
        Arc::new(InMemorySummaryRepository {
            fail: true,
            ..Default::default()
        }),
    );
    let transcript = transcript();
    let summary = Summary::new(None, transcript.id, "short".to_string(), "IndicBARTSS".to_string());

    let outcome = gateway.save_summary(&summary).await;

    assert!(outcome.is_degraded());
}

#[tokio::test]
async fn given_healthy_stores_when_saving_then_rows_are_written() {
    let transcripts = Arc::new(InMemoryTranscriptRepository::default());
    let summaries = Arc::new(InMemorySummaryRepository::default());
    let gateway = PersistenceGateway::new(transcripts.clone(), summaries.clone());
    let transcript = transcript();
    let summary = Summary::new(None, transcript.id, "short".to_string(), "IndicBARTSS".to_string());

    assert!(gateway.save_transcript(&transcript).await.is_completed());
    assert!(gateway.save_summary(&summary).await.is_completed());
    assert_eq!(transcripts.rows.lock().unwrap()[0], transcript);
    assert_eq!(summaries.rows.lock().unwrap()[0], summary);
}
