use std::path::Path;

use saaramsham::application::ports::TranscriptionOptions;
use saaramsham::application::services::{PipelineError, StageOutcome, TranscriptionService};

use crate::helpers::mocks::{FailingTranscriptionEngine, MockTranscriptionEngine};

#[test]
fn given_default_service_when_inspecting_options_then_uses_beam_five_with_vad() {
    let service = TranscriptionService::default();
    assert_eq!(service.options(), &TranscriptionOptions::default());
    assert_eq!(service.options().beam_size, 5);
    assert!(service.options().vad_filter);
    assert!(service.options().language.is_none());
}

#[tokio::test]
async fn given_segments_when_transcribing_then_joins_and_reports_confidence() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let engine = MockTranscriptionEngine::new(vec![" Hello".to_string(), "world ".to_string()]);

    let outcome = TranscriptionService::default()
        .transcribe(&engine, file.path())
        .await;

    match outcome {
        StageOutcome::Completed(result) => {
            assert_eq!(result.text, "Hello world");
            assert_eq!(result.confidence, Some(0.93));
            assert_eq!(result.detected_language.as_deref(), Some("en"));
        }
        _ => panic!("expected completed transcription"),
    }
}

#[tokio::test]
async fn given_whitespace_only_segments_when_transcribing_then_fatal_empty_transcript() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let engine = MockTranscriptionEngine::new(vec!["  ".to_string()]);

    let outcome = TranscriptionService::default()
        .transcribe(&engine, file.path())
        .await;

    assert!(matches!(outcome, StageOutcome::Fatal(PipelineError::EmptyTranscript)));
}

#[tokio::test]
async fn given_engine_error_when_transcribing_then_fatal_transcription_error() {
    let outcome = TranscriptionService::default()
        .transcribe(&FailingTranscriptionEngine, Path::new("/nonexistent.webm"))
        .await;

    assert!(matches!(outcome, StageOutcome::Fatal(PipelineError::Transcription(_))));
}
