use saaramsham::application::services::resolve_user_id;
use saaramsham::domain::{Language, Summary, Transcript, UserId};

#[test]
fn given_out_of_range_confidence_when_creating_transcript_then_clamped() {
    let high = Transcript::new(None, "a".to_string(), Language::Telugu, Some(1.7));
    let low = Transcript::new(None, "a".to_string(), Language::Telugu, Some(-0.2));

    assert_eq!(high.confidence, Some(1.0));
    assert_eq!(low.confidence, Some(0.0));
}

#[test]
fn given_two_transcripts_when_created_then_ids_differ() {
    let a = Transcript::new(None, "a".to_string(), Language::English, None);
    let b = Transcript::new(None, "a".to_string(), Language::English, None);
    assert_ne!(a.id, b.id);
}

#[test]
fn given_transcript_when_creating_summary_then_links_to_it() {
    let user = UserId::parse("3f1c2a8e-9a57-4d0b-b1de-2f4a1c9e7b10").unwrap();
    let transcript = Transcript::new(Some(user), "a".to_string(), Language::English, None);

    let summary = Summary::new(Some(user), transcript.id, "s".to_string(), "IndicBARTSS".to_string());

    assert_eq!(summary.transcript_id, transcript.id);
    assert_eq!(summary.user_id, Some(user));
}

#[test]
fn given_user_id_inputs_when_resolving_then_only_valid_uuids_survive() {
    assert!(resolve_user_id(Some("3f1c2a8e-9a57-4d0b-b1de-2f4a1c9e7b10")).is_some());
    assert!(resolve_user_id(Some("user-42")).is_none());
    assert!(resolve_user_id(Some("   ")).is_none());
    assert!(resolve_user_id(None).is_none());
}
