use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use saaramsham::application::ports::{
    TranscriptionEngine, TranscriptionError, TranscriptionOptions,
};
use saaramsham::infrastructure::audio::RemoteWhisperEngine;
use serde_json::{Value, json};

use crate::helpers::mock_server::MockServer;

#[derive(Default)]
struct Captured {
    form: String,
    authorization: Option<String>,
}

type Shared = Arc<Mutex<Captured>>;

async fn transcriptions_handler(
    State(captured): State<Shared>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let form = String::from_utf8_lossy(&body).to_string();
    let fail = form.contains("broken-model");
    *captured.lock().unwrap() = Captured {
        form,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    if fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "model crashed" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "text": " Hello world.",
            "language": "en",
            "language_probability": 0.97,
            "segments": [
                { "id": 0, "text": " Hello", "start": 0.0, "end": 1.0 },
                { "id": 1, "text": " world.", "start": 1.0, "end": 2.0 }
            ]
        })),
    )
}

async fn whisper_server() -> (MockServer, Shared) {
    let captured = Shared::default();
    let router = Router::new()
        .route("/v1/audio/transcriptions", post(transcriptions_handler))
        .with_state(captured.clone());
    (MockServer::start(router).await, captured)
}

fn audio_file() -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".webm").tempfile().unwrap();
    std::fs::write(file.path(), b"webm-bytes").unwrap();
    file
}

#[tokio::test]
async fn given_verbose_json_response_when_transcribing_then_returns_segments_and_language() {
    let (server, captured) = whisper_server().await;
    let engine = RemoteWhisperEngine::new(
        &format!("{}/v1", server.url()),
        "small",
        Some("secret".to_string()),
        Duration::from_secs(5),
    )
    .unwrap();
    let file = audio_file();

    let raw = engine
        .transcribe(file.path(), &TranscriptionOptions::default())
        .await
        .unwrap();

    assert_eq!(raw.segments, vec![" Hello".to_string(), " world.".to_string()]);
    assert_eq!(raw.detected_language.as_deref(), Some("en"));
    assert!((raw.language_probability.unwrap() - 0.97).abs() < 1e-6);
    assert_eq!(engine.model_name(), "small");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer secret"));
    assert!(captured.form.contains("name=\"response_format\""));
    assert!(captured.form.contains("verbose_json"));
    assert!(captured.form.contains("name=\"beam_size\"\r\n\r\n5"));
    assert!(captured.form.contains("name=\"vad_filter\"\r\n\r\ntrue"));
    assert!(captured.form.contains("webm-bytes"));
    assert!(!captured.form.contains("name=\"language\""));
}

#[tokio::test]
async fn given_forced_language_when_transcribing_then_sends_language_field() {
    let (server, captured) = whisper_server().await;
    let engine =
        RemoteWhisperEngine::new(&format!("{}/v1", server.url()), "small", None, Duration::from_secs(5))
            .unwrap();
    let file = audio_file();
    let options = TranscriptionOptions {
        language: Some("te".to_string()),
        ..TranscriptionOptions::default()
    };

    engine.transcribe(file.path(), &options).await.unwrap();

    let captured = captured.lock().unwrap();
    assert!(captured.form.contains("name=\"language\"\r\n\r\nte"));
    assert!(captured.authorization.is_none());
}

#[tokio::test]
async fn given_server_error_when_transcribing_then_api_request_failed() {
    let (server, _captured) = whisper_server().await;
    let engine = RemoteWhisperEngine::new(
        &format!("{}/v1", server.url()),
        "broken-model",
        None,
        Duration::from_secs(5),
    )
    .unwrap();
    let file = audio_file();

    let result = engine
        .transcribe(file.path(), &TranscriptionOptions::default())
        .await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}
