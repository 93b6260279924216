use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use saaramsham::application::ports::{SignedUrlError, SignedUrlProvider};
use saaramsham::infrastructure::storage::SupabaseStorageSigner;
use serde_json::{Value, json};

use crate::helpers::mock_server::MockServer;

#[derive(Default)]
struct Captured {
    path: String,
    apikey: Option<String>,
    authorization: Option<String>,
    body: Value,
}

type Shared = Arc<Mutex<Captured>>;

async fn sign_handler(
    State(captured): State<Shared>,
    Path(rest): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let rest = rest.trim_start_matches('/').to_string();
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    *captured.lock().unwrap() = Captured {
        path: rest.clone(),
        apikey: header("apikey"),
        authorization: header("authorization"),
        body,
    };

    if rest.ends_with("missing.webm") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "statusCode": "404", "error": "not_found", "message": "Object not found" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "signedURL": format!("/object/sign/{}?token=tok", rest) })),
    )
}

async fn storage_server() -> (MockServer, Shared) {
    let captured = Shared::default();
    let router = Router::new()
        .route("/storage/v1/object/sign/{*rest}", post(sign_handler))
        .with_state(captured.clone());
    (MockServer::start(router).await, captured)
}

#[tokio::test]
async fn given_storage_key_when_signing_then_returns_absolute_url_under_storage_root() {
    let (server, captured) = storage_server().await;
    let signer = SupabaseStorageSigner::new(&server.url(), "service-key", "audio-uploads").unwrap();

    let url = signer
        .signed_url("user-1/clip.webm", Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(
        url,
        format!(
            "{}/storage/v1/object/sign/audio-uploads/user-1/clip.webm?token=tok",
            server.url()
        )
    );
    let captured = captured.lock().unwrap();
    assert_eq!(captured.path, "audio-uploads/user-1/clip.webm");
    assert_eq!(captured.apikey.as_deref(), Some("service-key"));
    assert_eq!(captured.authorization.as_deref(), Some("Bearer service-key"));
    assert_eq!(captured.body, json!({ "expiresIn": 60 }));
}

#[tokio::test]
async fn given_missing_object_when_signing_then_rejected_with_storage_message() {
    let (server, _captured) = storage_server().await;
    let signer = SupabaseStorageSigner::new(&server.url(), "service-key", "audio-uploads").unwrap();

    let result = signer
        .signed_url("user-1/missing.webm", Duration::from_secs(60))
        .await;

    match result {
        Err(SignedUrlError::Rejected(message)) => assert!(message.contains("Object not found")),
        other => panic!("expected rejection, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn given_invalid_project_url_when_constructing_then_configuration_error() {
    let result = SupabaseStorageSigner::new("not a url", "key", "audio-uploads");
    assert!(matches!(result, Err(SignedUrlError::Configuration(_))));
}
