use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use saaramsham::application::ports::{Summarizer, SummarizerError};
use saaramsham::domain::SummaryLength;
use saaramsham::infrastructure::summarization::HuggingFaceSummarizer;
use serde_json::{Value, json};

use crate::helpers::mock_server::MockServer;

type Shared = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

async fn model_handler(
    State(requests): State<Shared>,
    Path((org, name)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    requests
        .lock()
        .unwrap()
        .push((format!("{}/{}", org, name), auth, body));

    match name.as_str() {
        "loading" => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Model is currently loading", "estimated_time": 20.0 })),
        ),
        "empty" => (StatusCode::OK, Json(json!([]))),
        _ => (
            StatusCode::OK,
            Json(json!([{ "summary_text": " బడ్జెట్ సమావేశం " }])),
        ),
    }
}

async fn inference_server() -> (MockServer, Shared) {
    let requests = Shared::default();
    let router = Router::new()
        .route("/models/{org}/{name}", post(model_handler))
        .with_state(requests.clone());
    (MockServer::start(router).await, requests)
}

fn summarizer(base_url: &str, model: &str, key: Option<&str>) -> HuggingFaceSummarizer {
    HuggingFaceSummarizer::new(
        base_url,
        model,
        key.map(str::to_string),
        "IndicBARTSS",
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_list_response_when_summarizing_then_returns_trimmed_first_summary() {
    let (server, requests) = inference_server().await;
    let summarizer = summarizer(&server.url(), "ai4bharat/IndicBARTSS", Some("hf_token"));

    let summary = summarizer
        .summarize("long transcript", SummaryLength::new(10, 60).unwrap())
        .await
        .unwrap();

    assert_eq!(summary, "బడ్జెట్ సమావేశం");
    assert_eq!(summarizer.method(), "IndicBARTSS");

    let requests = requests.lock().unwrap();
    let (model, auth, body) = &requests[0];
    assert_eq!(model, "ai4bharat/IndicBARTSS");
    assert_eq!(auth.as_deref(), Some("Bearer hf_token"));
    assert_eq!(
        body,
        &json!({
            "inputs": "long transcript",
            "parameters": { "max_length": 60, "min_length": 10, "do_sample": false }
        })
    );
}

#[tokio::test]
async fn given_no_api_key_when_summarizing_then_sends_no_authorization() {
    let (server, requests) = inference_server().await;
    let summarizer = summarizer(&server.url(), "ai4bharat/IndicBARTSS", None);

    summarizer
        .summarize("text", SummaryLength::default())
        .await
        .unwrap();

    assert!(requests.lock().unwrap()[0].1.is_none());
}

#[tokio::test]
async fn given_model_loading_when_summarizing_then_api_request_failed() {
    let (server, _requests) = inference_server().await;
    let summarizer = summarizer(&server.url(), "org/loading", None);

    let result = summarizer.summarize("text", SummaryLength::default()).await;

    assert!(matches!(result, Err(SummarizerError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_empty_result_list_when_summarizing_then_invalid_response() {
    let (server, _requests) = inference_server().await;
    let summarizer = summarizer(&server.url(), "org/empty", None);

    let result = summarizer.summarize("text", SummaryLength::default()).await;

    assert!(matches!(result, Err(SummarizerError::InvalidResponse(_))));
}
