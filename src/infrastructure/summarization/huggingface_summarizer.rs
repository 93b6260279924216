use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Summarizer, SummarizerError};
use crate::domain::SummaryLength;

/// Seq2seq summarization through the Hugging Face Inference API or any
/// server speaking the same `/models/{id}` contract.
pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    method: String,
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummaryText {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummarizationResponse {
    List(Vec<SummaryText>),
    Single(SummaryText),
    Error { error: String },
    Text(String),
}

impl SummarizationResponse {
    fn into_text(self) -> Result<String, SummarizerError> {
        let text = match self {
            Self::List(items) => items
                .into_iter()
                .next()
                .map(|s| s.summary_text)
                .ok_or_else(|| SummarizerError::InvalidResponse("empty result list".to_string()))?,
            Self::Single(item) => item.summary_text,
            Self::Text(text) => text,
            Self::Error { error } => return Err(SummarizerError::ApiRequestFailed(error)),
        };
        Ok(text.trim().to_string())
    }
}

impl HuggingFaceSummarizer {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        method: &str,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizerError::ModelLoadFailed(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/models/{}", base_url.trim_end_matches('/'), model),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            method: method.to_string(),
        })
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String, SummarizerError> {
        let request_body = SummarizationRequest {
            inputs: text,
            parameters: GenerationParameters {
                max_length: length.max(),
                min_length: length.min(),
                do_sample: false,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummarizerError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: SummarizationResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::InvalidResponse(e.to_string()))?;

        let summary = parsed.into_text()?;
        tracing::debug!(chars = summary.len(), "Summary generated");
        Ok(summary)
    }

    fn method(&self) -> &str {
        &self.method
    }
}
