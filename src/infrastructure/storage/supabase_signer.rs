use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SignedUrlError, SignedUrlProvider};

/// Signs objects through the Supabase Storage REST API.
pub struct SupabaseStorageSigner {
    client: reqwest::Client,
    base_url: Url,
    service_key: String,
    bucket: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

#[derive(Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SupabaseStorageSigner {
    pub fn new(project_url: &str, service_key: &str, bucket: &str) -> Result<Self, SignedUrlError> {
        let base_url = Url::parse(project_url.trim_end_matches('/'))
            .map_err(|e| SignedUrlError::Configuration(format!("SUPABASE_URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SignedUrlError::Configuration(format!(
                "SUPABASE_URL is not a base URL: {}",
                project_url
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            service_key: service_key.to_string(),
            bucket: bucket.to_string(),
        })
    }

    fn storage_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("storage").push("v1");
            path.extend(segments.iter().filter(|s| !s.is_empty()));
        }
        url
    }

    fn resolve_signed_path(&self, signed_path: &str) -> Result<String, SignedUrlError> {
        let storage_root = self.storage_url(&[]);
        let joined = format!(
            "{}/{}",
            storage_root.as_str().trim_end_matches('/'),
            signed_path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map(|u| u.to_string())
            .map_err(|e| SignedUrlError::Rejected(format!("malformed signed URL: {}", e)))
    }
}

#[async_trait]
impl SignedUrlProvider for SupabaseStorageSigner {
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, SignedUrlError> {
        let mut segments = vec!["object", "sign", self.bucket.as_str()];
        segments.extend(key.split('/'));
        let url = self.storage_url(&segments);

        tracing::debug!(bucket = %self.bucket, key = %key, "Requesting signed URL");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&SignRequest {
                expires_in: expires_in.as_secs().max(1),
            })
            .send()
            .await
            .map_err(|e| SignedUrlError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StorageErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or(body);
            return Err(SignedUrlError::Rejected(format!(
                "status {}: {}",
                status, message
            )));
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| SignedUrlError::Rejected(format!("parse response: {}", e)))?;

        self.resolve_signed_path(&signed.signed_url)
    }
}
