use std::time::Duration;

use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;

use crate::application::ports::{SignedUrlError, SignedUrlProvider};

/// Presigns GET requests against any S3-compatible bucket.
pub struct S3StorageSigner {
    store: AmazonS3,
}

impl S3StorageSigner {
    pub fn new(
        bucket: &str,
        region: &str,
        endpoint: Option<&str>,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<Self, SignedUrlError> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key);

        if let Some(endpoint) = endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| SignedUrlError::Configuration(e.to_string()))?;

        Ok(Self { store })
    }
}

#[async_trait]
impl SignedUrlProvider for S3StorageSigner {
    async fn signed_url(&self, key: &str, expires_in: Duration) -> Result<String, SignedUrlError> {
        let path = StorePath::from(key);
        let url = self
            .store
            .signed_url(http::Method::GET, &path, expires_in)
            .await
            .map_err(|e| SignedUrlError::RequestFailed(e.to_string()))?;

        Ok(url.to_string())
    }
}
