use std::time::Duration;

use saaramsham::application::ports::SignedUrlProvider;
use saaramsham::infrastructure::storage::S3StorageSigner;

#[tokio::test]
async fn given_static_credentials_when_signing_then_returns_presigned_get_url() {
    let signer = S3StorageSigner::new(
        "audio-uploads",
        "us-east-1",
        Some("http://localhost:9000"),
        "minio",
        "minio-secret",
    )
    .unwrap();

    let url = signer
        .signed_url("user-1/clip.webm", Duration::from_secs(60))
        .await
        .unwrap();

    assert!(url.starts_with("http://localhost:9000/"));
    assert!(url.contains("user-1/clip.webm"));
    assert!(url.contains("X-Amz-Expires=60"));
    assert!(url.contains("X-Amz-Signature="));
}
