use std::sync::Arc;

use crate::application::ports::{SignedUrlError, SignedUrlProvider};
use crate::presentation::config::{DatabaseSettings, StorageProvider, StorageSettings};

use super::s3_signer::S3StorageSigner;
use super::supabase_signer::SupabaseStorageSigner;

pub struct StorageSignerFactory;

impl StorageSignerFactory {
    pub fn create(
        storage: &StorageSettings,
        database: &DatabaseSettings,
    ) -> Result<Arc<dyn SignedUrlProvider>, SignedUrlError> {
        match storage.provider {
            StorageProvider::Supabase => {
                let url = database.url.as_deref().ok_or_else(|| {
                    SignedUrlError::Configuration("SUPABASE_URL required".into())
                })?;
                let key = database.service_key.as_deref().ok_or_else(|| {
                    SignedUrlError::Configuration("SUPABASE_SERVICE_ROLE_KEY required".into())
                })?;
                let signer = SupabaseStorageSigner::new(url, key, &storage.bucket)?;
                Ok(Arc::new(signer))
            }
            StorageProvider::S3 => {
                let access_key = storage.s3_access_key_id.as_deref().ok_or_else(|| {
                    SignedUrlError::Configuration("s3_access_key_id required".into())
                })?;
                let secret = storage.s3_secret_access_key.as_deref().ok_or_else(|| {
                    SignedUrlError::Configuration("s3_secret_access_key required".into())
                })?;
                let region = storage.s3_region.as_deref().unwrap_or("us-east-1");
                let signer = S3StorageSigner::new(
                    &storage.bucket,
                    region,
                    storage.s3_endpoint.as_deref(),
                    access_key,
                    secret,
                )?;
                Ok(Arc::new(signer))
            }
        }
    }
}
