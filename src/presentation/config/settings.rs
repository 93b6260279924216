use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub models: ModelSettings,
    pub fetch: FetchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProvider {
    /// Supabase PostgREST over HTTPS.
    Supabase,
    /// Direct Postgres connection.
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub provider: DatabaseProvider,
    /// Supabase project URL (`SUPABASE_URL`).
    pub url: Option<String>,
    /// Supabase service-role key (`SUPABASE_SERVICE_ROLE_KEY`).
    pub service_key: Option<String>,
    /// Postgres connection string (`DATABASE_URL`).
    pub postgres_url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseSettings {
    /// Whether the configured provider has an endpoint to talk to.
    pub fn endpoint_configured(&self) -> bool {
        match self.provider {
            DatabaseProvider::Supabase => non_blank(&self.url),
            DatabaseProvider::Postgres => non_blank(&self.postgres_url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Supabase,
    S3,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    pub bucket: String,
    pub signed_url_ttl_secs: u64,
    pub s3_endpoint: Option<String>,
    pub s3_region: Option<String>,
    pub s3_access_key_id: Option<String>,
    pub s3_secret_access_key: Option<String>,
}

impl StorageSettings {
    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.signed_url_ttl_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    /// OpenAI-compatible transcription server.
    Remote,
    /// In-process candle Whisper (feature `local-whisper`).
    Local,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub transcription_provider: TranscriptionProviderSetting,
    /// Whisper size selector, e.g. `small`.
    pub whisper_model: String,
    pub whisper_base_url: String,
    pub whisper_api_key: Option<String>,
    pub summarizer_model: String,
    pub summarizer_base_url: String,
    pub summarizer_api_key: Option<String>,
    pub summarizer_method: String,
    pub request_timeout_secs: u64,
}

impl ModelSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    /// Directory for downloaded recordings; the OS temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

pub(super) fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
