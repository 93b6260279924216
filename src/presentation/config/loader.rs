use std::collections::HashMap;

use config::{Config, File};

use super::settings::{DatabaseProvider, Settings, StorageProvider, non_blank};
use super::Environment;

/// Flat variable names accepted for compatibility with existing deployments.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("SUPABASE_URL", "database.url"),
    ("SUPABASE_SERVICE_ROLE_KEY", "database.service_key"),
    ("DATABASE_URL", "database.postgres_url"),
    ("DATABASE_PROVIDER", "database.provider"),
    ("BUCKET_NAME", "storage.bucket"),
    ("STORAGE_PROVIDER", "storage.provider"),
    ("TRANSCRIPTION_PROVIDER", "models.transcription_provider"),
    ("WHISPER_MODEL", "models.whisper_model"),
    ("WHISPER_BASE_URL", "models.whisper_base_url"),
    ("WHISPER_API_KEY", "models.whisper_api_key"),
    ("SUMMARIZER_MODEL", "models.summarizer_model"),
    ("SUMMARIZER_BASE_URL", "models.summarizer_base_url"),
    ("HF_TOKEN", "models.summarizer_api_key"),
    ("SUMMARIZER_API_KEY", "models.summarizer_api_key"),
    ("PORT", "server.port"),
];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
}

impl Settings {
    /// Loads from `appsettings.<env>`, `APP__*` variables and the legacy
    /// flat variables, then validates.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Self::from_vars(environment, std::env::vars().collect())
    }

    pub fn from_vars(
        environment: Environment,
        vars: HashMap<String, String>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000_i64)?
            .set_default("database.provider", "supabase")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("storage.provider", "supabase")?
            .set_default("storage.bucket", "audio-uploads")?
            .set_default("storage.signed_url_ttl_secs", 60_i64)?
            .set_default("models.transcription_provider", "remote")?
            .set_default("models.whisper_model", "small")?
            .set_default("models.whisper_base_url", "http://localhost:8001/v1")?
            .set_default("models.summarizer_model", "ai4bharat/IndicBARTSS")?
            .set_default(
                "models.summarizer_base_url",
                "https://api-inference.huggingface.co",
            )?
            .set_default("models.summarizer_method", "IndicBARTSS")?
            .set_default("models.request_timeout_secs", 300_i64)?
            .set_default("fetch.timeout_secs", 120_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (variable, key) in LEGACY_VARIABLES {
            let value = vars.get(*variable).filter(|v| !v.trim().is_empty()).cloned();
            builder = builder.set_override_option(*key, value)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects configurations the service cannot start with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.database.provider {
            DatabaseProvider::Supabase => {
                if !non_blank(&self.database.url) {
                    return Err(SettingsError::Missing("SUPABASE_URL"));
                }
                if !non_blank(&self.database.service_key) {
                    return Err(SettingsError::Missing("SUPABASE_SERVICE_ROLE_KEY"));
                }
            }
            DatabaseProvider::Postgres => {
                if !non_blank(&self.database.postgres_url) {
                    return Err(SettingsError::Missing("DATABASE_URL"));
                }
            }
        }

        if self.storage.provider == StorageProvider::Supabase
            && (!non_blank(&self.database.url) || !non_blank(&self.database.service_key))
        {
            return Err(SettingsError::Missing(
                "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY (storage)",
            ));
        }

        Ok(())
    }
}
