mod environment;
mod loader;
mod settings;

pub use environment::Environment;
pub use loader::SettingsError;
pub use settings::{
    DatabaseProvider, DatabaseSettings, FetchSettings, LoggingSettings, ModelSettings,
    ServerSettings, Settings, StorageProvider, StorageSettings, TranscriptionProviderSetting,
};
