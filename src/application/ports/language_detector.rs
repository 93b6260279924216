/// Statistical language guess over free text.
pub trait LanguageDetector: Send + Sync {
    /// Returns an ISO 639-1 code when the language has one, otherwise the
    /// detector's native code.
    fn detect(&self, text: &str) -> Result<String, LanguageDetectionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LanguageDetectionError {
    #[error("no language features in input")]
    NoFeatures,
    #[error("detection failed: {0}")]
    Failed(String),
}
