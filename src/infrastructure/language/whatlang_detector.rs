use whatlang::Lang;

use crate::application::ports::{LanguageDetectionError, LanguageDetector};

/// Trigram-based detection via `whatlang`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, LanguageDetectionError> {
        let info = whatlang::detect(text).ok_or(LanguageDetectionError::NoFeatures)?;
        Ok(iso_639_1(info.lang())
            .map(str::to_string)
            .unwrap_or_else(|| info.lang().code().to_string()))
    }
}

/// Two-letter codes for the languages the pipeline distinguishes.
fn iso_639_1(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Eng => Some("en"),
        Lang::Tel => Some("te"),
        Lang::Hin => Some("hi"),
        Lang::Tam => Some("ta"),
        _ => None,
    }
}
