use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::application::ports::LanguageDetector;
use crate::domain::Language;

const TELUGU_BLOCK: RangeInclusive<char> = '\u{0C00}'..='\u{0C7F}';

pub fn contains_telugu_script(text: &str) -> bool {
    text.chars().any(|c| TELUGU_BLOCK.contains(&c))
}

/// Maps transcript text to a [`Language`].
///
/// Telugu script anywhere in the text always yields Telugu. A detector
/// result outside the known set also yields Telugu; a detector failure on
/// text without Telugu script yields English.
pub struct LanguageIdentifier {
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageIdentifier {
    pub fn new(detector: Arc<dyn LanguageDetector>) -> Self {
        Self { detector }
    }

    pub fn identify(&self, text: &str) -> Language {
        let has_telugu = contains_telugu_script(text);

        match self.detector.detect(text) {
            Ok(_) if has_telugu => Language::Telugu,
            Ok(code) => code.parse::<Language>().unwrap_or_else(|_| {
                tracing::debug!(detected = %code, "Unrecognized language, defaulting to Telugu");
                Language::Telugu
            }),
            Err(e) => {
                tracing::debug!(error = %e, has_telugu, "Language detection failed");
                if has_telugu {
                    Language::Telugu
                } else {
                    Language::English
                }
            }
        }
    }
}
