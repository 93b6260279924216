use std::fmt;
use std::str::FromStr;

/// Languages the pipeline reports. Detector output outside this set is
/// folded into [`Language::Telugu`] by the language identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Telugu,
    Hindi,
    Tamil,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "te" => Ok(Language::Telugu),
            "hi" => Ok(Language::Hindi),
            "ta" => Ok(Language::Tamil),
            other => Err(format!("Unsupported language tag: {}", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller preference for the language recorded on the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLanguage {
    #[default]
    Auto,
    Forced(Language),
}

impl OutputLanguage {
    /// Only `"te"` and `"en"` force a language; every other value means auto.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("te") => OutputLanguage::Forced(Language::Telugu),
            Some("en") => OutputLanguage::Forced(Language::English),
            _ => OutputLanguage::Auto,
        }
    }

    pub fn resolve(&self, detected: Language) -> Language {
        match self {
            OutputLanguage::Forced(language) => *language,
            OutputLanguage::Auto => detected,
        }
    }
}
