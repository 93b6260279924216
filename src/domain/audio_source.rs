use std::path::Path;

/// Container extension assumed when the source gives no hint. Browser
/// recorders upload WebM.
pub const DEFAULT_AUDIO_EXTENSION: &str = ".webm";

/// Where the recording is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// A pre-signed URL handed over by the client.
    DirectUrl { url: String, extension: String },
    /// A key inside the audio bucket; a signed URL is minted server-side.
    StorageKey { key: String },
}

impl AudioSource {
    /// Picks the direct URL when present, otherwise the storage key. Blank
    /// values count as absent.
    pub fn resolve(audio_url: Option<&str>, file_key: Option<&str>) -> Option<Self> {
        let audio_url = audio_url.map(str::trim).filter(|u| !u.is_empty());
        let file_key = file_key.map(str::trim).filter(|k| !k.is_empty());

        match (audio_url, file_key) {
            (Some(url), key) => Some(AudioSource::DirectUrl {
                url: url.to_string(),
                extension: key
                    .and_then(extension_of)
                    .unwrap_or_else(|| DEFAULT_AUDIO_EXTENSION.to_string()),
            }),
            (None, Some(key)) => Some(AudioSource::StorageKey {
                key: key.to_string(),
            }),
            (None, None) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AudioSource::DirectUrl { .. } => "direct_url",
            AudioSource::StorageKey { .. } => "storage_key",
        }
    }
}

/// Suffix of the last path component including the dot, e.g. `".m4a"`.
pub fn extension_of(key: &str) -> Option<String> {
    Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext))
}
