mod audio_fetcher;
mod language_detector;
mod repository_error;
mod signed_url_provider;
mod summarizer;
mod summary_repository;
mod transcript_repository;
mod transcription_engine;

pub use audio_fetcher::{AudioFetchError, AudioFetcher};
pub use language_detector::{LanguageDetectionError, LanguageDetector};
pub use repository_error::RepositoryError;
pub use signed_url_provider::{SignedUrlError, SignedUrlProvider};
pub use summarizer::{Summarizer, SummarizerError};
pub use summary_repository::SummaryRepository;
pub use transcript_repository::TranscriptRepository;
pub use transcription_engine::{
    RawTranscription, TranscriptionEngine, TranscriptionError, TranscriptionOptions,
};
