mod audio_artifact;
mod audio_source;
mod language;
mod pipeline_stage;
mod processing_request;
mod summary;
mod summary_id;
mod summary_length;
mod transcript;
mod transcript_id;
mod user_id;

pub use audio_artifact::AudioArtifact;
pub use audio_source::{AudioSource, DEFAULT_AUDIO_EXTENSION, extension_of};
pub use language::{Language, OutputLanguage};
pub use pipeline_stage::PipelineStage;
pub use processing_request::ProcessingRequest;
pub use summary::{SUMMARY_FAILED_SENTINEL, Summary};
pub use summary_id::SummaryId;
pub use summary_length::{
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, SummaryLength, SummaryLengthError,
};
pub use transcript::Transcript;
pub use transcript_id::TranscriptId;
pub use user_id::UserId;
