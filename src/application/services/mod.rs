mod audio_retriever;
mod language_identifier;
mod model_context;
mod persistence_gateway;
mod pipeline_error;
mod processing_pipeline;
mod stage_outcome;
mod summarization_service;
mod transcription_service;

pub use audio_retriever::AudioRetriever;
pub use language_identifier::{LanguageIdentifier, contains_telugu_script};
pub use model_context::{Capability, ModelContext};
pub use persistence_gateway::PersistenceGateway;
pub use pipeline_error::{EMPTY_TRANSCRIPT_MESSAGE, PipelineError};
pub use processing_pipeline::{
    DEFAULT_SUMMARY_METHOD, ProcessingOutcome, ProcessingPipeline, cleanup, resolve_user_id,
};
pub use stage_outcome::StageOutcome;
pub use summarization_service::SummarizationService;
pub use transcription_service::{TranscriptionResult, TranscriptionService, join_segments};
