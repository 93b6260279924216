#[cfg(feature = "local-whisper")]
pub mod audio_decoder;
#[cfg(feature = "local-whisper")]
mod candle_whisper_engine;
mod remote_whisper_engine;
mod transcription_engine_factory;
#[cfg(feature = "local-whisper")]
mod voice_activity;

#[cfg(feature = "local-whisper")]
pub use candle_whisper_engine::{CandleWhisperEngine, whisper_repo_id};
pub use remote_whisper_engine::RemoteWhisperEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
#[cfg(feature = "local-whisper")]
pub use voice_activity::VoiceActivityFilter;
