use std::fmt;

/// Checkpoints of a single `/process` run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Start,
    AudioFetched,
    Transcribed,
    LanguageResolved,
    TranscriptPersisted,
    Summarized,
    SummaryPersisted,
    SummaryPersistFailed,
    Cleanup,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Start => "START",
            PipelineStage::AudioFetched => "AUDIO_FETCHED",
            PipelineStage::Transcribed => "TRANSCRIBED",
            PipelineStage::LanguageResolved => "LANGUAGE_RESOLVED",
            PipelineStage::TranscriptPersisted => "TRANSCRIPT_PERSISTED",
            PipelineStage::Summarized => "SUMMARIZED",
            PipelineStage::SummaryPersisted => "SUMMARY_PERSISTED",
            PipelineStage::SummaryPersistFailed => "SUMMARY_PERSIST_FAILED",
            PipelineStage::Cleanup => "CLEANUP",
            PipelineStage::Done => "DONE",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
