use super::PipelineError;

/// Result of one pipeline stage.
///
/// `Degraded` carries a usable fallback value: the stage failed, the failure
/// was logged, and the request continues with `value`.
#[derive(Debug)]
pub enum StageOutcome<T> {
    Completed(T),
    Degraded { value: T, reason: String },
    Fatal(PipelineError),
}

impl<T> StageOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, StageOutcome::Completed(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, StageOutcome::Fatal(_))
    }
}
