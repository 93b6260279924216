use std::fmt;
use std::sync::Arc;

use crate::application::ports::{Summarizer, TranscriptionEngine};

/// A model handle that either finished loading at startup or did not.
pub enum Capability<T: ?Sized> {
    Loaded(Arc<T>),
    Unavailable { reason: String },
}

impl<T: ?Sized> Capability<T> {
    pub fn from_result<E: fmt::Display>(result: Result<Arc<T>, E>) -> Self {
        match result {
            Ok(inner) => Capability::Loaded(inner),
            Err(e) => Capability::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Capability::Loaded(_))
    }

    pub fn get(&self) -> Option<&Arc<T>> {
        match self {
            Capability::Loaded(inner) => Some(inner),
            Capability::Unavailable { .. } => None,
        }
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Capability::Loaded(inner) => Capability::Loaded(Arc::clone(inner)),
            Capability::Unavailable { reason } => Capability::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

impl<T: ?Sized> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Loaded(_) => f.write_str("Loaded"),
            Capability::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// Models loaded once at process start and shared read-only by all requests.
#[derive(Clone, Debug)]
pub struct ModelContext {
    pub transcription: Capability<dyn TranscriptionEngine>,
    pub summarizer: Capability<dyn Summarizer>,
}

impl ModelContext {
    pub fn new(
        transcription: Capability<dyn TranscriptionEngine>,
        summarizer: Capability<dyn Summarizer>,
    ) -> Self {
        Self {
            transcription,
            summarizer,
        }
    }

    pub fn transcription_loaded(&self) -> bool {
        self.transcription.is_loaded()
    }

    pub fn summarizer_loaded(&self) -> bool {
        self.summarizer.is_loaded()
    }
}
