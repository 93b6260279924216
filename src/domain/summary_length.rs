pub const DEFAULT_MAX_LENGTH: u32 = 120;
pub const DEFAULT_MIN_LENGTH: u32 = 20;

/// Token bounds handed to the summarization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLength {
    min: u32,
    max: u32,
}

impl SummaryLength {
    pub fn new(min: u32, max: u32) -> Result<Self, SummaryLengthError> {
        if min == 0 {
            return Err(SummaryLengthError::ZeroMinimum);
        }
        if max < min {
            return Err(SummaryLengthError::MaxBelowMin { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for SummaryLength {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LENGTH,
            max: DEFAULT_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryLengthError {
    #[error("min_length must be greater than zero")]
    ZeroMinimum,
    #[error("max_length ({max}) must be at least min_length ({min})")]
    MaxBelowMin { min: u32, max: u32 },
}
