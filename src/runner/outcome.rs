//! Terminal result of a sequencer run.

use crate::error::BuildseqError;

/// How a run ended. Produced exactly once per run.
#[derive(Debug)]
pub enum Outcome {
    /// Every step succeeded.
    Success,

    /// The first failure: a resolution error, or the failing step's error.
    Failure(BuildseqError),
}

impl Outcome {
    /// Check if the run succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The carried error, if the run failed.
    pub fn error(&self) -> Option<&BuildseqError> {
        match self {
            Self::Success => None,
            Self::Failure(e) => Some(e),
        }
    }

    /// Convert into a `Result`, for callers that want `?`.
    pub fn into_result(self) -> Result<(), BuildseqError> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(e) => Err(e),
        }
    }
}

impl From<Result<(), BuildseqError>> for Outcome {
    fn from(result: Result<(), BuildseqError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(e) => Self::Failure(e),
        }
    }
}
