//! Sequencer state machine.

use std::fmt;

/// Where a sequencer run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// No run has started.
    #[default]
    NotStarted,

    /// Step `index` of the list is executing.
    Running { index: usize },

    /// Every step succeeded.
    Succeeded,

    /// A step failed or a name could not be resolved.
    Failed,
}

/// Something that moves the state machine forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// All names resolved; the first step is about to run.
    Start,
    /// The current step succeeded; `total` is the length of the list.
    StepSucceeded { total: usize },
    /// The current step failed.
    StepFailed,
    /// Name resolution failed before any step ran.
    ResolutionFailed,
}

impl SequencerState {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Apply a transition, returning the next state.
    ///
    /// Transitions that make no sense from the current state leave it
    /// unchanged; terminal states never change.
    pub fn advance(self, transition: Transition) -> Self {
        match (self, transition) {
            (Self::NotStarted, Transition::Start) => Self::Running { index: 0 },
            (Self::NotStarted, Transition::ResolutionFailed) => Self::Failed,
            (Self::Running { index }, Transition::StepSucceeded { total }) => {
                if index + 1 < total {
                    Self::Running { index: index + 1 }
                } else {
                    Self::Succeeded
                }
            }
            (Self::Running { .. }, Transition::StepFailed) => Self::Failed,
            (state, _) => state,
        }
    }
}

impl fmt::Display for SequencerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Running { index } => write!(f, "running step {}", index + 1),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
