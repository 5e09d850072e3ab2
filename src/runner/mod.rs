//! Step sequencing.
//!
//! - [`Sequencer`] - runs named steps in order, stopping at the first failure
//! - [`Outcome`] - the single terminal result of a run
//! - [`SequencerState`] - where a run currently is

pub mod outcome;
pub mod sequencer;
pub mod state;

pub use outcome::Outcome;
pub use sequencer::{RunProgress, Sequencer};
pub use state::{SequencerState, Transition};
