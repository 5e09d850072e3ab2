//! Steps and the step registry.
//!
//! A step is an opaque, named unit of build work. The sequencer only sees
//! whether it succeeded or failed; what it does is up to the implementation:
//!
//! - [`ShellStep`] - runs a configured shell command
//! - [`FnStep`] - runs a closure
//! - [`StepRegistry`] - maps step names to steps
//!
//! # Example
//!
//! ```
//! use buildseq::steps::{ExecutionOptions, FnStep, Step, StepRegistry};
//!
//! let mut registry = StepRegistry::new();
//! registry.register(FnStep::new("compile-polyfill", |_| Ok(())));
//!
//! let step = registry.resolve("compile-polyfill").unwrap();
//! assert!(step.execute(&ExecutionOptions::default()).is_ok());
//! assert!(registry.resolve("missing-step").is_err());
//! ```

pub mod fn_step;
pub mod registry;
pub mod shell_step;

pub use fn_step::FnStep;
pub use registry::StepRegistry;
pub use shell_step::ShellStep;

use crate::error::StepError;

/// Options that apply to every step of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionOptions {
    /// Preview only: shell steps do not run their command.
    pub dry_run: bool,

    /// Let step output go straight to the terminal instead of capturing it.
    pub stream_output: bool,
}

/// A named unit of work the sequencer can run.
pub trait Step {
    /// Registry name of the step.
    fn name(&self) -> &str;

    /// Short human-readable description of what the step runs.
    fn summary(&self) -> Option<String> {
        None
    }

    /// Run the step to completion.
    fn execute(&self, options: &ExecutionOptions) -> Result<(), StepError>;
}
