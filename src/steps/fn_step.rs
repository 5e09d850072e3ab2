//! Closure-backed steps.

use std::fmt;

use crate::error::StepError;

use super::{ExecutionOptions, Step};

type StepFn = Box<dyn Fn(&ExecutionOptions) -> Result<(), StepError>>;

/// A step whose work is a closure.
///
/// Used to register in-process build work and to build fake registries in
/// tests.
pub struct FnStep {
    name: String,
    summary: Option<String>,
    action: StepFn,
}

impl FnStep {
    /// Create a step named `name` that runs `action`.
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&ExecutionOptions) -> Result<(), StepError> + 'static,
    {
        Self {
            name: name.into(),
            summary: None,
            action: Box::new(action),
        }
    }

    /// Attach a summary shown in progress output.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

impl Step for FnStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<String> {
        self.summary.clone()
    }

    fn execute(&self, options: &ExecutionOptions) -> Result<(), StepError> {
        (self.action)(options)
    }
}

impl fmt::Debug for FnStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
