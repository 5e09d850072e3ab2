//! Step registry.
//!
//! Maps step names to runnable steps. The registry is built once, handed
//! to the sequencer, and only read afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::config::interpolation::InterpolationContext;
use crate::config::schema::BuildseqConfig;
use crate::error::{BuildseqError, Result};

use super::{ShellStep, Step};

/// Name-to-step lookup table.
#[derive(Default)]
pub struct StepRegistry {
    steps: BTreeMap<String, Box<dyn Step>>,
}

impl StepRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with one [`ShellStep`] per configured step.
    pub fn from_config(
        config: &BuildseqConfig,
        project_root: &Path,
        context: &InterpolationContext,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for (name, step_config) in &config.steps {
            let step = ShellStep::from_config(
                name,
                step_config,
                project_root,
                &config.settings.env,
                context,
            )?;
            registry.register(step);
        }
        Ok(registry)
    }

    /// Register a step, replacing any step with the same name.
    pub fn register(&mut self, step: impl Step + 'static) -> &mut Self {
        let name = step.name().to_string();
        if self.steps.insert(name.clone(), Box::new(step)).is_some() {
            tracing::debug!("Replaced registered step '{}'", name);
        }
        self
    }

    /// Look up a step by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStep` if no step with that name is registered.
    pub fn resolve(&self, name: &str) -> Result<&dyn Step> {
        self.steps
            .get(name)
            .map(|step| step.as_ref())
            .ok_or_else(|| BuildseqError::UnknownStep {
                name: name.to_string(),
            })
    }

    /// Check whether a step is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Registered step names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.steps.keys().map(String::as_str).collect()
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps are registered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRegistry")
            .field("steps", &self.names())
            .finish()
    }
}
