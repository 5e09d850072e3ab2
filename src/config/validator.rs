//! Configuration validation rules.
//!
//! - Steps must have a non-blank command
//! - Pipelines must list at least one step
//!
//! Pipeline entries are not checked against the defined steps here;
//! the sequencer resolves names when a run starts.

use crate::config::schema::BuildseqConfig;
use crate::error::{BuildseqError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
///
/// Collects every error rather than stopping at the first one.
pub fn validate_config(config: &BuildseqConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, step) in &config.steps {
        let blank = step
            .command
            .as_deref()
            .map(|c| c.trim().is_empty())
            .unwrap_or(true);
        if blank {
            errors.push(ValidationError {
                rule: "missing-command".to_string(),
                message: format!("Step '{}' must have a 'command'", name),
            });
        }
    }

    for (name, pipeline) in &config.pipelines {
        if pipeline.steps.is_empty() {
            errors.push(ValidationError {
                rule: "empty-pipeline".to_string(),
                message: format!("Pipeline '{}' has no steps", name),
            });
        }
    }

    errors
}

/// Validate a configuration, failing with every message joined.
pub fn validate(config: &BuildseqConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(BuildseqError::ConfigValidationError { message })
}
