//! Error types for buildseq operations.
//!
//! This module defines [`BuildseqError`], the primary error type used
//! throughout the application, [`StepError`], the error a single step
//! reports, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Step failures are carried verbatim: `BuildseqError::Step` displays
//!   exactly what the step reported
//! - Resolution failures (empty list, unknown name) are raised before any
//!   step runs
//! - Use `anyhow::Error` (via `Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for buildseq operations.
#[derive(Debug, Error)]
pub enum BuildseqError {
    /// No step names were given to the sequencer.
    #[error("No steps to run")]
    EmptyStepList,

    /// A step name is not registered.
    #[error("Unknown step: {name}")]
    UnknownStep { name: String },

    /// A step failed; carries the step's own error untouched.
    #[error(transparent)]
    Step(#[from] StepError),

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildseqError {
    /// Whether this error comes from resolving step names.
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::EmptyStepList | Self::UnknownStep { .. })
    }

    /// The step error carried by this failure, if a step failed.
    pub fn as_step_error(&self) -> Option<&StepError> {
        match self {
            Self::Step(e) => Some(e),
            _ => None,
        }
    }
}

/// Error reported by a single step.
#[derive(Debug, Error)]
pub enum StepError {
    /// The step's command exited unsuccessfully.
    #[error("Step '{step}' failed ({}): {command}", exit_status(.code))]
    CommandFailed {
        step: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The step's command could not be started.
    #[error("Step '{step}' could not start '{command}': {source}")]
    Spawn {
        step: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Any other failure, typically from a closure-backed step.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Describe how a command ended, for error messages.
fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias for buildseq operations.
pub type Result<T> = std::result::Result<T, BuildseqError>;
