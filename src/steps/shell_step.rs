//! Steps that run a shell command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::config::schema::StepConfig;
use crate::error::{BuildseqError, Result, StepError};
use crate::shell::{execute, CommandOptions, StdoutMode};

use super::{ExecutionOptions, Step};

/// A step backed by a shell command with interpolation already applied.
#[derive(Debug, Clone)]
pub struct ShellStep {
    /// Step name.
    pub name: String,

    /// Fully resolved command.
    pub command: String,

    /// Optional description.
    pub description: Option<String>,

    /// Working directory the command runs in.
    pub cwd: PathBuf,

    /// Environment variables (global settings merged with step overrides).
    pub env: HashMap<String, String>,
}

impl ShellStep {
    /// Create a step that runs `command` in `cwd`.
    pub fn new(name: impl Into<String>, command: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            description: None,
            cwd: cwd.into(),
            env: HashMap::new(),
        }
    }

    /// Build a step from its configuration.
    ///
    /// `${var}` references in the command and working directory are
    /// resolved here, so an unknown variable fails before anything runs.
    pub fn from_config(
        name: &str,
        config: &StepConfig,
        project_root: &Path,
        global_env: &HashMap<String, String>,
        context: &InterpolationContext,
    ) -> Result<Self> {
        let template = config.command.as_deref().unwrap_or_default();
        if template.trim().is_empty() {
            return Err(BuildseqError::ConfigValidationError {
                message: format!("Step '{}' must have a 'command'", name),
            });
        }
        let command = resolve_string(template, context)?;

        let cwd = match &config.cwd {
            Some(dir) => {
                let dir = resolve_string(&dir.to_string_lossy(), context)?;
                project_root.join(dir)
            }
            None => project_root.to_path_buf(),
        };

        let mut env = global_env.clone();
        env.extend(config.env.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(Self {
            name: name.to_string(),
            command,
            description: config.description.clone(),
            cwd,
            env,
        })
    }
}

impl Step for ShellStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<String> {
        Some(self.command.clone())
    }

    fn execute(&self, options: &ExecutionOptions) -> std::result::Result<(), StepError> {
        if options.dry_run {
            debug!("Dry run, not executing '{}': {}", self.name, self.command);
            return Ok(());
        }

        // Only stderr is ever shown for a captured step, as part of its failure
        let cmd_options = CommandOptions {
            cwd: Some(self.cwd.clone()),
            env: self.env.clone(),
            stdout: if options.stream_output {
                StdoutMode::Inherit
            } else {
                StdoutMode::Discard
            },
            capture_stderr: !options.stream_output,
        };

        let result = execute(&self.command, &cmd_options).map_err(|source| StepError::Spawn {
            step: self.name.clone(),
            command: self.command.clone(),
            source,
        })?;

        if !result.success {
            return Err(StepError::CommandFailed {
                step: self.name.clone(),
                command: self.command.clone(),
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        Ok(())
    }
}
