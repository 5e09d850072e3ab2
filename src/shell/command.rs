//! Shell command execution.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::platform::{shell_executable, shell_flag};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty when not captured).
    pub stdout: String,

    /// Standard error (empty when not captured).
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// What happens to a command's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutMode {
    /// Write to the parent's stdout.
    #[default]
    Inherit,
    /// Collect into [`CommandResult::stdout`].
    Capture,
    /// Throw away.
    Discard,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Where stdout goes.
    pub stdout: StdoutMode,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a shell command and wait for it to finish.
///
/// A command that runs and exits non-zero is still `Ok`; only a failure to
/// start the shell is an error.
pub fn execute(command: &str, options: &CommandOptions) -> std::io::Result<CommandResult> {
    let mut cmd = Command::new(shell_executable());
    cmd.arg(shell_flag());
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(match options.stdout {
        StdoutMode::Inherit => Stdio::inherit(),
        StdoutMode::Capture => Stdio::piped(),
        StdoutMode::Discard => Stdio::null(),
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    let output = cmd.output()?;

    tracing::debug!("Command '{}' exited with {:?}", command, output.status.code());

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}
