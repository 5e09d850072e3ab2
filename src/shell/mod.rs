//! Shell command execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult, StdoutMode};
pub use platform::{is_ci, shell_executable, shell_flag};
