//! Output verbosity.

use std::str::FromStr;

use crate::config::schema::OutputMode as ConfigOutputMode;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Stream step output to the terminal.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show spinners and the final status.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl From<ConfigOutputMode> for OutputMode {
    fn from(config_mode: ConfigOutputMode) -> Self {
        match config_mode {
            ConfigOutputMode::Verbose => Self::Verbose,
            ConfigOutputMode::Quiet => Self::Quiet,
            ConfigOutputMode::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Check if step output goes straight to the terminal.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
