//! Platform-specific shell detection.

use std::path::PathBuf;

/// The shell used to run step commands.
///
/// `$SHELL` on Unix (falling back to `/bin/sh`), `%COMSPEC%` on Windows.
pub fn shell_executable() -> PathBuf {
    let (var, fallback) = if cfg!(target_os = "windows") {
        ("COMSPEC", "cmd.exe")
    } else {
        ("SHELL", "/bin/sh")
    };
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
}

/// Get the flag that passes a command string to the shell.
///
/// Build commands run non-interactively so they see the same environment
/// locally and in CI.
pub fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}

/// Variables set by common CI providers.
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
];

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_executable_is_not_empty() {
        assert!(!shell_executable().as_os_str().is_empty());
    }

    #[test]
    fn shell_flag_matches_platform() {
        if cfg!(target_os = "windows") {
            assert_eq!(shell_flag(), "/C");
        } else {
            assert_eq!(shell_flag(), "-c");
        }
    }

    #[test]
    fn is_ci_follows_known_variables() {
        let expected = CI_VARS.iter().any(|var| std::env::var_os(var).is_some());
        assert_eq!(is_ci(), expected);
    }
}
