//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! the project directory in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::BuildseqConfig;
use crate::error::{BuildseqError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding buildseq configuration, relative to the project root.
pub const CONFIG_DIR: &str = ".buildseq";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.buildseq/config.yml`)
/// 2. Local overrides (`.buildseq/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .buildseq/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .buildseq/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project
            .iter()
            .chain(self.project_local.iter())
            .collect()
    }

    /// Check if the project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into BuildseqConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<BuildseqConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into BuildseqConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<BuildseqConfig> {
    serde_yaml::from_str(content).map_err(|e| BuildseqError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| BuildseqError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // An empty file means "no changes", not "delete everything"
    if value.is_null() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    Ok(value)
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BuildseqError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BuildseqError::Io(e)
        }
    })
}

/// Load and merge all config files for a project.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<BuildseqConfig> {
    let paths = ConfigPaths::discover(project_root);
    let project_path = project_root.join(CONFIG_DIR).join("config.yml");

    if !paths.has_project_config() {
        return Err(BuildseqError::ConfigNotFound { path: project_path });
    }

    let configs = paths
        .all_existing()
        .into_iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| BuildseqError::ConfigParseError {
        path: project_path,
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<BuildseqConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn discover_finds_project_config() {
        let temp = setup_project("app_name: test");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.has_project_config());
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(!paths.has_project_config());
    }

    #[test]
    fn all_existing_returns_in_merge_order() {
        let temp = setup_project("");
        fs::write(temp.path().join(CONFIG_DIR).join("config.local.yml"), "").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        let all = paths.all_existing();

        assert_eq!(all.len(), 2);
        assert!(all[0].ends_with("config.yml"));
        assert!(all[1].ends_with("config.local.yml"));
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yml");
        fs::write(&config_path, "app_name: TestApp").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.app_name, Some("TestApp".to_string()));
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/config.yml"));
        assert!(matches!(result, Err(BuildseqError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let result = parse_config("invalid: yaml: content: [", Path::new("test.yml"));
        assert!(matches!(result, Err(BuildseqError::ConfigParseError { .. })));
    }

    #[test]
    fn load_merged_config_requires_project_config() {
        let temp = TempDir::new().unwrap();
        let result = load_merged_config(temp.path());
        assert!(matches!(result, Err(BuildseqError::ConfigNotFound { .. })));
    }

    #[test]
    fn local_overrides_win() {
        let temp = setup_project(
            r#"
steps:
  compile-polyfill:
    command: npm run build
    description: Compile the polyfill
"#,
        );
        fs::write(
            temp.path().join(CONFIG_DIR).join("config.local.yml"),
            r#"
steps:
  compile-polyfill:
    command: npm run build:debug
"#,
        )
        .unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        let step = &config.steps["compile-polyfill"];

        assert_eq!(step.command.as_deref(), Some("npm run build:debug"));
        assert_eq!(step.description.as_deref(), Some("Compile the polyfill"));
    }

    #[test]
    fn empty_local_override_changes_nothing() {
        let temp = setup_project("app_name: kraken");
        fs::write(temp.path().join(CONFIG_DIR).join("config.local.yml"), "").unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("kraken"));
    }

    #[test]
    fn load_config_with_override_skips_discovery() {
        let temp = setup_project("app_name: discovered");
        let other = temp.path().join("other.yml");
        fs::write(&other, "app_name: explicit").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("explicit"));
    }
}
