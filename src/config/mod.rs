//! Configuration loading, parsing, and validation for buildseq.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use buildseq::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".buildseq");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "app_name: kraken").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.app_name, Some("kraken".to_string()));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.buildseq/config.yml`)
//! 2. Local overrides (`.buildseq/config.local.yml`)

pub mod interpolation;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_string, InterpolationContext, Segment,
};
pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    BuildseqConfig, OutputMode, PipelineConfig, Settings, StepConfig, DEFAULT_PIPELINE,
    DEFAULT_STEPS,
};
pub use validator::{validate, validate_config, ValidationError};
