//! Configuration schema definitions for buildseq.
//!
//! This module contains all the struct definitions that map to
//! the YAML configuration file format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Name of the pipeline run when none is given.
pub const DEFAULT_PIPELINE: &str = "default";

/// Step list used when the configuration defines no `default` pipeline.
pub const DEFAULT_STEPS: [&str; 3] = [
    "macos-dylib-clean",
    "compile-polyfill",
    "build-darwin-kraken-lib",
];

/// Root configuration structure for `.buildseq/config.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BuildseqConfig {
    /// Application name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Global settings
    pub settings: Settings,

    /// Variables available to `${name}` interpolation
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, String>,

    /// Step definitions, keyed by step name
    #[serde(default)]
    pub steps: BTreeMap<String, StepConfig>,

    /// Named, ordered step lists
    #[serde(default)]
    pub pipelines: BTreeMap<String, PipelineConfig>,
}

impl BuildseqConfig {
    /// Step names for a pipeline.
    ///
    /// Falls back to [`DEFAULT_STEPS`] when asked for the `default`
    /// pipeline and the config does not define one.
    pub fn pipeline_steps(&self, name: &str) -> Option<Vec<String>> {
        match self.pipelines.get(name) {
            Some(pipeline) => Some(pipeline.steps.clone()),
            None if name == DEFAULT_PIPELINE => {
                Some(DEFAULT_STEPS.iter().map(|s| s.to_string()).collect())
            }
            None => None,
        }
    }
}

/// Global settings that apply to every step
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Default output mode: verbose, quiet, silent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output: Option<OutputMode>,

    /// Environment variables passed to every step
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Quiet,
    Silent,
}

/// A single named build step
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StepConfig {
    /// Shell command to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Working directory, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Step-specific environment variables (override `settings.env`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

/// A named, ordered list of steps
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PipelineConfig {
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Step names, run in this order
    pub steps: Vec<String>,
}
