//! List command implementation.
//!
//! The `buildseq list` command lists configured steps and pipelines.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::ListArgs;
use crate::config::{BuildseqConfig, DEFAULT_PIPELINE};
use crate::error::Result;
use crate::ui::{Theme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::run::load_project_config;

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Render steps and pipelines as JSON.
    fn to_json(config: &BuildseqConfig) -> serde_json::Value {
        let steps: Vec<_> = config
            .steps
            .iter()
            .map(|(name, step)| {
                json!({
                    "name": name,
                    "command": step.command,
                    "description": step.description,
                })
            })
            .collect();

        let pipelines: Vec<_> = pipeline_entries(config)
            .into_iter()
            .map(|(name, steps, description)| {
                json!({
                    "name": name,
                    "steps": steps,
                    "description": description,
                })
            })
            .collect();

        json!({ "steps": steps, "pipelines": pipelines })
    }
}

/// Configured pipelines plus the built-in `default` when none is configured.
fn pipeline_entries(config: &BuildseqConfig) -> Vec<(String, Vec<String>, Option<String>)> {
    let mut entries: Vec<_> = config
        .pipelines
        .iter()
        .map(|(name, p)| (name.clone(), p.steps.clone(), p.description.clone()))
        .collect();

    if !config.pipelines.contains_key(DEFAULT_PIPELINE) {
        if let Some(steps) = config.pipeline_steps(DEFAULT_PIPELINE) {
            entries.insert(
                0,
                (
                    DEFAULT_PIPELINE.to_string(),
                    steps,
                    Some("built-in".to_string()),
                ),
            );
        }
    }

    entries
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config =
            match load_project_config(&self.project_root, self.config_override.as_deref(), ui)? {
                Some(c) => c,
                None => return Ok(CommandResult::failure(2)),
            };

        if self.args.json {
            let rendered = serde_json::to_string_pretty(&Self::to_json(&config))
                .map_err(anyhow::Error::from)?;
            println!("{}", rendered);
            return Ok(CommandResult::success());
        }

        let theme = Theme::detect();

        ui.message(&format!("  {}", theme.key.apply_to("Steps:")));
        for (name, step) in &config.steps {
            let detail = match step.command {
                Some(ref cmd) => format!(
                    " {} {}",
                    theme.dim.apply_to("-"),
                    theme.command.apply_to(cmd)
                ),
                None => String::new(),
            };
            ui.message(&format!("    {}{}", theme.highlight.apply_to(name), detail));

            if let Some(ref desc) = step.description {
                ui.message(&format!("      {}", theme.dim.apply_to(desc)));
            }
        }

        ui.message("");
        ui.message(&format!("  {}", theme.key.apply_to("Pipelines:")));
        for (name, steps, description) in pipeline_entries(&config) {
            ui.message(&format!(
                "    {}{} {}",
                theme.highlight.apply_to(&name),
                theme.dim.apply_to(":"),
                theme.dim.apply_to(steps.join(" → ")),
            ));
            if let Some(desc) = description {
                ui.message(&format!("      {}", theme.dim.apply_to(desc)));
            }
        }

        Ok(CommandResult::success())
    }
}
