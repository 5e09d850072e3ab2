//! Run command implementation.
//!
//! The `buildseq run` command resolves a pipeline (or an explicit list of
//! steps) and hands it to the [`Sequencer`].

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{load_config, validate, BuildseqConfig, InterpolationContext, CONFIG_DIR};
use crate::error::{BuildseqError, Result};
use crate::runner::{RunProgress, Sequencer};
use crate::steps::{ExecutionOptions, StepRegistry};
use crate::ui::{format_duration, report_outcome, OutputMode, SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Load the project configuration, reporting a missing config to the user.
///
/// Returns `Ok(None)` when no configuration exists; callers exit with 2.
pub(crate) fn load_project_config(
    project_root: &Path,
    config_override: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<BuildseqConfig>> {
    let config = match load_config(project_root, config_override) {
        Ok(c) => c,
        Err(BuildseqError::ConfigNotFound { path }) => {
            ui.error(&format!("No configuration found at {}", path.display()));
            ui.message(&format!("Create {}/config.yml to define steps.", CONFIG_DIR));
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    validate(&config)?;

    // Apply config default_output when no CLI flag was explicitly set
    if ui.output_mode() == OutputMode::Normal {
        if let Some(mode) = config.settings.default_output {
            ui.set_output_mode(mode.into());
        }
    }

    Ok(Some(config))
}

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: RunArgs) -> Self {
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

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Step names to run: explicit steps win over the pipeline.
    fn step_names(&self, config: &BuildseqConfig) -> Option<Vec<String>> {
        if self.args.steps.is_empty() {
            config.pipeline_steps(&self.args.pipeline)
        } else {
            Some(self.args.steps.clone())
        }
    }

    fn build_registry(&self, config: &BuildseqConfig) -> Result<StepRegistry> {
        let ctx = InterpolationContext::new()
            .with_project_root(&self.project_root)
            .with_vars(config.vars.clone())
            .with_env(std::env::vars().collect());

        StepRegistry::from_config(config, &self.project_root, &ctx)
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config =
            match load_project_config(&self.project_root, self.config_override.as_deref(), ui)? {
                Some(c) => c,
                None => return Ok(CommandResult::failure(2)),
            };

        let Some(names) = self.step_names(&config) else {
            ui.error(&format!("Unknown pipeline: {}", self.args.pipeline));
            return Ok(CommandResult::failure(1));
        };

        let registry = self.build_registry(&config)?;
        let mut sequencer = Sequencer::new(registry);

        let app_name = config.app_name.as_deref().unwrap_or("project");
        ui.show_header(&format!("Building {}", app_name));

        if self.args.dry_run {
            ui.message("Running in dry-run mode - no commands will be executed");
        }

        let options = ExecutionOptions {
            dry_run: self.args.dry_run,
            stream_output: ui.output_mode().shows_command_output(),
        };
        let line_progress = options.stream_output || options.dry_run;

        let ui = RefCell::new(ui);
        let mut spinner: Option<Box<dyn SpinnerHandle>> = None;
        let mut exit_code = 1;

        sequencer.run_with_progress(
            &names,
            &options,
            |event| {
                let mut ui = ui.borrow_mut();
                match event {
                    RunProgress::StepStarting {
                        name,
                        summary,
                        index,
                        total,
                    } => {
                        let summary = summary.unwrap_or_default();
                        if line_progress {
                            ui.show_step(index + 1, total, name, &summary);
                            if options.dry_run {
                                ui.message(&format!("    Would run: {}", summary));
                            }
                        } else {
                            spinner = Some(
                                ui.start_spinner(&format!("[{}/{}] {}", index + 1, total, name)),
                            );
                        }
                    }
                    RunProgress::StepFinished { name, duration } => {
                        let line = format!("{} ({})", name, format_duration(duration));
                        match spinner.take() {
                            Some(mut s) => s.finish_success(&line),
                            None if !options.dry_run => ui.success(&line),
                            None => {}
                        }
                    }
                    RunProgress::StepFailed { name, duration } => {
                        let line = format!("{} failed ({})", name, format_duration(duration));
                        match spinner.take() {
                            Some(mut s) => s.finish_error(&line),
                            None => ui.warning(&line),
                        }
                    }
                }
            },
            |outcome| {
                let mut ui = ui.borrow_mut();
                exit_code = report_outcome(&mut **ui, &outcome);
            },
        );

        Ok(CommandResult::from_exit_code(exit_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config_content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".buildseq");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config_content).unwrap();
        temp
    }

    const KRAKEN: &str = r#"
app_name: kraken
steps:
  macos-dylib-clean:
    command: echo clean >> order.txt
  compile-polyfill:
    command: echo compile >> order.txt
  build-darwin-kraken-lib:
    command: echo build >> order.txt
"#;

    fn run(temp: &TempDir, args: RunArgs, ui: &mut MockUI) -> CommandResult {
        RunCommand::new(temp.path(), None, args).execute(ui).unwrap()
    }

    fn order(temp: &TempDir) -> Vec<String> {
        fs::read_to_string(temp.path().join("order.txt"))
            .unwrap_or_default()
            .lines()
            .map(|l| l.trim().to_string())
            .collect()
    }

    #[test]
    fn run_command_args() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            pipeline: "release".to_string(),
            dry_run: true,
            ..Default::default()
        };

        let cmd = RunCommand::new(temp.path(), None, args);

        assert_eq!(cmd.project_root(), temp.path());
        assert_eq!(cmd.args().pipeline, "release");
        assert!(cmd.args().dry_run);
    }

    #[test]
    fn execute_with_no_config_returns_exit_2() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = run(&temp, RunArgs::default(), &mut ui);

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert!(!ui.errors().is_empty());
    }

    #[test]
    fn default_run_uses_builtin_steps_in_order() {
        let temp = setup_project(KRAKEN);
        let mut ui = MockUI::new();

        let result = run(&temp, RunArgs::default(), &mut ui);

        assert!(result.success);
        assert_eq!(order(&temp), vec!["clean", "compile", "build"]);
        assert!(ui.has_success("Success."));
        assert_eq!(ui.headers(), ["Building kraken".to_string()]);
    }

    #[test]
    fn failing_step_stops_the_run() {
        let temp = setup_project(
            r#"
steps:
  macos-dylib-clean:
    command: echo clean >> order.txt
  compile-polyfill:
    command: echo compile >> order.txt; echo polyfill broke >&2; exit 3
  build-darwin-kraken-lib:
    command: echo build >> order.txt
"#,
        );
        let mut ui = MockUI::new();

        let result = run(&temp, RunArgs::default(), &mut ui);

        assert_eq!(result.exit_code, 1);
        assert_eq!(order(&temp), vec!["clean", "compile"]);
        assert!(ui.successes().iter().all(|s| s != "Success."));
        assert!(ui.errors()[0].contains("compile-polyfill"));
        assert_eq!(ui.error_blocks().len(), 1);
        assert!(ui.error_blocks()[0].1.contains("polyfill broke"));
    }

    #[test]
    fn unknown_explicit_step_runs_nothing() {
        let temp = setup_project(KRAKEN);
        let mut ui = MockUI::new();
        let args = RunArgs {
            steps: vec!["macos-dylib-clean".to_string(), "missing-step".to_string()],
            ..Default::default()
        };

        let result = run(&temp, args, &mut ui);

        assert_eq!(result.exit_code, 1);
        assert!(order(&temp).is_empty());
        assert!(ui.has_error("Unknown step: missing-step"));
    }

    #[test]
    fn explicit_steps_override_pipeline() {
        let temp = setup_project(KRAKEN);
        let mut ui = MockUI::new();
        let args = RunArgs {
            steps: vec![
                "build-darwin-kraken-lib".to_string(),
                "macos-dylib-clean".to_string(),
            ],
            ..Default::default()
        };

        let result = run(&temp, args, &mut ui);

        assert!(result.success);
        assert_eq!(order(&temp), vec!["build", "clean"]);
    }

    #[test]
    fn configured_pipeline_is_used() {
        let temp = setup_project(&format!(
            "{}pipelines:\n  polyfill:\n    steps: [compile-polyfill]\n",
            KRAKEN
        ));
        let mut ui = MockUI::new();
        let args = RunArgs {
            pipeline: "polyfill".to_string(),
            ..Default::default()
        };

        let result = run(&temp, args, &mut ui);

        assert!(result.success);
        assert_eq!(order(&temp), vec!["compile"]);
    }

    #[test]
    fn unknown_pipeline_is_error() {
        let temp = setup_project(KRAKEN);
        let mut ui = MockUI::new();
        let args = RunArgs {
            pipeline: "nope".to_string(),
            ..Default::default()
        };

        let result = run(&temp, args, &mut ui);

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Unknown pipeline: nope"));
    }

    #[test]
    fn dry_run_executes_nothing() {
        let temp = setup_project(KRAKEN);
        let mut ui = MockUI::new();
        let args = RunArgs {
            dry_run: true,
            ..Default::default()
        };

        let result = run(&temp, args, &mut ui);

        assert!(result.success);
        assert!(order(&temp).is_empty());
        assert_eq!(ui.steps().len(), 3);
        assert!(ui
            .messages()
            .iter()
            .any(|m| m.contains("Would run: echo clean >> order.txt")));
    }

    #[test]
    fn normal_mode_uses_spinners() {
        let temp = setup_project(KRAKEN);
        let mut ui = MockUI::new();

        run(&temp, RunArgs::default(), &mut ui);

        assert_eq!(ui.spinners()[0], "[1/3] macos-dylib-clean");
        assert_eq!(ui.spinner_results().len(), 3);
        assert!(ui.spinner_results().iter().all(|(ok, _)| *ok));
    }

    #[test]
    fn config_default_output_applies() {
        let temp = setup_project(&format!(
            "settings:\n  default_output: verbose\n{}",
            KRAKEN
        ));
        let mut ui = MockUI::new();

        run(&temp, RunArgs::default(), &mut ui);

        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert_eq!(ui.steps().len(), 3);
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn invalid_config_is_error() {
        let temp = setup_project("steps:\n  clean:\n    description: no command\n");
        let mut ui = MockUI::new();

        let result = RunCommand::new(temp.path(), None, RunArgs::default()).execute(&mut ui);

        assert!(matches!(
            result,
            Err(BuildseqError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn config_override_loads_that_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("other.yml");
        fs::write(
            &path,
            "steps:\n  only:\n    command: echo only >> order.txt\npipelines:\n  default:\n    steps: [only]\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        let result = RunCommand::new(temp.path(), Some(&path), RunArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(order(&temp), vec!["only"]);
    }
}
