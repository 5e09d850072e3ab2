//! Ordered, fail-fast step execution.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{BuildseqError, Result};
use crate::steps::{ExecutionOptions, Step, StepRegistry};

use super::outcome::Outcome;
use super::state::{SequencerState, Transition};

/// Progress events emitted while a run executes.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to start.
    StepStarting {
        name: &'a str,
        summary: Option<String>,
        index: usize,
        total: usize,
    },
    /// A step finished successfully.
    StepFinished { name: &'a str, duration: Duration },
    /// A step failed; the run stops here.
    StepFailed { name: &'a str, duration: Duration },
}

/// Runs a list of named steps one at a time, in order, stopping at the
/// first failure.
///
/// Every name is resolved against the registry before the first step runs,
/// so an unknown name fails the run without executing anything.
///
/// # Example
///
/// ```
/// use buildseq::runner::{Outcome, Sequencer};
/// use buildseq::steps::{FnStep, StepRegistry};
///
/// let mut registry = StepRegistry::new();
/// registry.register(FnStep::new("clean", |_| Ok(())));
/// registry.register(FnStep::new("build", |_| Ok(())));
///
/// let mut sequencer = Sequencer::new(registry);
/// sequencer.run(&["clean", "build"], |outcome| {
///     assert!(matches!(outcome, Outcome::Success));
/// });
/// ```
#[derive(Debug)]
pub struct Sequencer {
    registry: StepRegistry,
    state: SequencerState,
}

impl Sequencer {
    /// Create a sequencer over an explicit registry.
    pub fn new(registry: StepRegistry) -> Self {
        Self {
            registry,
            state: SequencerState::NotStarted,
        }
    }

    /// The registry steps are resolved against.
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// State of the most recent run.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Run `step_names` in order and hand the outcome to `on_complete`.
    ///
    /// `on_complete` is called exactly once, after the last step succeeds
    /// or as soon as anything fails.
    pub fn run<S: AsRef<str>>(&mut self, step_names: &[S], on_complete: impl FnOnce(Outcome)) {
        self.run_with_progress(
            step_names,
            &ExecutionOptions::default(),
            |_| {},
            on_complete,
        );
    }

    /// Like [`run`](Self::run), with execution options and progress events.
    pub fn run_with_progress<S: AsRef<str>>(
        &mut self,
        step_names: &[S],
        options: &ExecutionOptions,
        on_progress: impl FnMut(RunProgress<'_>),
        on_complete: impl FnOnce(Outcome),
    ) {
        let outcome = self.execute(step_names, options, on_progress);
        on_complete(outcome);
    }

    /// Run `step_names` in order and return the outcome.
    pub fn execute<S: AsRef<str>>(
        &mut self,
        step_names: &[S],
        options: &ExecutionOptions,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Outcome {
        self.state = SequencerState::NotStarted;

        let steps = match resolve_all(&self.registry, step_names) {
            Ok(steps) => steps,
            Err(e) => {
                warn!("Step resolution failed: {}", e);
                self.state = self.state.advance(Transition::ResolutionFailed);
                return Outcome::Failure(e);
            }
        };

        let total = steps.len();
        self.state = self.state.advance(Transition::Start);

        for (index, step) in steps.into_iter().enumerate() {
            let name = step.name();
            debug!("Running step {}/{}: {}", index + 1, total, name);
            on_progress(RunProgress::StepStarting {
                name,
                summary: step.summary(),
                index,
                total,
            });

            let start = Instant::now();
            let result = step.execute(options);
            let duration = start.elapsed();

            match result {
                Ok(()) => {
                    debug!("Step '{}' finished in {:?}", name, duration);
                    self.state = self.state.advance(Transition::StepSucceeded { total });
                    on_progress(RunProgress::StepFinished { name, duration });
                }
                Err(e) => {
                    warn!("Step '{}' failed: {}", name, e);
                    self.state = self.state.advance(Transition::StepFailed);
                    on_progress(RunProgress::StepFailed { name, duration });
                    return Outcome::Failure(e.into());
                }
            }
        }

        Outcome::Success
    }
}

/// Resolve every name up front, failing on an empty list or the first
/// unknown name.
fn resolve_all<'r, S: AsRef<str>>(
    registry: &'r StepRegistry,
    step_names: &[S],
) -> Result<Vec<&'r dyn Step>> {
    if step_names.is_empty() {
        return Err(BuildseqError::EmptyStepList);
    }

    step_names
        .iter()
        .map(|name| registry.resolve(name.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepError;
    use crate::steps::FnStep;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording_step(name: &str, log: &Log) -> FnStep {
        let log = Rc::clone(log);
        let owned = name.to_string();
        FnStep::new(name, move |_| {
            log.borrow_mut().push(owned.clone());
            Ok(())
        })
    }

    fn failing_step(name: &str, log: &Log, message: &'static str) -> FnStep {
        let log = Rc::clone(log);
        let owned = name.to_string();
        FnStep::new(name, move |_| {
            log.borrow_mut().push(owned.clone());
            Err(StepError::Other(anyhow::anyhow!(message)))
        })
    }

    fn registry(log: &Log, failing: Option<&str>) -> StepRegistry {
        let mut registry = StepRegistry::new();
        for name in ["clean", "compile", "build"] {
            if Some(name) == failing {
                registry.register(failing_step(name, log, "E"));
            } else {
                registry.register(recording_step(name, log));
            }
        }
        registry
    }

    #[test]
    fn runs_steps_in_declared_order() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, None));

        let outcome = sequencer.execute(
            &["build", "clean", "compile"],
            &ExecutionOptions::default(),
            |_| {},
        );

        assert!(outcome.is_success());
        assert_eq!(*log.borrow(), vec!["build", "clean", "compile"]);
        assert_eq!(sequencer.state(), SequencerState::Succeeded);
    }

    #[test]
    fn stops_at_first_failure() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, Some("compile")));

        let outcome = sequencer.execute(
            &["clean", "compile", "build"],
            &ExecutionOptions::default(),
            |_| {},
        );

        assert_eq!(*log.borrow(), vec!["clean", "compile"]);
        assert_eq!(outcome.error().map(|e| e.to_string()).as_deref(), Some("E"));
        assert_eq!(sequencer.state(), SequencerState::Failed);
    }

    #[test]
    fn unknown_name_fails_before_any_step_runs() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, None));

        let outcome = sequencer.execute(
            &["clean", "missing-step"],
            &ExecutionOptions::default(),
            |_| {},
        );

        assert!(log.borrow().is_empty());
        assert!(matches!(
            outcome.error(),
            Some(BuildseqError::UnknownStep { name }) if name == "missing-step"
        ));
        assert_eq!(sequencer.state(), SequencerState::Failed);
    }

    #[test]
    fn first_unknown_name_is_reported() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, None));

        let outcome = sequencer.execute(
            &["nope-1", "clean", "nope-2"],
            &ExecutionOptions::default(),
            |_| {},
        );

        assert!(matches!(
            outcome.error(),
            Some(BuildseqError::UnknownStep { name }) if name == "nope-1"
        ));
    }

    #[test]
    fn empty_list_is_resolution_error() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, None));
        let names: [&str; 0] = [];

        let outcome = sequencer.execute(&names, &ExecutionOptions::default(), |_| {});

        assert!(matches!(outcome.error(), Some(BuildseqError::EmptyStepList)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn run_calls_on_complete_exactly_once() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, None));
        let mut calls = 0;

        sequencer.run(&["clean", "compile", "build"], |outcome| {
            calls += 1;
            assert!(outcome.is_success());
        });

        assert_eq!(calls, 1);
    }

    #[test]
    fn progress_events_bracket_each_step() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, Some("build")));
        let mut events = Vec::new();

        sequencer.run_with_progress(
            &["clean", "build", "compile"],
            &ExecutionOptions::default(),
            |event| {
                events.push(match event {
                    RunProgress::StepStarting {
                        name, index, total, ..
                    } => format!("start {} {}/{}", name, index + 1, total),
                    RunProgress::StepFinished { name, .. } => format!("ok {}", name),
                    RunProgress::StepFailed { name, .. } => format!("fail {}", name),
                })
            },
            |outcome| assert!(!outcome.is_success()),
        );

        assert_eq!(
            events,
            vec!["start clean 1/3", "ok clean", "start build 2/3", "fail build"]
        );
    }

    #[test]
    fn options_reach_every_step() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = StepRegistry::new();
        for name in ["a", "b"] {
            let seen = Rc::clone(&seen);
            registry.register(FnStep::new(name, move |options| {
                seen.borrow_mut().push(options.dry_run);
                Ok(())
            }));
        }
        let mut sequencer = Sequencer::new(registry);
        let options = ExecutionOptions {
            dry_run: true,
            ..Default::default()
        };

        let outcome = sequencer.execute(&["a", "b"], &options, |_| {});

        assert!(outcome.is_success());
        assert_eq!(*seen.borrow(), vec![true, true]);
    }

    #[test]
    fn rerun_resets_state_and_repeats_order() {
        let log = Log::default();
        let mut sequencer = Sequencer::new(registry(&log, None));
        let names = ["clean", "compile", "build"];

        let first = sequencer.execute(&names, &ExecutionOptions::default(), |_| {});
        let second = sequencer.execute(&names, &ExecutionOptions::default(), |_| {});

        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(
            *log.borrow(),
            vec!["clean", "compile", "build", "clean", "compile", "build"]
        );
    }

    #[test]
    fn new_sequencer_is_not_started() {
        let sequencer = Sequencer::new(StepRegistry::new());
        assert_eq!(sequencer.state(), SequencerState::NotStarted);
        assert!(sequencer.registry().is_empty());
    }
}
