//! Buildseq - ordered, fail-fast execution of named build steps.
//!
//! A [`Sequencer`](runner::Sequencer) takes a list of step names, resolves
//! every one against an explicit [`StepRegistry`](steps::StepRegistry),
//! runs them one at a time and reports a single
//! [`Outcome`](runner::Outcome) through a completion handler.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The sequencer and its state machine
//! - [`shell`] - Shell command execution
//! - [`steps`] - Step trait, step kinds, and the registry
//! - [`ui`] - Spinners, terminal output, and outcome reporting
//!
//! # Example
//!
//! ```
//! use buildseq::runner::Sequencer;
//! use buildseq::steps::{FnStep, StepRegistry};
//! use buildseq::ui::{report_outcome, MockUI};
//!
//! let mut registry = StepRegistry::new();
//! registry.register(FnStep::new("macos-dylib-clean", |_| Ok(())));
//! registry.register(FnStep::new("compile-polyfill", |_| Ok(())));
//!
//! let mut ui = MockUI::new();
//! let mut exit_code = 1;
//! Sequencer::new(registry).run(&["macos-dylib-clean", "compile-polyfill"], |outcome| {
//!     exit_code = report_outcome(&mut ui, &outcome);
//! });
//! assert_eq!(exit_code, 0);
//! assert!(ui.has_success("Success."));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{BuildseqError, Result, StepError};
