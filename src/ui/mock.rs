//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use buildseq::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! ui.message("Running default pipeline");
//! ui.success("Success.");
//!
//! assert!(ui.has_message("Running default pipeline"));
//! assert!(ui.has_success("Success."));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<(usize, usize, String)>,
    spinners: Vec<String>,
    spinner_results: Rc<RefCell<Vec<(bool, String)>>>,
    error_blocks: Vec<(String, String)>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Captured step lines as `(current, total, name)`.
    pub fn steps(&self) -> &[(usize, usize, String)] {
        &self.steps
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How spinners finished, as `(succeeded, message)`.
    pub fn spinner_results(&self) -> Vec<(bool, String)> {
        self.spinner_results.borrow().clone()
    }

    /// Captured error blocks as `(command, output)`.
    pub fn error_blocks(&self) -> &[(String, String)] {
        &self.error_blocks
    }

    /// Check if a message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m == msg)
    }

    /// Check if a success message was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m == msg)
    }

    /// Check if a warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m == msg)
    }

    /// Check if an error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m == msg)
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            results: Rc::clone(&self.spinner_results),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str, _summary: &str) {
        self.steps.push((current, total, name.to_string()));
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        self.error_blocks
            .push((command.to_string(), output.to_string()));
    }
}

/// Spinner returned by [`MockUI`]; records how it finished.
#[derive(Debug)]
pub struct MockSpinner {
    results: Rc<RefCell<Vec<(bool, String)>>>,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.results.borrow_mut().push((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.results.borrow_mut().push((false, msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");

        assert!(ui.has_message("hello"));
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert!(!ui.has_error("done"));
    }

    #[test]
    fn records_spinner_results() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("compile-polyfill");
        spinner.finish_error("compile-polyfill failed");

        assert_eq!(ui.spinners(), ["compile-polyfill".to_string()]);
        assert_eq!(
            ui.spinner_results(),
            vec![(false, "compile-polyfill failed".to_string())]
        );
    }

    #[test]
    fn records_steps_and_error_blocks() {
        let mut ui = MockUI::new();
        ui.show_step(1, 3, "macos-dylib-clean", "rm -rf build");
        ui.show_error_block("make", "missing target");

        assert_eq!(ui.steps(), [(1, 3, "macos-dylib-clean".to_string())]);
        assert_eq!(
            ui.error_blocks(),
            [("make".to_string(), "missing target".to_string())]
        );
    }

    #[test]
    fn with_mode_sets_output_mode() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        ui.set_output_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
