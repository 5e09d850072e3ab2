//! Reporting a finished run to the user.

use crate::error::StepError;
use crate::runner::Outcome;

use super::UserInterface;

/// Printed when every step succeeded.
pub const SUCCESS_MESSAGE: &str = "Success.";

/// Show the outcome of a run and return the process exit code.
///
/// Success prints [`SUCCESS_MESSAGE`] and returns 0. Failure prints the
/// error exactly as it displays and returns 1; a failed command's captured
/// stderr is shown below it.
pub fn report_outcome(ui: &mut dyn UserInterface, outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Success => {
            ui.success(SUCCESS_MESSAGE);
            0
        }
        Outcome::Failure(e) => {
            ui.error(&e.to_string());
            if let Some(StepError::CommandFailed {
                command, stderr, ..
            }) = e.as_step_error()
            {
                if !stderr.trim().is_empty() {
                    ui.show_error_block(command, stderr.trim_end());
                }
            }
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildseqError;
    use crate::ui::MockUI;

    #[test]
    fn success_prints_message_and_exits_zero() {
        let mut ui = MockUI::new();
        let code = report_outcome(&mut ui, &Outcome::Success);

        assert_eq!(code, 0);
        assert!(ui.has_success("Success."));
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn failure_prints_error_verbatim() {
        let mut ui = MockUI::new();
        let outcome = Outcome::Failure(StepError::Other(anyhow::anyhow!("E")).into());

        let code = report_outcome(&mut ui, &outcome);

        assert_eq!(code, 1);
        assert!(ui.has_error("E"));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn resolution_failure_exits_nonzero() {
        let mut ui = MockUI::new();
        let outcome = Outcome::Failure(BuildseqError::UnknownStep {
            name: "missing-step".to_string(),
        });

        assert_eq!(report_outcome(&mut ui, &outcome), 1);
        assert!(ui.has_error("Unknown step: missing-step"));
    }

    #[test]
    fn command_failure_shows_stderr_block() {
        let mut ui = MockUI::new();
        let outcome = Outcome::Failure(
            StepError::CommandFailed {
                step: "build-darwin-kraken-lib".to_string(),
                command: "make kraken".to_string(),
                code: Some(2),
                stderr: "no rule to make target\n".to_string(),
            }
            .into(),
        );

        report_outcome(&mut ui, &outcome);

        assert_eq!(
            ui.error_blocks(),
            [(
                "make kraken".to_string(),
                "no rule to make target".to_string()
            )]
        );
    }

    #[test]
    fn command_failure_without_stderr_has_no_block() {
        let mut ui = MockUI::new();
        let outcome = Outcome::Failure(
            StepError::CommandFailed {
                step: "clean".to_string(),
                command: "false".to_string(),
                code: Some(1),
                stderr: String::new(),
            }
            .into(),
        );

        report_outcome(&mut ui, &outcome);
        assert!(ui.error_blocks().is_empty());
    }
}
