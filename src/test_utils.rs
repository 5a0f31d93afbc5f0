//! Test utilities
//!
//! A recording [`ProcessRunner`] for asserting which tools an operation
//! would start, plus proptest generators.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::CommandError;
use crate::infra::process::{ProcessOutput, ProcessRunner, ToolCommand};

/// How a recorded command was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Run,
    Output,
    Exec,
}

/// Runner that records commands instead of starting them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<(Invocation, ToolCommand)>>,
    outputs: RefCell<VecDeque<ProcessOutput>>,
    failing_program: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next `output` call
    pub fn with_output(self, output: ProcessOutput) -> Self {
        self.outputs.borrow_mut().push_back(output);
        self
    }

    /// Make every `run` of `program` fail with exit code 1
    pub fn failing(mut self, program: &str) -> Self {
        self.failing_program = Some(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(Invocation, ToolCommand)> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<ToolCommand> {
        self.calls.borrow().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, c)| c.to_string())
            .collect()
    }

    fn record(&self, kind: Invocation, cmd: &ToolCommand) {
        self.calls.borrow_mut().push((kind, cmd.clone()));
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<(), CommandError> {
        self.record(Invocation::Run, cmd);
        if self.failing_program.as_deref() == Some(cmd.program.as_str()) {
            return Err(CommandError::Failed {
                command: cmd.to_string(),
                code: Some(1),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    fn output(&self, cmd: &ToolCommand) -> Result<ProcessOutput, CommandError> {
        self.record(Invocation::Output, cmd);
        Ok(self.outputs.borrow_mut().pop_front().unwrap_or(ProcessOutput {
            code: Some(0),
            ..ProcessOutput::default()
        }))
    }

    fn exec(&self, cmd: &ToolCommand) -> Result<(), CommandError> {
        self.record(Invocation::Exec, cmd);
        Ok(())
    }
}

pub mod generators {
    use proptest::prelude::*;

    /// Generate an option name in CMake cache variable style
    pub fn option_name() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9_]{0,15}"
    }

    /// Generate a board name
    pub fn board_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,20}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use super::*;
    use proptest::prelude::*;
    use std::path::Path;

    #[test]
    fn test_recording_runner_records_in_order() {
        let runner = RecordingRunner::new();
        let root = Path::new(".");
        runner.run(&ToolCommand::new("git", root).arg("status")).unwrap();
        runner.exec(&ToolCommand::new("cmake", root)).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, Invocation::Run);
        assert_eq!(calls[1].0, Invocation::Exec);
        assert_eq!(runner.command_lines(), vec!["git status", "cmake"]);
    }

    #[test]
    fn test_recording_runner_failing_program() {
        let runner = RecordingRunner::new().failing("cmake");
        let root = Path::new(".");
        assert!(runner.run(&ToolCommand::new("git", root)).is_ok());
        assert!(runner.run(&ToolCommand::new("cmake", root)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_option_name_generator(name in option_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        }

        #[test]
        fn test_board_name_generator(name in board_name()) {
            prop_assert!(name.chars().next().is_some_and(|c| c.is_ascii_lowercase()));
        }
    }
}
