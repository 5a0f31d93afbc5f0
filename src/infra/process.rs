//! External process execution
//!
//! Every tool fwtask drives (cmake, git, gdb, st-flash, openocd, screen)
//! is started through [`ProcessRunner`], so the operations in
//! [`crate::core`] never touch `std::process` directly.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::CommandError;

/// A fully specified external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable name or path
    pub program: String,
    /// Arguments, passed verbatim (no shell)
    pub args: Vec<String>,
    /// Working directory for the tool
    pub current_dir: PathBuf,
}

impl ToolCommand {
    /// Create a command for `program` running in `current_dir`
    pub fn new(program: impl Into<String>, current_dir: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.to_path_buf(),
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn to_std(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&self.args).current_dir(&self.current_dir);
        cmd
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the tool exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn an unsuccessful exit into a [`CommandError::Failed`]
    pub fn into_failure(self, command: &ToolCommand) -> CommandError {
        CommandError::Failed {
            command: command.to_string(),
            code: self.code,
            stderr: self.stderr.trim_end().to_string(),
        }
    }
}

/// Runs external tools
pub trait ProcessRunner {
    /// Run to completion with inherited stdio; non-zero exit is an error
    fn run(&self, cmd: &ToolCommand) -> Result<(), CommandError>;

    /// Run to completion capturing output; the caller judges the exit status
    fn output(&self, cmd: &ToolCommand) -> Result<ProcessOutput, CommandError>;

    /// Replace the current process with the tool
    ///
    /// On success the system runner never returns: the tool's exit code
    /// becomes fwtask's exit code.
    fn exec(&self, cmd: &ToolCommand) -> Result<(), CommandError>;
}

/// [`ProcessRunner`] backed by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }

    /// Locate the executable; relative paths are taken from the tool's working directory
    fn resolve(cmd: &ToolCommand) -> Result<PathBuf, CommandError> {
        which::which_in(&cmd.program, std::env::var_os("PATH"), &cmd.current_dir).map_err(|_| {
            CommandError::NotFound {
                program: cmd.program.clone(),
            }
        })
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<(), CommandError> {
        let program = Self::resolve(cmd)?;
        tracing::info!("Running: {cmd}");

        let status = cmd
            .to_std(&program)
            .status()
            .map_err(|e| CommandError::Spawn {
                command: cmd.to_string(),
                error: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            // The tool already wrote its own diagnostics to our stderr
            Err(CommandError::Failed {
                command: cmd.to_string(),
                code: status.code(),
                stderr: String::new(),
            })
        }
    }

    fn output(&self, cmd: &ToolCommand) -> Result<ProcessOutput, CommandError> {
        let program = Self::resolve(cmd)?;
        tracing::debug!("Capturing: {cmd}");

        let output = cmd
            .to_std(&program)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CommandError::Spawn {
                command: cmd.to_string(),
                error: e.to_string(),
            })?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    #[cfg(unix)]
    fn exec(&self, cmd: &ToolCommand) -> Result<(), CommandError> {
        use std::os::unix::process::CommandExt;

        let program = Self::resolve(cmd)?;
        tracing::info!("Executing: {cmd}");

        // Only returns if the exec itself failed
        let err = cmd.to_std(&program).arg0(&cmd.program).exec();
        Err(CommandError::Spawn {
            command: cmd.to_string(),
            error: err.to_string(),
        })
    }

    #[cfg(not(unix))]
    fn exec(&self, cmd: &ToolCommand) -> Result<(), CommandError> {
        let program = Self::resolve(cmd)?;
        tracing::info!("Executing: {cmd}");

        let status = cmd
            .to_std(&program)
            .status()
            .map_err(|e| CommandError::Spawn {
                command: cmd.to_string(),
                error: e.to_string(),
            })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}
