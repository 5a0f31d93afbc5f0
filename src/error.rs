//! Error types for fwtask
//!
//! Domain-specific error types using thiserror. Every error is fatal and
//! user-facing; nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading and lookup errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No project root could be located
    #[error("No {file} found in '{start}' or any parent directory")]
    ProjectNotFound { file: String, start: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Configuration file is not valid YAML for the expected schema
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Project declares no build targets
    #[error("Project declares no targets (proj.targets is empty)")]
    NoTargets,

    /// Board references a toolchain missing from `cmake.toolchains`
    #[error("Toolchain '{name}' is not defined in cmake.toolchains")]
    UnknownToolchain { name: String },

    /// Board references a platform missing from `platforms`
    #[error("Platform '{name}' is not defined in platforms")]
    UnknownPlatform { name: String },

    /// Selected probe has no `probes.<kind>` section
    #[error("Probe '{probe}' has no configuration section (probes.{probe})")]
    MissingProbeConfig { probe: String },

    /// Fixture has no console settings
    #[error("Fixture '{fixture}' has no console definition")]
    MissingConsole { fixture: String },
}

/// Board and build option validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Board is not in the board catalog
    #[error("Invalid board \"{name}\"")]
    InvalidBoard { name: String },

    /// Option is not declared in `proj.options`
    #[error("\"{name}\" not in project options")]
    InvalidOption { name: String },
}

/// Fixture resolution errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FixtureError {
    /// No active fixture configured, or the named one is not defined
    #[error("No fixture defined{}", unknown_fixture_suffix(.name))]
    NoFixture { name: Option<String> },

    /// Neither `--probe` nor the fixture selects a probe
    #[error("Fixture \"{fixture}\" has no probe definition")]
    NoProbe { fixture: String },
}

/// Probe dispatch errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProbeError {
    /// Probe kind is not one of the supported kinds
    #[error("Unsupported probe \"{probe}\"")]
    UnsupportedProbe { probe: String },

    /// Build output the probe driver needs does not exist
    #[error("\"{path}\" does not exist. Run 'fwtask build' first.")]
    MissingArtifact { path: PathBuf },
}

/// External tool invocation errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// Tool could not be found on PATH
    #[error("Required tool '{program}' is not installed or not in PATH")]
    NotFound { program: String },

    /// Tool could not be started
    #[error("Failed to run '{command}': {error}")]
    Spawn { command: String, error: String },

    /// Tool ran and exited unsuccessfully
    #[error("Command '{command}' failed with {}{}", describe_exit(.code), stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Scratch file for a tool could not be prepared
    #[error("Failed to prepare temporary file for '{program}': {error}")]
    TempFile { program: String, error: String },
}

fn unknown_fixture_suffix(name: &Option<String>) -> String {
    name.as_ref()
        .map(|n| format!(" (\"{n}\" is not in user.fixtures)"))
        .unwrap_or_default()
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"))
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}

/// Top-level fwtask error type
#[derive(Error, Debug)]
pub enum FwError {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Fixture error
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Probe error
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// External command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// IO error writing reports
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fixture_message_mentions_name() {
        let unset = FixtureError::NoFixture { name: None };
        assert_eq!(unset.to_string(), "No fixture defined");

        let unknown = FixtureError::NoFixture {
            name: Some("bench".to_string()),
        };
        assert!(unknown.to_string().contains("\"bench\""));
    }

    #[test]
    fn test_command_failed_includes_stderr() {
        let err = CommandError::Failed {
            command: "git config".to_string(),
            code: Some(2),
            stderr: "fatal: bad config".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 2"));
        assert!(msg.contains("fatal: bad config"));
    }

    #[test]
    fn test_validation_converts_into_top_level() {
        let err: FwError = ValidationError::InvalidBoard {
            name: "nope".to_string(),
        }
        .into();
        assert!(matches!(err, FwError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid board \"nope\"");
    }
}
