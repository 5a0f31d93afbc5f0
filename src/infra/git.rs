//! Git operations
//!
//! Thin wrappers over the `git` CLI for the submodule handling fwtask
//! needs. Commands run in the project root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::defaults::GITMODULES_FILE;
use crate::error::CommandError;
use crate::infra::process::{ProcessRunner, ToolCommand};

/// `git config --get-regexp` exits with 1 when nothing matches
const GIT_CONFIG_NO_MATCH: i32 = 1;

/// Git submodule operations for one repository
pub struct GitOperations<'a> {
    runner: &'a dyn ProcessRunner,
    git: String,
    work_dir: PathBuf,
}

impl<'a> GitOperations<'a> {
    /// Create a handler running `git` in `work_dir`
    pub fn new(runner: &'a dyn ProcessRunner, git: impl Into<String>, work_dir: &Path) -> Self {
        Self {
            runner,
            git: git.into(),
            work_dir: work_dir.to_path_buf(),
        }
    }

    fn command(&self) -> ToolCommand {
        ToolCommand::new(self.git.clone(), &self.work_dir)
    }

    /// Fetch and update every registered submodule recursively
    pub fn update_submodules(&self) -> Result<(), CommandError> {
        let cmd = self
            .command()
            .args(["submodule", "update", "--init", "--recursive"]);
        self.runner.run(&cmd)
    }

    /// Paths of the submodules registered in `.gitmodules`
    pub fn registered_submodules(&self) -> Result<BTreeSet<String>, CommandError> {
        if !self.work_dir.join(GITMODULES_FILE).exists() {
            tracing::debug!("No {GITMODULES_FILE}, assuming no submodules");
            return Ok(BTreeSet::new());
        }

        let cmd = self
            .command()
            .args(["config", "--file", GITMODULES_FILE, "--get-regexp", "path"]);
        let output = self.runner.output(&cmd)?;

        if output.success() {
            Ok(parse_submodule_paths(&output.stdout))
        } else if output.code == Some(GIT_CONFIG_NO_MATCH) && output.stdout.trim().is_empty() {
            Ok(BTreeSet::new())
        } else {
            Err(output.into_failure(&cmd))
        }
    }

    /// Register `uri` as a shallow submodule at `path`
    pub fn add_shallow_submodule(&self, path: &str, uri: &str) -> Result<(), CommandError> {
        let add = self
            .command()
            .args(["submodule", "add", "--depth", "1", uri, path]);
        self.runner.run(&add)?;

        let shallow = self.command().args([
            "config".to_string(),
            "-f".to_string(),
            GITMODULES_FILE.to_string(),
            format!("submodule.{path}.shallow"),
            "true".to_string(),
        ]);
        self.runner.run(&shallow)
    }
}

/// Extract submodule paths from `git config --get-regexp path` output
///
/// Each line is `submodule.<name>.path <path>`; the last whitespace
/// separated token is the path.
pub fn parse_submodule_paths(stdout: &str) -> BTreeSet<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().last())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingRunner;
    use crate::infra::process::ProcessOutput;
    use tempfile::TempDir;

    #[test]
    fn test_parse_submodule_paths() {
        let stdout = "submodule.libs/cmsis.path libs/cmsis\n\
                      submodule.libs/hal.path libs/hal\n\
                      \n";
        let paths = parse_submodule_paths(stdout);
        assert_eq!(paths.len(), 2);
        assert!(paths.contains("libs/cmsis"));
        assert!(paths.contains("libs/hal"));
    }

    #[test]
    fn test_no_gitmodules_skips_git() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let git = GitOperations::new(&runner, "git", temp.path());

        let paths = git.registered_submodules().unwrap();
        assert!(paths.is_empty());
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn test_no_match_status_is_empty_set() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(GITMODULES_FILE), "").unwrap();
        let runner = RecordingRunner::new().with_output(ProcessOutput {
            code: Some(1),
            ..ProcessOutput::default()
        });
        let git = GitOperations::new(&runner, "git", temp.path());

        assert!(git.registered_submodules().unwrap().is_empty());
    }

    #[test]
    fn test_other_failure_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(GITMODULES_FILE), "").unwrap();
        let runner = RecordingRunner::new().with_output(ProcessOutput {
            code: Some(3),
            stderr: "fatal: bad config line 1".to_string(),
            ..ProcessOutput::default()
        });
        let git = GitOperations::new(&runner, "git", temp.path());

        let err = git.registered_submodules().unwrap_err();
        assert!(matches!(err, CommandError::Failed { code: Some(3), .. }));
    }

    #[test]
    fn test_add_shallow_submodule_commands() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let git = GitOperations::new(&runner, "git", temp.path());

        git.add_shallow_submodule("libs/hal", "https://example.com/hal.git")
            .unwrap();

        let lines = runner.command_lines();
        assert_eq!(
            lines,
            vec![
                "git submodule add --depth 1 https://example.com/hal.git libs/hal",
                "git config -f .gitmodules submodule.libs/hal.shallow true",
            ]
        );
    }
}
