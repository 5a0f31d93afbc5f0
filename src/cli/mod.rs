//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::Commands;

/// fwtask - firmware build and deploy helper
///
/// Configures and builds firmware with CMake, programs it through a debug
/// probe and opens debugger or serial sessions on the attached fixture.
#[derive(Parser, Debug)]
#[command(name = "fwtask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory (default: nearest ancestor containing fwtask.yaml)
    #[arg(short = 'C', long, global = true, env = "FWTASK_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(self.project_dir.as_deref())
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fwtask", "build", "-vv", "-C", "/tmp/proj"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/proj")));
    }

    #[test]
    fn test_repeatable_option_flag() {
        let cli = Cli::try_parse_from([
            "fwtask",
            "configure",
            "--option",
            "LOGGING",
            "--option=TRACE",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Configure { option, .. }) => {
                assert_eq!(option, vec!["LOGGING", "TRACE"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_debug_and_release_together() {
        let cli = Cli::try_parse_from(["fwtask", "configure", "--debug", "--release"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Configure {
                debug: true,
                release: true,
                ..
            })
        ));
    }
}
