//! CLI implementation for `fwtask configure`
//!
//! Besides configuring, lists the board catalog and the declared build
//! options (`--list-boards`, `--list-options`). Listing never touches the
//! build directory or git.

use std::io::Write;

use anyhow::Result;

use crate::cli::output::{is_json, report_writer};
use crate::core::board::{board_names, option_names};
use crate::core::configure::{configure, ConfigureRequest};
use crate::core::project::Project;
use crate::infra::process::SystemRunner;

/// Parsed `configure` arguments
#[derive(Debug, Clone, Default)]
pub struct ConfigureArgs {
    pub debug: bool,
    pub release: bool,
    pub board: Option<String>,
    pub options: Vec<String>,
    pub list_boards: bool,
    pub list_options: bool,
}

/// Execute the configure command
pub fn execute(project: &Project, args: ConfigureArgs) -> Result<()> {
    if args.list_boards {
        print_list("Supported boards", &board_names(project.config()))?;
        return Ok(());
    }
    if args.list_options {
        print_list("Supported options", &option_names(project.config()))?;
        return Ok(());
    }

    let request = ConfigureRequest {
        debug: args.debug,
        release: args.release,
        board: args.board,
        options: args.options,
    };
    configure(project, &SystemRunner::new(), &request, &mut report_writer())?;
    Ok(())
}

fn print_list(title: &str, names: &[&str]) -> Result<()> {
    if is_json() {
        println!("{}", serde_json::to_string_pretty(names)?);
        return Ok(());
    }

    let mut out = report_writer();
    writeln!(out, "{title}:")?;
    for name in names {
        writeln!(out, "\t{name}")?;
    }
    Ok(())
}
