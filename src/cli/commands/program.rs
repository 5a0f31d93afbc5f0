//! CLI implementation for `fwtask program`

use anyhow::Result;

use crate::cli::output::{print_success, report_writer};
use crate::core::probe::program;
use crate::core::project::Project;
use crate::infra::process::SystemRunner;

/// Execute the program command
pub fn execute(project: &Project, probe: Option<&str>, target: Option<String>) -> Result<()> {
    program(project, &SystemRunner::new(), probe, target, &mut report_writer())?;
    print_success("Programming complete");
    Ok(())
}
