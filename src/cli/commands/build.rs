//! CLI implementation for `fwtask build`

use anyhow::Result;

use crate::cli::output::report_writer;
use crate::core::build::build;
use crate::core::project::Project;
use crate::infra::process::SystemRunner;

/// Execute the build command
///
/// Does not return on success: the build tool replaces this process.
pub fn execute(project: &Project, target: Option<String>) -> Result<()> {
    build(project, &SystemRunner::new(), target, &mut report_writer())?;
    Ok(())
}
