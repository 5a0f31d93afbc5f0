//! CLI implementation for `fwtask clean`

use anyhow::Result;

use crate::cli::output::print_success;
use crate::core::build::clean;
use crate::core::project::Project;
use crate::infra::process::SystemRunner;

/// Execute the clean command
pub fn execute(project: &Project) -> Result<()> {
    clean(project, &SystemRunner::new())?;
    print_success("Build directory cleaned");
    Ok(())
}
