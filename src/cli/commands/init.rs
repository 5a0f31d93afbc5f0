//! CLI implementation for `fwtask init`

use anyhow::Result;

use crate::cli::output::print_success;
use crate::core::project::Project;
use crate::core::submodule::init_submodules;
use crate::infra::process::SystemRunner;

/// Execute the init command
pub fn execute(project: &Project) -> Result<()> {
    init_submodules(project, &SystemRunner::new())?;
    print_success("Submodules are up to date");
    Ok(())
}
