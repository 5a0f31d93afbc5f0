//! CLI implementation for `fwtask debug`

use anyhow::Result;

use crate::core::launch::debug;
use crate::core::project::Project;
use crate::infra::process::SystemRunner;

/// Execute the debug command
pub fn execute(project: &Project, target: Option<String>) -> Result<()> {
    debug(project, &SystemRunner::new(), target)?;
    Ok(())
}
