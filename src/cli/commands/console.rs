//! CLI implementation for `fwtask console`

use anyhow::Result;

use crate::core::launch::console;
use crate::core::project::Project;
use crate::infra::process::SystemRunner;

/// Execute the console command
pub fn execute(project: &Project, device: Option<String>, baud: Option<u32>) -> Result<()> {
    console(project, &SystemRunner::new(), device, baud)?;
    Ok(())
}
