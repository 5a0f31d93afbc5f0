//! Interactive debugger and serial console
//!
//! Both replace the fwtask process with the interactive tool.

use super::config::ConsoleConfig;
use super::fixture::active_fixture;
use super::project::Project;
use crate::config::defaults::CONSOLE_TERM;
use crate::error::{ConfigError, FwError};
use crate::infra::process::{ProcessRunner, ToolCommand};

/// Start an interactive GDB session on `target` (default: first target)
pub fn debug(
    project: &Project,
    runner: &dyn ProcessRunner,
    target: Option<String>,
) -> Result<(), FwError> {
    let config = project.config();
    let target = config.resolve_target(target)?;
    let elf = config.proj.artifact(&target, "elf");

    let cmd = ToolCommand::new(config.tools.gdb.clone(), project.root())
        .arg(elf.display().to_string());
    runner.exec(&cmd)?;
    Ok(())
}

/// Resolve console settings, filling gaps from the active fixture
///
/// The fixture is only consulted when a value is missing.
pub fn resolve_console(
    project: &Project,
    device: Option<String>,
    baud: Option<u32>,
) -> Result<ConsoleConfig, FwError> {
    if let (Some(device), Some(baud)) = (&device, baud) {
        return Ok(ConsoleConfig {
            device: device.clone(),
            baud,
        });
    }

    let fixture = active_fixture(project.config())?;
    let console = fixture
        .definition
        .console
        .as_ref()
        .ok_or_else(|| ConfigError::MissingConsole {
            fixture: fixture.name.to_string(),
        })?;

    Ok(ConsoleConfig {
        device: device.unwrap_or_else(|| console.device.clone()),
        baud: baud.unwrap_or(console.baud),
    })
}

/// Open a serial terminal on the fixture's console
pub fn console(
    project: &Project,
    runner: &dyn ProcessRunner,
    device: Option<String>,
    baud: Option<u32>,
) -> Result<(), FwError> {
    let console = resolve_console(project, device, baud)?;

    let cmd = ToolCommand::new(project.config().tools.screen.clone(), project.root())
        .arg("-T")
        .arg(CONSOLE_TERM)
        .arg(console.device)
        .arg(console.baud.to_string());
    runner.exec(&cmd)?;
    Ok(())
}
