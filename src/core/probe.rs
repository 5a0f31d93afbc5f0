//! Target programming through a hardware probe
//!
//! Three probes are supported, each driven by its own external tool:
//!
//! - `blackmagic` - Black Magic Probe, via a batch GDB script
//! - `stlink` - ST-Link, via `st-flash` and the raw binary
//! - `stlink_openocd` - ST-Link, via OpenOCD and the ELF image

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use super::config::{BlackmagicConfig, Config, OpenocdConfig, StlinkConfig};
use super::fixture::{active_fixture, report_config};
use super::project::Project;
use crate::config::defaults::GDB_SCRIPT_PREFIX;
use crate::error::{CommandError, ConfigError, FixtureError, FwError, ProbeError};
use crate::infra::process::{ProcessRunner, ToolCommand};

/// Supported probe kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Blackmagic,
    Stlink,
    StlinkOpenocd,
}

impl ProbeKind {
    /// Every kind, in display order
    pub const ALL: [Self; 3] = [Self::Blackmagic, Self::Stlink, Self::StlinkOpenocd];

    /// Name used in configuration and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blackmagic => "blackmagic",
            Self::Stlink => "stlink",
            Self::StlinkOpenocd => "stlink_openocd",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeKind {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ProbeError::UnsupportedProbe {
                probe: s.to_string(),
            })
    }
}

/// A probe together with its configuration section
#[derive(Debug, Clone, PartialEq)]
pub enum Probe<'a> {
    Blackmagic(&'a BlackmagicConfig),
    Stlink(&'a StlinkConfig),
    StlinkOpenocd(&'a OpenocdConfig),
}

impl<'a> Probe<'a> {
    /// Look up the configuration section for `kind`
    pub fn from_config(kind: ProbeKind, config: &'a Config) -> Result<Self, ConfigError> {
        let probes = &config.probes;
        let probe = match kind {
            ProbeKind::Blackmagic => probes.blackmagic.as_ref().map(Self::Blackmagic),
            ProbeKind::Stlink => probes.stlink.as_ref().map(Self::Stlink),
            ProbeKind::StlinkOpenocd => probes.stlink_openocd.as_ref().map(Self::StlinkOpenocd),
        };

        probe.ok_or_else(|| ConfigError::MissingProbeConfig {
            probe: kind.to_string(),
        })
    }

    /// Kind of this probe
    pub fn kind(&self) -> ProbeKind {
        match self {
            Self::Blackmagic(_) => ProbeKind::Blackmagic,
            Self::Stlink(_) => ProbeKind::Stlink,
            Self::StlinkOpenocd(_) => ProbeKind::StlinkOpenocd,
        }
    }
}

/// GDB script that loads the image through a Black Magic Probe
pub fn blackmagic_script(probe: &BlackmagicConfig) -> String {
    let tpwr = if probe.tpwr { "enable" } else { "disable" };
    format!(
        "target extended-remote {device}\n\
         monitor tpwr {tpwr}\n\
         monitor swdp_scan\n\
         attach 1\n\
         load\n\
         kill\n",
        device = probe.device
    )
}

/// Program `target` (default: first project target)
///
/// The fixture is resolved first. An explicit `probe` wins over the
/// fixture's probe.
pub fn program(
    project: &Project,
    runner: &dyn ProcessRunner,
    probe: Option<&str>,
    target: Option<String>,
    out: &mut dyn Write,
) -> Result<(), FwError> {
    let config = project.config();
    report_config(config, None, out)?;

    let fixture = active_fixture(config)?;
    let probe_name = probe
        .or(fixture.definition.probe.as_deref())
        .ok_or_else(|| FixtureError::NoProbe {
            fixture: fixture.name.to_string(),
        })?;

    let target = config.resolve_target(target)?;

    writeln!(out, "Probe: {probe_name}")?;
    let kind: ProbeKind = probe_name.parse()?;
    let probe = Probe::from_config(kind, config)?;
    tracing::info!("Programming '{target}' with {}", probe.kind());

    match probe {
        Probe::Blackmagic(cfg) => program_blackmagic(project, runner, cfg, &target),
        Probe::Stlink(cfg) => program_stlink(project, runner, cfg, &target),
        Probe::StlinkOpenocd(cfg) => program_openocd(project, runner, cfg, &target),
    }
}

fn program_blackmagic(
    project: &Project,
    runner: &dyn ProcessRunner,
    probe: &BlackmagicConfig,
    target: &str,
) -> Result<(), FwError> {
    let elf = project.existing_artifact(target, "elf")?;
    let gdb = &project.config().tools.gdb;

    let temp_error = |e: std::io::Error| CommandError::TempFile {
        program: gdb.clone(),
        error: e.to_string(),
    };

    // Removed when dropped, on every return path
    let mut script = tempfile::Builder::new()
        .prefix(GDB_SCRIPT_PREFIX)
        .tempfile()
        .map_err(temp_error)?;
    script
        .write_all(blackmagic_script(probe).as_bytes())
        .map_err(temp_error)?;
    script.as_file().sync_all().map_err(temp_error)?;

    let cmd = gdb_batch_command(project, &elf, script.path());
    runner.run(&cmd)?;
    Ok(())
}

fn gdb_batch_command(project: &Project, elf: &Path, script: &Path) -> ToolCommand {
    ToolCommand::new(project.config().tools.gdb.clone(), project.root())
        .arg(elf.display().to_string())
        .arg("--batch")
        .arg("-x")
        .arg(script.display().to_string())
}

fn program_stlink(
    project: &Project,
    runner: &dyn ProcessRunner,
    probe: &StlinkConfig,
    target: &str,
) -> Result<(), FwError> {
    let bin = project.existing_artifact(target, "bin")?;

    let cmd = ToolCommand::new(project.config().tools.st_flash.clone(), project.root())
        .arg("write")
        .arg(bin.display().to_string())
        .arg(probe.address.as_str());
    runner.run(&cmd)?;
    Ok(())
}

fn program_openocd(
    project: &Project,
    runner: &dyn ProcessRunner,
    probe: &OpenocdConfig,
    target: &str,
) -> Result<(), FwError> {
    let elf = project.existing_artifact(target, "elf")?;

    let cmd = ToolCommand::new(project.config().tools.openocd.clone(), project.root())
        .arg("-f")
        .arg(probe.board_cfg.as_str())
        .arg("-c")
        .arg(format!("program {} verify reset exit", elf.display()));
    runner.run(&cmd)?;
    Ok(())
}
