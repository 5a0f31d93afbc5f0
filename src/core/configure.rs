//! Build configuration
//!
//! Turns a board and option selection into a CMake configure invocation.
//! Every declared project option is passed as an explicit `on`/`off`
//! cache definition so a stale cache never keeps an option enabled.

use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::path::Path;

use super::board::{resolve_board, validate_options, ResolvedBoard};
use super::config::Config;
use super::fixture::report_config;
use super::project::Project;
use super::submodule::ensure_platform_submodules;
use crate::error::{ConfigError, FwError};
use crate::infra::git::GitOperations;
use crate::infra::process::{ProcessRunner, ToolCommand};

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
}

impl BuildType {
    /// Select the build type from the `--debug`/`--release` flags
    ///
    /// Both flags together select `RelWithDebInfo`; no flag selects `Debug`.
    pub fn from_flags(debug: bool, release: bool) -> Self {
        match (debug, release) {
            (true, true) => Self::RelWithDebInfo,
            (false, true) => Self::Release,
            (_, false) => Self::Debug,
        }
    }

    /// CMake spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configure request from the CLI
#[derive(Debug, Clone, Default)]
pub struct ConfigureRequest {
    /// Debug build
    pub debug: bool,
    /// Release build
    pub release: bool,
    /// Board name, project default when `None`
    pub board: Option<String>,
    /// Requested build options
    pub options: Vec<String>,
}

/// Cache definitions for the option set, sorted
///
/// One `-D<OPT>=on|off` per declared option, plus `-DLINKER_SCRIPT=` when
/// the board has a linker script.
pub fn option_definitions(
    declared: &BTreeSet<String>,
    enabled: &BTreeSet<String>,
    linker_script: Option<&Path>,
) -> Vec<String> {
    let mut defs: Vec<String> = declared
        .iter()
        .map(|opt| {
            let state = if enabled.contains(opt) { "on" } else { "off" };
            format!("-D{opt}={state}")
        })
        .collect();

    if let Some(script) = linker_script {
        defs.push(format!("-DLINKER_SCRIPT={}", script.display()));
    }

    defs.sort();
    defs
}

/// Toolchain file for the board, `None` for hosted builds
pub fn toolchain_file<'a>(
    config: &'a Config,
    board: &ResolvedBoard<'_>,
) -> Result<Option<&'a Path>, ConfigError> {
    let Some(name) = board.definition.toolchain.as_deref() else {
        return Ok(None);
    };

    config
        .cmake
        .toolchains
        .get(name)
        .map(|path| Some(path.as_path()))
        .ok_or_else(|| ConfigError::UnknownToolchain {
            name: name.to_string(),
        })
}

/// Assemble the CMake configure command
pub fn configure_command(
    project: &Project,
    board: &ResolvedBoard<'_>,
    toolchain: Option<&Path>,
    build_type: BuildType,
    definitions: Vec<String>,
) -> ToolCommand {
    let config = project.config();

    let mut cmd = ToolCommand::new(config.tools.cmake.clone(), project.root())
        .arg("-S")
        .arg(config.proj.source_dir.display().to_string())
        .arg("-B")
        .arg(config.proj.build_dir.display().to_string());

    if let Some(toolchain) = toolchain {
        cmd = cmd.arg("--toolchain").arg(toolchain.display().to_string());
    }

    cmd.arg(format!("-DCMAKE_BUILD_TYPE={build_type}"))
        .arg(format!("-DBUILD_BOARD={}", board.name))
        .arg(format!("-DBUILD_PLATFORM={}", board.definition.platform))
        .args(definitions)
}

/// Configure the build directory for a board
pub fn configure(
    project: &Project,
    runner: &dyn ProcessRunner,
    request: &ConfigureRequest,
    out: &mut dyn Write,
) -> Result<(), FwError> {
    let config = project.config();
    let build_type = BuildType::from_flags(request.debug, request.release);

    let board = resolve_board(config, request.board.as_deref())?;
    report_config(config, Some(board.name), out)?;

    let platform = config
        .platforms
        .get(&board.definition.platform)
        .ok_or_else(|| ConfigError::UnknownPlatform {
            name: board.definition.platform.clone(),
        })?;
    let git = GitOperations::new(runner, config.tools.git.clone(), project.root());
    let added = ensure_platform_submodules(&git, platform.as_ref())?;
    if !added.is_empty() {
        tracing::info!("Added {} platform submodule(s)", added.len());
    }

    let toolchain = toolchain_file(config, &board)?;

    let enabled = validate_options(config, board.definition, &request.options)?;
    writeln!(out, "Options:")?;
    for opt in &enabled {
        writeln!(out, "\t{opt}")?;
    }

    let definitions = option_definitions(
        &config.proj.options,
        &enabled,
        board.definition.linker_script.as_deref(),
    );
    let cmd = configure_command(project, &board, toolchain, build_type, definitions);

    tracing::debug!("Configure: {cmd}");
    runner.run(&cmd)?;
    Ok(())
}
