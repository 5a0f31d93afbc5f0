//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod configure;
pub mod console;
pub mod debug;
pub mod doctor;
pub mod init;
pub mod program;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output::diagnostic_writer;
use crate::core::config::find_project_root;
use crate::core::project::Project;
use crate::error::FwError;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and update git submodules recursively
    Init,

    /// Run the build system's clean target
    Clean,

    /// Configure the build directory for a board
    Configure {
        /// Debug build (the default)
        #[arg(long)]
        debug: bool,

        /// Release build (with --debug: RelWithDebInfo)
        #[arg(long)]
        release: bool,

        /// Board to configure (default: proj.board)
        #[arg(short, long)]
        board: Option<String>,

        /// Enable a build option (repeatable)
        #[arg(short, long = "option", value_name = "OPT")]
        option: Vec<String>,

        /// List supported boards and exit
        #[arg(long)]
        list_boards: bool,

        /// List supported build options and exit
        #[arg(long)]
        list_options: bool,
    },

    /// Build a target
    Build {
        /// Target to build (default: first of proj.targets)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Program a target onto the fixture through a debug probe
    Program {
        /// Probe to use (blackmagic, stlink, stlink_openocd)
        #[arg(short, long)]
        probe: Option<String>,

        /// Target to program (default: first of proj.targets)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Start an interactive debugger on a target
    Debug {
        /// Target to debug (default: first of proj.targets)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Open a serial console on the fixture
    Console {
        /// Serial device (default: the fixture's console device)
        #[arg(short, long)]
        device: Option<String>,

        /// Baud rate (default: the fixture's console baud)
        #[arg(short, long)]
        baud: Option<u32>,
    },

    /// Check that the external tools are installed
    Doctor,
}

impl Commands {
    /// Execute the command
    pub fn run(self, project_dir: Option<&Path>) -> Result<()> {
        match self {
            Self::Init => init::execute(&load_project(project_dir)?),
            Self::Clean => clean::execute(&load_project(project_dir)?),
            Self::Configure {
                debug,
                release,
                board,
                option,
                list_boards,
                list_options,
            } => {
                let project = load_project(project_dir)?;
                let args = configure::ConfigureArgs {
                    debug,
                    release,
                    board,
                    options: option,
                    list_boards,
                    list_options,
                };
                configure::execute(&project, args)
            }
            Self::Build { target } => build::execute(&load_project(project_dir)?, target),
            Self::Program { probe, target } => {
                program::execute(&load_project(project_dir)?, probe.as_deref(), target)
            }
            Self::Debug { target } => debug::execute(&load_project(project_dir)?, target),
            Self::Console { device, baud } => {
                console::execute(&load_project(project_dir)?, device, baud)
            }
            Self::Doctor => doctor::execute(project_dir),
        }
    }
}

/// Resolve the project root
///
/// An explicit `--project-dir` is used as-is; otherwise the nearest ancestor
/// of the working directory holding `fwtask.yaml`.
pub fn project_root(project_dir: Option<&Path>) -> Result<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Ok(find_project_root(&cwd).map_err(FwError::from)?)
        }
    }
}

fn load_project(project_dir: Option<&Path>) -> Result<Project> {
    let root = project_root(project_dir)?;
    tracing::debug!("Project root: {}", root.display());
    Ok(Project::load(&root, &mut diagnostic_writer())?)
}
