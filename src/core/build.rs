//! Build and clean
//!
//! `build` hands the terminal to CMake by replacing the fwtask process, so
//! CMake sees a TTY and keeps its colored progress output.

use std::io::Write;

use super::fixture::report_config;
use super::project::Project;
use crate::error::FwError;
use crate::infra::process::{ProcessRunner, ToolCommand};

/// Parallel jobs for a machine with `cpus` usable CPUs
///
/// Leaves one CPU free for the rest of the system, never below one job.
pub fn parallelism(cpus: usize) -> usize {
    cpus.saturating_sub(1).max(1)
}

/// Parallel jobs for this process, honoring its CPU affinity
pub fn default_parallelism() -> usize {
    parallelism(num_cpus::get())
}

/// CMake build command for `target`
pub fn build_command(project: &Project, target: &str, jobs: usize) -> ToolCommand {
    let config = project.config();
    ToolCommand::new(config.tools.cmake.clone(), project.root())
        .arg("--build")
        .arg(config.proj.build_dir.display().to_string())
        .arg("--parallel")
        .arg(jobs.to_string())
        .arg("--target")
        .arg(target)
}

/// Build `target` (default: the first project target)
///
/// With the system runner this does not return on success.
pub fn build(
    project: &Project,
    runner: &dyn ProcessRunner,
    target: Option<String>,
    out: &mut dyn Write,
) -> Result<(), FwError> {
    let config = project.config();
    report_config(config, None, out)?;

    let target = config.resolve_target(target)?;
    let jobs = default_parallelism();
    tracing::info!("Building '{target}' with {jobs} jobs");

    runner.exec(&build_command(project, &target, jobs))?;
    Ok(())
}

/// Run the build system's clean target
pub fn clean(project: &Project, runner: &dyn ProcessRunner) -> Result<(), FwError> {
    let config = project.config();
    let cmd = ToolCommand::new(config.tools.cmake.clone(), project.root())
        .arg("--build")
        .arg(config.proj.build_dir.display().to_string())
        .arg("--target")
        .arg("clean");

    runner.run(&cmd)?;
    Ok(())
}
