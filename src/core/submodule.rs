//! Platform submodule management
//!
//! Platforms may declare submodules they need (vendor HALs, CMSIS, ...).
//! Missing ones are registered as shallow submodules before configuring,
//! so contributors only clone what the boards they build actually use.

use super::config::PlatformDefinition;
use super::project::Project;
use crate::error::CommandError;
use crate::infra::git::GitOperations;
use crate::infra::process::ProcessRunner;

/// Fetch and update every submodule of the project, recursively
pub fn init_submodules(project: &Project, runner: &dyn ProcessRunner) -> Result<(), CommandError> {
    GitOperations::new(runner, project.config().tools.git.clone(), project.root())
        .update_submodules()
}

/// Register any submodule `platform` declares that is not yet registered
///
/// Returns the paths that were added; empty means nothing changed. A
/// failing git command aborts the loop and submodules added before it are
/// left in place.
pub fn ensure_platform_submodules(
    git: &GitOperations<'_>,
    platform: Option<&PlatformDefinition>,
) -> Result<Vec<String>, CommandError> {
    let Some(submodules) = platform.and_then(|p| p.submodules.as_ref()) else {
        return Ok(Vec::new());
    };

    let registered = git.registered_submodules()?;

    let mut added = Vec::new();
    for (path, uri) in submodules {
        if registered.contains(path) {
            continue;
        }
        tracing::warn!("Missing submodule: {path}");
        git.add_shallow_submodule(path, uri)?;
        added.push(path.clone());
    }

    Ok(added)
}
