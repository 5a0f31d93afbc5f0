//! Project context
//!
//! A [`Project`] is the resolved project root plus the merged
//! configuration, loaded once per invocation and passed to every operation.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::config::{Config, ConfigOverride};
use crate::config::defaults::USER_CONFIG_FILE;
use crate::error::FwError;
use crate::error::ProbeError;

/// Loaded project
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Build a project from an already merged configuration
    pub fn new(root: &Path, config: Config) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Load `fwtask.yaml` and merge `user.yaml` on top of it
    ///
    /// The parsed override is echoed to `diagnostics` so the effective
    /// user settings are visible.
    pub fn load(root: &Path, diagnostics: &mut dyn Write) -> Result<Self, FwError> {
        let mut config = Config::load(root)?;

        if let Some(over) = ConfigOverride::load(root)? {
            tracing::debug!("Merging {USER_CONFIG_FILE}");
            writeln!(diagnostics, "{USER_CONFIG_FILE}:")?;
            for line in over.to_yaml().lines() {
                writeln!(diagnostics, "  {line}")?;
            }
            config.merge(over);
        }

        Ok(Self::new(root, config))
    }

    /// Project root; every tool runs here
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Merged configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build output for `target`, checked to exist
    ///
    /// Returns the path relative to the project root, as tools are given it.
    pub fn existing_artifact(&self, target: &str, extension: &str) -> Result<PathBuf, ProbeError> {
        let relative = self.config.proj.artifact(target, extension);
        if self.root.join(&relative).is_file() {
            Ok(relative)
        } else {
            Err(ProbeError::MissingArtifact { path: relative })
        }
    }
}
