//! Project configuration
//!
//! Reads `fwtask.yaml` (project, board, platform, probe and fixture
//! catalogs) and merges the optional per-user `user.yaml` on top of it.
//!
//! The override is a separate all-optional record merged field by field:
//! scalar settings replace, catalog maps merge per entry, probe sections
//! replace as a whole.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::{
    DEFAULT_BUILD_DIR, DEFAULT_CMAKE, DEFAULT_GDB, DEFAULT_GIT, DEFAULT_OPENOCD, DEFAULT_SCREEN,
    DEFAULT_SOURCE_DIR, DEFAULT_ST_FLASH, PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
};
use crate::error::ConfigError;

/// Complete, merged configuration for one invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Project settings
    pub proj: ProjectConfig,

    /// CMake settings
    #[serde(default)]
    pub cmake: CmakeConfig,

    /// Board catalog
    #[serde(default)]
    pub boards: BTreeMap<String, BoardDefinition>,

    /// Platform catalog; a null entry declares a platform with no extras
    #[serde(default)]
    pub platforms: BTreeMap<String, Option<PlatformDefinition>>,

    /// Probe settings
    #[serde(default)]
    pub probes: ProbesConfig,

    /// User settings (normally supplied by `user.yaml`)
    #[serde(default)]
    pub user: UserConfig,

    /// External tool executables
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Project settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Default board name
    pub board: String,

    /// Recognized build options
    #[serde(default)]
    pub options: BTreeSet<String>,

    /// Build targets; the first one is the default
    #[serde(default)]
    pub targets: Vec<String>,

    /// CMake source directory
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// CMake build directory
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIR)
}

/// CMake settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CmakeConfig {
    /// Toolchain name to toolchain file
    #[serde(default)]
    pub toolchains: BTreeMap<String, PathBuf>,
}

/// Target hardware definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardDefinition {
    /// Platform (hardware family) name
    pub platform: String,

    /// Toolchain name, absent for hosted builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<String>,

    /// Linker script path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linker_script: Option<PathBuf>,

    /// Build options always enabled for this board
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub options: BTreeSet<String>,
}

/// Hardware family definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlatformDefinition {
    /// Required submodules, path to source URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodules: Option<BTreeMap<String, String>>,
}

/// Per-probe settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProbesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blackmagic: Option<BlackmagicConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stlink: Option<StlinkConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stlink_openocd: Option<OpenocdConfig>,
}

/// Black Magic Probe settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlackmagicConfig {
    /// GDB server device (e.g. `/dev/ttyBmpGdb`)
    pub device: String,

    /// Whether the probe powers the target
    #[serde(default)]
    pub tpwr: bool,
}

/// ST-Link (st-flash) settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StlinkConfig {
    /// Flash base address
    pub address: FlashAddress,
}

/// ST-Link via OpenOCD settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenocdConfig {
    /// OpenOCD board configuration file
    pub board_cfg: String,
}

/// Flash address, written either as a string or as an integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAddress", into = "String")]
pub struct FlashAddress(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAddress {
    Number(u64),
    Text(String),
}

impl From<RawAddress> for FlashAddress {
    fn from(raw: RawAddress) -> Self {
        match raw {
            RawAddress::Number(n) => Self(format!("0x{n:08x}")),
            RawAddress::Text(s) => Self(s),
        }
    }
}

impl From<FlashAddress> for String {
    fn from(address: FlashAddress) -> Self {
        address.0
    }
}

impl FlashAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// User settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserConfig {
    /// Active fixture name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<String>,

    /// Fixture catalog
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fixtures: BTreeMap<String, FixtureDefinition>,
}

/// A hardware test bench
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FixtureDefinition {
    /// Probe kind attached to the bench
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<String>,

    /// Serial console attached to the bench
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleConfig>,
}

/// Serial console settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    /// Serial device path
    pub device: String,

    /// Baud rate
    pub baud: u32,
}

/// External tool executables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    pub cmake: String,
    pub git: String,
    pub gdb: String,
    pub st_flash: String,
    pub openocd: String,
    pub screen: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cmake: DEFAULT_CMAKE.to_string(),
            git: DEFAULT_GIT.to_string(),
            gdb: DEFAULT_GDB.to_string(),
            st_flash: DEFAULT_ST_FLASH.to_string(),
            openocd: DEFAULT_OPENOCD.to_string(),
            screen: DEFAULT_SCREEN.to_string(),
        }
    }
}

/// Per-user override document (`user.yaml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj: Option<ProjectOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmake: Option<CmakeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boards: Option<BTreeMap<String, BoardDefinition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeMap<String, Option<PlatformDefinition>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probes: Option<ProbesConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsOverride>,
}

/// Project settings override
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
}

/// Tool executables override
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmake: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gdb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st_flash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openocd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Config {
    /// Parse from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load the base configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load the base configuration of the project at `project_root`
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::load_from_path(&project_root.join(PROJECT_CONFIG_FILE))
    }

    /// Apply a user override on top of this configuration
    pub fn merge(&mut self, over: ConfigOverride) {
        if let Some(proj) = over.proj {
            replace(&mut self.proj.board, proj.board);
            replace(&mut self.proj.options, proj.options);
            replace(&mut self.proj.targets, proj.targets);
            replace(&mut self.proj.source_dir, proj.source_dir);
            replace(&mut self.proj.build_dir, proj.build_dir);
        }

        if let Some(cmake) = over.cmake {
            self.cmake.toolchains.extend(cmake.toolchains);
        }
        if let Some(boards) = over.boards {
            self.boards.extend(boards);
        }
        if let Some(platforms) = over.platforms {
            self.platforms.extend(platforms);
        }

        if let Some(probes) = over.probes {
            if probes.blackmagic.is_some() {
                self.probes.blackmagic = probes.blackmagic;
            }
            if probes.stlink.is_some() {
                self.probes.stlink = probes.stlink;
            }
            if probes.stlink_openocd.is_some() {
                self.probes.stlink_openocd = probes.stlink_openocd;
            }
        }

        if let Some(user) = over.user {
            if user.fixture.is_some() {
                self.user.fixture = user.fixture;
            }
            self.user.fixtures.extend(user.fixtures);
        }

        if let Some(tools) = over.tools {
            replace(&mut self.tools.cmake, tools.cmake);
            replace(&mut self.tools.git, tools.git);
            replace(&mut self.tools.gdb, tools.gdb);
            replace(&mut self.tools.st_flash, tools.st_flash);
            replace(&mut self.tools.openocd, tools.openocd);
            replace(&mut self.tools.screen, tools.screen);
        }
    }

    /// Resolve an explicit target or fall back to the first declared one
    pub fn resolve_target(&self, target: Option<String>) -> Result<String, ConfigError> {
        match target {
            Some(target) => Ok(target),
            None => self
                .proj
                .targets
                .first()
                .cloned()
                .ok_or(ConfigError::NoTargets),
        }
    }
}

impl ProjectConfig {
    /// Path of a build output, relative to the project root
    pub fn artifact(&self, target: &str, extension: &str) -> PathBuf {
        self.build_dir.join(format!("{target}.{extension}"))
    }
}

impl ConfigOverride {
    /// Parse from a YAML string; an empty document is an empty override
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load an override file, `None` if it does not exist
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_yaml(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })
    }

    /// Load `user.yaml` from the project root, if present
    pub fn load(project_root: &Path) -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(&project_root.join(USER_CONFIG_FILE))
    }

    /// Render back to YAML for diagnostics
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_else(|e| format!("<unprintable override: {e}>"))
    }
}

/// Locate the project root: `start` or its nearest ancestor holding `fwtask.yaml`
pub fn find_project_root(start: &Path) -> Result<PathBuf, ConfigError> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::ProjectNotFound {
            file: PROJECT_CONFIG_FILE.to_string(),
            start: start.to_path_buf(),
        })
}
