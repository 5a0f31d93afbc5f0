//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create an empty directory with no project configuration
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with [`SAMPLE_CONFIG`] as its `fwtask.yaml`
    pub fn new() -> Self {
        Self::with_config(SAMPLE_CONFIG)
    }

    /// Create a project with the given `fwtask.yaml`
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.create_file("fwtask.yaml", config);
        project
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Write `user.yaml`
    #[allow(dead_code)]
    pub fn set_user_config(&self, content: &str) {
        self.create_file("user.yaml", content);
    }

    /// Run fwtask with `args` from the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        run_in(self.path(), args)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run fwtask with `args` from `dir`
pub fn run_in(dir: PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fwtask"))
        .current_dir(dir)
        .args(args)
        .env_remove("FWTASK_PROJECT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute fwtask")
}

/// Captured stdout as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Sample project configuration
///
/// `hosted` needs neither a toolchain nor submodules, so configuring it
/// only invokes CMake.
pub const SAMPLE_CONFIG: &str = r#"
proj:
  board: disco
  options: [USE_LOG, USE_TRACE, USE_USB]
  targets: [app, bootloader]
cmake:
  toolchains:
    arm: cmake/arm-none-eabi.cmake
boards:
  disco:
    platform: stm32
    toolchain: arm
    linker_script: ld/disco.ld
    options: [USE_USB]
  hosted:
    platform: hosted
platforms:
  hosted:
  stm32:
    submodules:
      vendor/stm32-hal: https://example.com/stm32-hal.git
probes:
  stlink:
    address: 0x08000000
  blackmagic:
    device: /dev/ttyBmpGdb
    tpwr: true
"#;

/// Per-user settings selecting a fixture programmed over ST-Link
#[allow(dead_code)]
pub const SAMPLE_USER_CONFIG: &str = r#"
user:
  fixture: bench
  fixtures:
    bench:
      probe: stlink
      console:
        device: /dev/ttyUSB0
        baud: 115200
"#;
