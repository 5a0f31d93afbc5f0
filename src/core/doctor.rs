//! Doctor command logic
//!
//! Checks that the external tools fwtask drives can be found on `PATH`.

use std::path::PathBuf;

use super::config::ToolsConfig;

/// Result of a single tool check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// What the tool is used for
    pub name: String,
    /// Executable looked up
    pub program: String,
    /// Resolved location, `None` if not found
    pub path: Option<PathBuf>,
    /// Suggestion for fixing a missing tool
    pub suggestion: Option<String>,
    /// Whether fwtask is unusable without it
    pub required: bool,
}

impl CheckResult {
    /// Whether the tool was found
    pub fn passed(&self) -> bool {
        self.path.is_some()
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Check if all required tools were found
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(CheckResult::passed)
    }

    /// Check if every tool was found
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed()).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed())
            .collect()
    }
}

fn check_tool(name: &str, program: &str, suggestion: &str, required: bool) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        program: program.to_string(),
        path: which::which(program).ok(),
        suggestion: Some(suggestion.to_string()),
        required,
    }
}

/// Check every configured tool
pub fn run_doctor(tools: &ToolsConfig) -> DoctorReport {
    DoctorReport {
        checks: vec![
            check_tool(
                "Build system",
                &tools.cmake,
                "Install CMake 3.21+ from https://cmake.org/download/ or your package manager",
                true,
            ),
            check_tool(
                "Version control",
                &tools.git,
                "Install Git from https://git-scm.com/ or your package manager",
                true,
            ),
            check_tool(
                "Debugger",
                &tools.gdb,
                "Install gdb-multiarch or set tools.gdb to your cross GDB",
                false,
            ),
            check_tool(
                "ST-Link flasher",
                &tools.st_flash,
                "Install stlink-tools (provides st-flash)",
                false,
            ),
            check_tool(
                "OpenOCD",
                &tools.openocd,
                "Install OpenOCD from https://openocd.org/ or your package manager",
                false,
            ),
            check_tool(
                "Serial terminal",
                &tools.screen,
                "Install GNU screen",
                false,
            ),
        ],
    }
}
