//! Default configuration values

/// Project configuration file, also marks the project root
pub const PROJECT_CONFIG_FILE: &str = "fwtask.yaml";

/// Per-user override file, relative to the project root
pub const USER_CONFIG_FILE: &str = "user.yaml";

/// Submodule registry consulted before adding platform submodules
pub const GITMODULES_FILE: &str = ".gitmodules";

/// Default CMake source directory
pub const DEFAULT_SOURCE_DIR: &str = ".";

/// Default CMake build directory
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default build system executable
pub const DEFAULT_CMAKE: &str = "cmake";

/// Default version control executable
pub const DEFAULT_GIT: &str = "git";

/// Default debugger executable
pub const DEFAULT_GDB: &str = "gdb-multiarch";

/// Default ST-Link flashing executable
pub const DEFAULT_ST_FLASH: &str = "st-flash";

/// Default OpenOCD executable
pub const DEFAULT_OPENOCD: &str = "openocd";

/// Default serial terminal executable
pub const DEFAULT_SCREEN: &str = "screen";

/// Terminal type passed to the serial terminal
pub const CONSOLE_TERM: &str = "VT100";

/// Prefix for generated debugger scripts
pub const GDB_SCRIPT_PREFIX: &str = "gdb_";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
