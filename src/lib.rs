//! fwtask - task runner for CMake-based embedded firmware projects
//!
//! Configures and builds firmware with CMake, then programs, debugs and
//! talks to target hardware through one of several supported probes.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Operations (configure, build, program, debug, console)
//! - [`infra`] - External process execution and git
//! - [`config`] - Constants and defaults
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
