//! Core operations
//!
//! Each operation takes the loaded [`project::Project`], a
//! [`crate::infra::process::ProcessRunner`] for external tools and, where
//! it reports progress, a writer for user-facing output.
//!
//! # Submodules
//!
//! - [`config`] - `fwtask.yaml`/`user.yaml` schema, loading and merging
//! - [`project`] - Project root plus merged configuration
//! - [`board`] - Board and build option validation
//! - [`fixture`] - Active fixture resolution and configuration report
//! - [`submodule`] - Platform submodule management
//! - [`configure`] - CMake configure step
//! - [`build`] - CMake build and clean
//! - [`probe`] - Target programming through hardware probes
//! - [`launch`] - Debugger and serial console
//! - [`doctor`] - External tool checks

pub mod board;
pub mod build;
pub mod config;
pub mod configure;
pub mod doctor;
pub mod fixture;
pub mod launch;
pub mod probe;
pub mod project;
pub mod submodule;
