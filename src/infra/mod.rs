//! Infrastructure layer
//!
//! Handles external processes. This module is the only place where tools
//! are started.

pub mod git;
pub mod process;
