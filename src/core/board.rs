//! Board and build option validation
//!
//! Checks requested board names and build options against the catalogs in
//! [`Config`].

use std::collections::BTreeSet;

use super::config::{BoardDefinition, Config};
use crate::error::ValidationError;

/// A board selected from the catalog
#[derive(Debug, Clone, Copy)]
pub struct ResolvedBoard<'a> {
    /// Catalog key
    pub name: &'a str,
    /// Board definition
    pub definition: &'a BoardDefinition,
}

/// Resolve `name`, or the project's default board when omitted
pub fn resolve_board<'a>(
    config: &'a Config,
    name: Option<&'a str>,
) -> Result<ResolvedBoard<'a>, ValidationError> {
    let name = name.unwrap_or(config.proj.board.as_str());

    config
        .boards
        .get_key_value(name)
        .map(|(name, definition)| ResolvedBoard { name, definition })
        .ok_or_else(|| ValidationError::InvalidBoard {
            name: name.to_string(),
        })
}

/// Validate requested options and add the board's mandatory ones
///
/// Fails on the first requested option (in request order) that the project
/// does not declare.
pub fn validate_options(
    config: &Config,
    board: &BoardDefinition,
    requested: &[String],
) -> Result<BTreeSet<String>, ValidationError> {
    if let Some(unknown) = requested
        .iter()
        .find(|opt| !config.proj.options.contains(*opt))
    {
        return Err(ValidationError::InvalidOption {
            name: unknown.clone(),
        });
    }

    Ok(requested
        .iter()
        .chain(board.options.iter())
        .cloned()
        .collect())
}

/// Board names in lexicographic order
pub fn board_names(config: &Config) -> Vec<&str> {
    // BTreeMap keys are already sorted
    config.boards.keys().map(String::as_str).collect()
}

/// Declared project options in lexicographic order
pub fn option_names(config: &Config) -> Vec<&str> {
    config.proj.options.iter().map(String::as_str).collect()
}
