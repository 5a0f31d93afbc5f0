//! Fixture resolution and configuration report

use std::io::Write;

use super::config::{Config, FixtureDefinition};
use crate::error::{FixtureError, FwError};

/// The fixture selected by `user.fixture`
#[derive(Debug, Clone, Copy)]
pub struct ActiveFixture<'a> {
    pub name: &'a str,
    pub definition: &'a FixtureDefinition,
}

/// Resolve the active fixture
pub fn active_fixture(config: &Config) -> Result<ActiveFixture<'_>, FixtureError> {
    let name = config
        .user
        .fixture
        .as_deref()
        .ok_or(FixtureError::NoFixture { name: None })?;

    config
        .user
        .fixtures
        .get_key_value(name)
        .map(|(name, definition)| ActiveFixture { name, definition })
        .ok_or_else(|| FixtureError::NoFixture {
            name: Some(name.to_string()),
        })
}

/// Print the board, fixture and probe this invocation works with
///
/// A selected fixture must exist in `user.fixtures`.
pub fn report_config(
    config: &Config,
    board: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), FwError> {
    let board = board.unwrap_or(&config.proj.board);
    writeln!(out, "Board:  \t{board}")?;

    if config.user.fixture.is_some() {
        let fixture = active_fixture(config)?;
        writeln!(out, "Fixture:\t{}", fixture.name)?;
        if let Some(probe) = fixture.definition.probe.as_deref() {
            writeln!(out, "Probe:  \t{probe}")?;
        }
    }

    Ok(())
}
