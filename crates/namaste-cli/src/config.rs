//! Engine options from an optional TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use namaste_map::MappingOptions;

/// Loads [`MappingOptions`] from `path`, or the defaults when no file is given.
///
/// Fields missing from the file keep their default values; unknown fields are
/// rejected.
pub fn load_options(path: Option<&Path>) -> Result<MappingOptions> {
    let Some(path) = path else {
        return Ok(MappingOptions::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_options(&contents).with_context(|| format!("parse config {}", path.display()))
}

pub fn parse_options(contents: &str) -> Result<MappingOptions> {
    Ok(toml::from_str(contents)?)
}
