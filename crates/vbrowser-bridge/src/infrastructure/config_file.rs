//! Loading [`BridgeConfig`] from a TOML file on disk.

use std::path::Path;

use crate::domain::config::{BridgeConfig, ConfigError};

/// Reads, parses and validates the config file at `path`.
///
/// Unlike a settings store there is no fallback to defaults: the embed URL
/// has no sensible default, so a missing file is an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, and the parse or
/// validation variants of [`BridgeConfig::from_toml_str`] otherwise.
pub fn load_from_path(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    BridgeConfig::from_toml_str(&content)
}
