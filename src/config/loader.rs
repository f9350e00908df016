//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::ProxyConfig;

/// Read and parse a configuration file.
///
/// Files ending in `.toml` are parsed as TOML; anything else as JSON.
/// Locations are not checked here; callers run
/// [`validate_config`](crate::config::validation::validate_config) once
/// logging is up, so location errors land in the configured log.
pub fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        parse_toml(&content)
    } else {
        parse_json(&content)
    }
}

pub fn parse_json(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_toml(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}
