//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every location converts into a checked `Location`
//! - No listener declares the same path twice
//! - The TLS section names its certificate and key
//!
//! # Design Decisions
//! - Fails on the first problem; startup is aborted either way
//! - Validation is a pure function: &ProxyConfig → Result<(), ConfigError>
//! - Route table construction repeats the location checks, so a config built
//!   in code without going through the loader is held to the same rules

use std::collections::HashSet;

use crate::config::error::ConfigError;
use crate::config::location::Location;
use crate::config::schema::{LocationConfig, ProxyConfig};

/// Validate a parsed configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if let Some(http) = &config.http {
        validate_locations(&http.server.locations)?;
    }
    if let Some(https) = &config.https {
        if https.cert_file.as_os_str().is_empty() || https.key_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingTlsMaterial);
        }
        validate_locations(&https.server.locations)?;
    }
    Ok(())
}

/// Check one listener's location list.
pub fn validate_locations(locations: &[LocationConfig]) -> Result<Vec<Location>, ConfigError> {
    let mut seen = HashSet::new();
    let mut checked = Vec::with_capacity(locations.len());
    for config in locations {
        let location = Location::try_from(config)?;
        if !seen.insert(location.path().to_string()) {
            return Err(ConfigError::DuplicatePath {
                path: location.path().to_string(),
            });
        }
        checked.push(location);
    }
    Ok(checked)
}
