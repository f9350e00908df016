//! Checked location rules.

use std::path::PathBuf;

use axum::http::Uri;

use crate::config::error::ConfigError;
use crate::config::schema::LocationConfig;

/// A location whose target is known to be exactly one of upstream or
/// filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Forward matching requests to `destination`.
    Proxy { path: String, destination: String },
    /// Serve matching requests from the directory `root`.
    Static { path: String, root: PathBuf },
}

impl Location {
    pub fn path(&self) -> &str {
        match self {
            Location::Proxy { path, .. } | Location::Static { path, .. } => path,
        }
    }
}

impl TryFrom<&LocationConfig> for Location {
    type Error = ConfigError;

    fn try_from(config: &LocationConfig) -> Result<Self, Self::Error> {
        if config.path.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        let path = config.path.clone();
        let destination = config.destination.as_deref().filter(|d| !d.is_empty());
        let root = config.root.as_ref().filter(|r| !r.as_os_str().is_empty());

        match (destination, root) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTarget { path }),
            (None, None) => Err(ConfigError::MissingTarget { path }),
            (None, Some(root)) => Ok(Location::Static {
                path,
                root: root.clone(),
            }),
            (Some(destination), None) => {
                check_destination(&path, destination)?;
                Ok(Location::Proxy {
                    path,
                    destination: destination.to_string(),
                })
            }
        }
    }
}

fn check_destination(path: &str, destination: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidDestination {
        path: path.to_string(),
        destination: destination.to_string(),
        reason,
    };

    let uri: Uri = destination.parse().map_err(|e| invalid(format!("{e}")))?;
    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme {other:?}"))),
        None => return Err(invalid("missing scheme".to_string())),
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
