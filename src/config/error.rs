//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or building route tables.
///
/// Every variant is fatal at startup: the proxy never starts serving with a
/// configuration that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the configuration schema.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not valid TOML for the configuration schema.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A location was declared with an empty path.
    #[error("empty location path")]
    EmptyPath,

    /// A location has neither a destination nor a static root.
    #[error("empty destination for location [{path}]")]
    MissingTarget { path: String },

    /// A location sets both a destination and a static root.
    #[error("location [{path}] sets both destination and root")]
    ConflictingTarget { path: String },

    /// A destination is not an absolute http(s) URL.
    #[error("invalid destination {destination:?} for location [{path}]: {reason}")]
    InvalidDestination {
        path: String,
        destination: String,
        reason: String,
    },

    /// Two locations of the same listener share a path.
    #[error("location [{path}] is declared more than once")]
    DuplicatePath { path: String },

    /// The TLS section does not name both a certificate and a key.
    #[error("https section requires both cert_file and key_file")]
    MissingTlsMaterial,
}
