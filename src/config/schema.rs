//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! Durations are whole seconds, and `0` means "no limit".

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the reverse proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Log file path. Empty means stderr.
    pub log: String,

    /// Plaintext listener. Absent means no plaintext listener is started.
    pub http: Option<HttpConfig>,

    /// TLS listener. Absent means no TLS listener is started.
    pub https: Option<HttpsConfig>,
}

/// Plaintext listener section.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(alias = "serverHttp")]
    pub server: ServerConfig,

    pub connection: ConnectionConfig,
}

/// TLS listener section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpsConfig {
    /// PEM certificate chain.
    pub cert_file: PathBuf,

    /// PEM private key.
    pub key_file: PathBuf,

    #[serde(alias = "serverHttp")]
    pub server: ServerConfig,

    pub connection: ConnectionConfig,
}

impl Default for HttpsConfig {
    fn default() -> Self {
        Self {
            cert_file: PathBuf::new(),
            key_file: PathBuf::new(),
            server: ServerConfig {
                port: 443,
                ..ServerConfig::default()
            },
            connection: ConnectionConfig::default(),
        }
    }
}

/// Inbound side of a listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port bound on all interfaces. `0` picks an ephemeral port.
    pub port: u16,

    /// Time allowed to read a request head, in seconds.
    pub read_timeout: u64,

    /// Time allowed to produce a response head, in seconds.
    pub write_timeout: u64,

    /// Ordered location rules.
    #[serde(rename = "location", alias = "locations")]
    pub locations: Vec<LocationConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 80,
            read_timeout: 0,
            write_timeout: 0,
            locations: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        seconds(self.read_timeout)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        seconds(self.write_timeout)
    }
}

/// Outbound client settings for one listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Upstream call timeout in seconds.
    pub timeout: u64,

    /// Idle connections kept per upstream host. `0` means unbounded.
    pub max_idle_conns: usize,

    /// Lifetime of an idle pooled connection in seconds.
    pub idle_conn_timeout: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            max_idle_conns: 100,
            idle_conn_timeout: 90,
        }
    }
}

impl ConnectionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        seconds(self.timeout)
    }

    pub fn idle_conn_timeout(&self) -> Option<Duration> {
        seconds(self.idle_conn_timeout)
    }

    /// Pool size handed to the client; hyper treats `0` as "no pooling".
    pub fn max_idle_per_host(&self) -> usize {
        if self.max_idle_conns == 0 {
            usize::MAX
        } else {
            self.max_idle_conns
        }
    }
}

/// One location rule as written in the config file.
///
/// Exactly one of `destination` and `root` must be set; empty strings count
/// as unset. See [`crate::config::Location`] for the checked form.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LocationConfig {
    /// Path pattern. A trailing `/` makes it a subtree pattern.
    pub path: String,

    /// Upstream base URL for proxy locations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Filesystem root for static locations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl LocationConfig {
    /// A location forwarding `path` to `destination`.
    pub fn proxy(path: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            destination: Some(destination.into()),
            root: None,
        }
    }

    /// A location serving `path` from the directory `root`.
    pub fn static_root(path: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            destination: None,
            root: Some(root.into()),
        }
    }
}

fn seconds(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}
