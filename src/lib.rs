//! Path-routed reverse proxy library.
//!
//! Each listener (plaintext and/or TLS) owns a table of locations. A location
//! either forwards to an upstream base URL or serves files from a directory.
//! Gzip responses are decoded on the way out when the client did not ask for
//! gzip.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use lifecycle::ListenerManager;
pub use routing::RouteTable;
