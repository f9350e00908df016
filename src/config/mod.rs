//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON, or TOML by extension)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → startup builds one client + route table per listener section
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Locations are deserialized loosely (`LocationConfig`) and converted into
//!   the strict `Location` variant, so a location naming both or neither
//!   target is a `ConfigError`, not a serde error

pub mod error;
pub mod loader;
pub mod location;
pub mod schema;
pub mod validation;

pub use error::ConfigError;
pub use location::Location;
pub use schema::{
    ConnectionConfig, HttpConfig, HttpsConfig, LocationConfig, ProxyConfig, ServerConfig,
};
