//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! accepted connection (plain or TLS)
//!     → server.rs (Axum router, tracing, response-head deadline)
//!     → routing::RouteTable (pattern lookup)
//!     → proxy.rs  (rewrite URL → client.rs → headers.rs / compression.rs)
//!       or static_files.rs (ServeDir)
//!     → response to client
//! ```

pub mod client;
pub mod compression;
pub mod error;
pub mod headers;
pub mod proxy;
pub mod server;
pub mod static_files;

pub use client::ForwardClient;
pub use error::{ProxyError, NOT_FOUND_BODY};
pub use proxy::ProxyRoute;
pub use server::build_router;
pub use static_files::StaticRoute;
