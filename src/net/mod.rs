//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop per socket, read timeout)
//!     → tls.rs (certificate loading for the HTTPS listener)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Each listener owns its route table; there is no global router
//! - TLS is optional and handled transparently by axum-server
//! - Connection tracking for shutdown lives in the axum-server handle

pub mod listener;
pub mod tls;

pub use listener::{Listener, ListenerError, ListenerKind};
pub use tls::TlsMaterial;
