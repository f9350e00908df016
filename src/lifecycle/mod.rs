//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     ProxyConfig → clients + route tables → ListenerManager
//!
//! Run (manager.rs):
//!     start → one task per listener → fan-in on termination
//!
//! Shutdown (signals.rs, shutdown.rs):
//!     SIGTERM/SIGINT → stop accepting → drain (60s) → force-close
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listeners
//! - Shutdown has a fixed deadline: forced close after 60 seconds

pub mod manager;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use manager::ListenerManager;
pub use shutdown::SHUTDOWN_DEADLINE;
pub use signals::shutdown_signal;
pub use startup::build_manager;
