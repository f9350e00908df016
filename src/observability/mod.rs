//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems emit tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer)
//!     → non-blocking writer
//!     → configured log file, or stderr
//! ```
//!
//! # Design Decisions
//! - Per-request spans come from tower-http's TraceLayer on each listener
//! - Upstream failures are logged at error level with method, path and
//!   destination

pub mod logging;
