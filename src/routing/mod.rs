//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (route lookup)
//!     → matcher.rs (subtree / exact pattern checks)
//!     → Return: matched Route, redirect, or NotFound
//!
//! Route Compilation (at startup):
//!     LocationConfig[]
//!     → config::validation (checked Location variants)
//!     → bind proxy routes to the listener's client, static routes to a root
//!     → sort by pattern length, freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - One table per listener; nothing is registered globally
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always matches same route

pub mod matcher;
pub mod router;

pub use matcher::PathPattern;
pub use router::{Dispatch, Route, RouteTable};
