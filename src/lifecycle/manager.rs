//! Listener lifecycle coordination.
//!
//! # Responsibilities
//! - Start every configured listener concurrently
//! - Report how the listeners ended
//! - Drain all listeners on shutdown within a fixed deadline
//!
//! # Design Decisions
//! - Listeners are independent tasks joined by a `JoinSet`; one failing does
//!   not cancel the other, only an explicit `shutdown` stops both
//! - The first failure becomes the result of `start`; every termination is
//!   logged
//! - `shutdown` is idempotent and never fails

use std::time::Duration;

use tokio::task::JoinSet;

use crate::lifecycle::shutdown::{wait_for_drain, SHUTDOWN_DEADLINE};
use crate::net::{Listener, ListenerError};

/// Slack after the drain deadline for force-closed connections to unwind.
const FORCE_CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Owns the plaintext and TLS listeners (zero, one or both).
#[derive(Debug, Default)]
pub struct ListenerManager {
    listeners: Vec<Listener>,
}

impl ListenerManager {
    pub fn new(listeners: Vec<Listener>) -> Self {
        Self { listeners }
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Listener by name (`"http"` or `"https"`).
    pub fn listener(&self, name: &str) -> Option<&Listener> {
        self.listeners.iter().find(|l| l.name() == name)
    }

    /// Run every listener until all of them have terminated.
    ///
    /// Returns the first failure, or `Ok` if every listener shut down cleanly.
    pub async fn start(&self) -> Result<(), ListenerError> {
        let mut tasks = JoinSet::new();
        for listener in &self.listeners {
            let listener = listener.clone();
            tasks.spawn(async move { listener.serve().await });
        }

        let mut outcome = Ok(());
        while let Some(joined) = tasks.join_next().await {
            let result = joined.map_err(ListenerError::from).and_then(|r| r);
            if let Err(e) = &result {
                tracing::error!(error = %e, remaining = tasks.len(), "Listener terminated");
            }
            if outcome.is_ok() {
                outcome = result;
            }
        }
        outcome
    }

    /// Gracefully stop every listener within [`SHUTDOWN_DEADLINE`].
    pub async fn shutdown(&self) {
        self.shutdown_within(SHUTDOWN_DEADLINE).await;
    }

    /// Gracefully stop every listener, force-closing connections still open
    /// after `deadline`.
    pub async fn shutdown_within(&self, deadline: Duration) {
        for listener in &self.listeners {
            tracing::info!(
                listener = listener.name(),
                connections = listener.connection_count(),
                "Draining listener"
            );
            listener.graceful_shutdown(deadline);
        }

        if !wait_for_drain(&self.listeners, deadline + FORCE_CLOSE_GRACE).await {
            tracing::warn!("Connections still open after shutdown deadline");
        }
    }
}
