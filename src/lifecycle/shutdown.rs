//! Shutdown drain tracking.

use std::time::Duration;

use crate::net::Listener;

/// Deadline for draining a listener before connections are force-closed.
pub const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(60);

/// Poll interval while waiting for connections to close.
const DRAIN_POLL: Duration = Duration::from_millis(100);

/// Wait until none of `listeners` has an open connection, or `deadline`
/// passes. Returns true if everything drained in time.
pub async fn wait_for_drain(listeners: &[Listener], deadline: Duration) -> bool {
    let drained = async {
        while listeners.iter().any(|l| l.connection_count() > 0) {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    };
    tokio::time::timeout(deadline, drained).await.is_ok()
}
