//! A single listening socket with its own route table.
//!
//! # Responsibilities
//! - Bind to the configured port (plaintext or TLS)
//! - Serve the listener's route table through the Axum app
//! - Apply the read timeout and the 1 MiB size cap to request heads
//! - Expose a handle for graceful shutdown and address discovery
//!
//! # Design Decisions
//! - Certificate loading happens inside `serve`, so a bad certificate fails
//!   this listener only
//! - Cloning a listener shares its shutdown handle and route table

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use hyper_util::server::conn::auto::Builder;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::build_router;
use crate::net::tls::TlsMaterial;
use crate::routing::RouteTable;

/// Largest request head accepted on HTTP/1 connections.
pub const MAX_HEADER_BYTES: usize = 1 << 20;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The socket could not be bound, or the accept loop failed.
    #[error("{name} listener on {addr} failed: {source}")]
    Bind {
        name: &'static str,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Certificate or key could not be loaded.
    #[error("{name} listener could not load TLS material: {source}")]
    Tls {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The listener task panicked or was cancelled.
    #[error("listener task ended abnormally: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Transport of a listener.
#[derive(Debug, Clone)]
pub enum ListenerKind {
    Plain,
    Tls(TlsMaterial),
}

/// One bound socket serving its own routes.
#[derive(Debug, Clone)]
pub struct Listener {
    name: &'static str,
    addr: SocketAddr,
    kind: ListenerKind,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    routes: Arc<RouteTable>,
    handle: Handle,
}

impl Listener {
    /// Plaintext listener on all interfaces at `server.port`.
    pub fn plain(server: &ServerConfig, routes: RouteTable) -> Self {
        Self::new("http", ListenerKind::Plain, server, routes)
    }

    /// TLS listener on all interfaces at `server.port`.
    pub fn tls(server: &ServerConfig, material: TlsMaterial, routes: RouteTable) -> Self {
        Self::new("https", ListenerKind::Tls(material), server, routes)
    }

    fn new(name: &'static str, kind: ListenerKind, server: &ServerConfig, routes: RouteTable) -> Self {
        Self {
            name,
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, server.port)),
            kind,
            read_timeout: server.read_timeout(),
            write_timeout: server.write_timeout(),
            routes: Arc::new(routes),
            handle: Handle::new(),
        }
    }

    /// `"http"` or `"https"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Configured bind address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn kind(&self) -> &ListenerKind {
        &self.kind
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Address actually bound, once the socket is listening.
    ///
    /// Returns `None` if binding failed. Waits forever on a listener that is
    /// never served.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.handle.listening().await
    }

    /// Open connections, in-flight or idle.
    pub fn connection_count(&self) -> usize {
        self.handle.connection_count()
    }

    /// Accept and serve connections until shut down or failed.
    pub async fn serve(&self) -> Result<(), ListenerError> {
        let app = build_router(self.routes.clone(), self.write_timeout).into_make_service();

        tracing::info!(
            listener = self.name,
            address = %self.addr,
            routes = self.routes.len(),
            "Listener starting"
        );

        let served = match &self.kind {
            ListenerKind::Plain => {
                let mut server = axum_server::bind(self.addr).handle(self.handle.clone());
                self.tune(server.http_builder());
                server.serve(app).await
            }
            ListenerKind::Tls(material) => {
                let tls = material.load().await.map_err(|source| ListenerError::Tls {
                    name: self.name,
                    source,
                })?;
                let mut server =
                    axum_server::bind_rustls(self.addr, tls).handle(self.handle.clone());
                self.tune(server.http_builder());
                server.serve(app).await
            }
        };

        served.map_err(|source| ListenerError::Bind {
            name: self.name,
            addr: self.addr,
            source,
        })?;

        tracing::info!(listener = self.name, "Listener stopped");
        Ok(())
    }

    /// Stop accepting, let in-flight requests finish, and force-close
    /// whatever is still open after `deadline`.
    ///
    /// Calling this again, or after the socket is gone, has no effect.
    pub fn graceful_shutdown(&self, deadline: Duration) {
        self.handle.graceful_shutdown(Some(deadline));
    }

    fn tune(&self, builder: &mut Builder<TokioExecutor>) {
        let mut http1 = builder.http1();
        http1.max_buf_size(MAX_HEADER_BYTES);
        if let Some(limit) = self.read_timeout {
            http1.timer(TokioTimer::new()).header_read_timeout(limit);
        }
    }
}
