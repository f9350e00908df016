//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use edge_proxy::config::{ConnectionConfig, LocationConfig, ServerConfig};
use edge_proxy::http::ForwardClient;
use edge_proxy::net::Listener;
use edge_proxy::{ListenerManager, RouteTable};
use flate2::write::GzEncoder;
use flate2::Compression;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve `app` on an ephemeral local port and return its address.
pub async fn start_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Server settings on an ephemeral port.
pub fn ephemeral_server(locations: Vec<LocationConfig>) -> ServerConfig {
    ServerConfig {
        port: 0,
        locations,
        ..ServerConfig::default()
    }
}

/// Plaintext listener with the given locations and default client settings.
pub fn plain_listener(locations: Vec<LocationConfig>) -> Listener {
    plain_listener_with(locations, &ConnectionConfig::default())
}

pub fn plain_listener_with(locations: Vec<LocationConfig>, connection: &ConnectionConfig) -> Listener {
    let client = ForwardClient::new(connection);
    let routes = RouteTable::build(&locations, &client).unwrap();
    Listener::plain(&ephemeral_server(locations), routes)
}

/// A running proxy.
pub struct RunningProxy {
    pub manager: Arc<ListenerManager>,
    pub task: JoinHandle<Result<(), edge_proxy::net::ListenerError>>,
}

impl RunningProxy {
    /// Start `listeners` and wait until the first one is bound.
    pub async fn start(listeners: Vec<Listener>) -> Self {
        let manager = Arc::new(ListenerManager::new(listeners));
        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.start().await })
        };
        Self { manager, task }
    }

    /// Loopback base URL of the named listener.
    pub async fn url(&self, name: &str) -> String {
        let addr = self
            .manager
            .listener(name)
            .expect("listener configured")
            .local_addr()
            .await
            .expect("listener bound");
        format!("http://127.0.0.1:{}", addr.port())
    }
}

/// Start a single plaintext proxy and return it with its base URL.
pub async fn start_proxy(locations: Vec<LocationConfig>) -> (RunningProxy, String) {
    let proxy = RunningProxy::start(vec![plain_listener(locations)]).await;
    let url = proxy.url("http").await;
    (proxy, url)
}

/// HTTP client that talks to the proxy directly.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
