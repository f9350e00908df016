//! Outbound HTTP(S) client shared by the proxy routes of one listener.
//!
//! # Responsibilities
//! - Hold the idle-connection pool (bounded size, idle expiry)
//! - Speak plain HTTP and HTTPS to upstreams
//! - Bound each upstream call with the configured timeout
//!
//! # Design Decisions
//! - One client per listener, built from that listener's own settings
//! - Cloning is cheap and shares the pool; hyper synchronizes it internally
//! - The timeout covers the response head; body streaming is bounded by the
//!   listener's own timeouts

use std::fmt;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::{TokioExecutor, TokioTimer},
};

use crate::config::ConnectionConfig;
use crate::http::error::ProxyError;

type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Shared forwarding client.
#[derive(Clone)]
pub struct ForwardClient {
    inner: UpstreamClient,
    timeout: Option<Duration>,
}

impl ForwardClient {
    /// Build a client from a listener's connection settings.
    pub fn new(config: &ConnectionConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let inner = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(config.max_idle_per_host())
            .pool_idle_timeout(config.idle_conn_timeout())
            .pool_timer(TokioTimer::new())
            .build(https);

        Self {
            inner,
            timeout: config.timeout(),
        }
    }

    /// Send a request upstream and wait for the response head.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Incoming>, ProxyError> {
        let response = self.inner.request(request);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, response)
                .await
                .map_err(|_| ProxyError::Timeout(limit))?
                .map_err(ProxyError::from),
            None => response.await.map_err(ProxyError::from),
        }
    }
}

impl fmt::Debug for ForwardClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
