//! Proxy route handler.
//!
//! # Responsibilities
//! - Map the matched request onto the upstream URL
//! - Forward method, headers and a streaming body
//! - Relay status, headers and body back, gunzipping when the client did not
//!   ask for gzip
//!
//! # Design Decisions
//! - The handler owns no mutable state; it only reads its route and client
//! - Every failure is logged and answered for this request alone
//! - The upstream response is dropped (and its connection released) on every
//!   path, including early returns

use axum::body::Body;
use axum::http::{header::HOST, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::http::client::ForwardClient;
use crate::http::compression::gunzip;
use crate::http::error::ProxyError;
use crate::http::headers;

/// A location bound to an upstream and the listener's shared client.
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    prefix: String,
    destination: String,
    client: ForwardClient,
}

impl ProxyRoute {
    pub fn new(prefix: impl Into<String>, destination: impl Into<String>, client: ForwardClient) -> Self {
        Self {
            prefix: prefix.into(),
            destination: destination.into(),
            client,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Upstream URI for an inbound request URI, or `None` when the request
    /// does not carry this route's prefix or the result is not absolute.
    pub fn upstream_uri(&self, uri: &Uri) -> Option<Uri> {
        let suffix = uri.path().strip_prefix(self.prefix.as_str())?;
        let url = join_upstream_url(&self.destination, suffix, uri.query());
        url.parse::<Uri>()
            .ok()
            .filter(|u| u.scheme().is_some() && u.authority().is_some())
    }

    /// Forward one request and produce the client response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        match self.forward(request).await {
            Ok(response) => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    destination = %self.destination,
                    status = %response.status(),
                    "Proxied request"
                );
                response
            }
            Err(e) => {
                tracing::error!(
                    method = %method,
                    path = %path,
                    destination = %self.destination,
                    error = %e,
                    "Upstream error"
                );
                e.into_response()
            }
        }
    }

    async fn forward(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let upstream_uri = self
            .upstream_uri(request.uri())
            .ok_or_else(|| ProxyError::InvalidUpstreamUri(request.uri().to_string()))?;

        let (parts, body) = request.into_parts();
        let client_accepts_gzip = headers::client_accepts_gzip(&parts.headers);
        let bodiless = parts.method == Method::HEAD;

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = upstream_uri;
        *outbound.headers_mut() = parts.headers;
        // The client fills Host from the upstream URI.
        outbound.headers_mut().remove(HOST);

        let upstream = self.client.send(outbound).await?;
        let (mut parts, body) = upstream.into_parts();

        let bodiless = bodiless
            || parts.status == StatusCode::NO_CONTENT
            || parts.status == StatusCode::NOT_MODIFIED;
        if bodiless || client_accepts_gzip || !headers::upstream_is_gzip(&parts.headers) {
            return Ok(Response::from_parts(parts, Body::new(body)));
        }

        headers::strip_body_coding(&mut parts.headers);
        let decoded = gunzip(body).await?;
        Ok(Response::from_parts(parts, decoded))
    }
}

/// Join a destination and a path suffix with exactly one `/`, then append the
/// raw query.
///
/// An empty suffix leaves the destination untouched.
pub fn join_upstream_url(destination: &str, suffix: &str, query: Option<&str>) -> String {
    let mut url = String::with_capacity(destination.len() + suffix.len() + 2);
    if suffix.is_empty() {
        url.push_str(destination);
    } else {
        url.push_str(destination.trim_end_matches('/'));
        url.push('/');
        url.push_str(suffix.trim_start_matches('/'));
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}
