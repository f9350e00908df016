//! Per-request proxy errors.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body returned for requests that resolve to no usable target.
pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Failures of a single forwarded request.
///
/// None of these escape the handler: each is logged and turned into a status
/// code for that request only.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream could not be reached (refused, DNS, TLS, reset).
    #[error("upstream request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The upstream did not answer within the client timeout.
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    /// The upstream sent a gzip body that could not be decoded.
    #[error("malformed gzip body from upstream: {0}")]
    Decompression(#[source] std::io::Error),

    /// The computed upstream URL is not a valid absolute URI.
    #[error("invalid upstream url {0:?}")]
    InvalidUpstreamUri(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidUpstreamUri(_) => StatusCode::NOT_FOUND,
            ProxyError::Transport(_) | ProxyError::Timeout(_) | ProxyError::Decompression(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self.status() {
            StatusCode::NOT_FOUND => not_found(),
            status => status.into_response(),
        }
    }
}

/// The fixed 404 response.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}
