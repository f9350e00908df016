//! Axum application for one listener.
//!
//! # Responsibilities
//! - Build the router that dispatches every request through a `RouteTable`
//! - Wire up middleware (tracing, response-head deadline)
//! - Answer unmatched paths with the fixed 404 body

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::http::error::not_found;
use crate::routing::{Dispatch, RouteTable};

/// Build the Axum router for a route table.
///
/// `write_timeout` bounds the time a handler may take to produce its response
/// head; slower requests get 408.
#[allow(deprecated)]
pub fn build_router(routes: Arc<RouteTable>, write_timeout: Option<Duration>) -> Router {
    let router = Router::new().fallback(dispatch).with_state(routes);
    let router = match write_timeout {
        Some(limit) => router.layer(TimeoutLayer::new(limit)),
        None => router,
    };
    router.layer(TraceLayer::new_for_http())
}

/// Look up the route for a request and hand the request to it.
async fn dispatch(State(routes): State<Arc<RouteTable>>, request: Request<Body>) -> Response {
    match routes.lookup(request.uri()) {
        Dispatch::Route(route) => route.handle(request).await,
        Dispatch::Redirect(location) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        Dispatch::NotFound => {
            tracing::debug!(path = %request.uri().path(), "No route matched");
            not_found()
        }
    }
}
