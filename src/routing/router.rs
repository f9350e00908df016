//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Turn a listener's location list into bound routes
//! - Look up the route for a request path
//! - Return a matched route, a trailing-slash redirect, or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - Longest pattern wins; ties cannot happen because duplicates are rejected
//! - O(n) scan over patterns sorted by length (acceptable for typical counts)

use std::cmp::Reverse;

use axum::body::Body;
use axum::http::{Request, Uri};
use axum::response::Response;

use crate::config::validation::validate_locations;
use crate::config::{ConfigError, Location, LocationConfig};
use crate::http::{ForwardClient, ProxyRoute, StaticRoute};
use crate::routing::matcher::PathPattern;

/// The runtime form of a location.
#[derive(Debug, Clone)]
pub enum Route {
    Proxy(ProxyRoute),
    Static(StaticRoute),
}

impl Route {
    pub async fn handle(&self, request: Request<Body>) -> Response {
        match self {
            Route::Proxy(route) => route.handle(request).await,
            Route::Static(route) => route.handle(request).await,
        }
    }
}

/// Outcome of a route lookup.
#[derive(Debug)]
pub enum Dispatch<'a> {
    /// A route owns this path.
    Route(&'a Route),
    /// Only the subtree form of the path is registered; redirect there.
    Redirect(String),
    /// Nothing matches.
    NotFound,
}

#[derive(Debug)]
struct RouteEntry {
    pattern: PathPattern,
    route: Route,
}

/// Routes of one listener.
#[derive(Debug, Default)]
pub struct RouteTable {
    /// Sorted by pattern length, longest first.
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate `locations` and bind each one.
    ///
    /// Proxy routes share `client`; static routes get a file server on their
    /// root.
    pub fn build(locations: &[LocationConfig], client: &ForwardClient) -> Result<Self, ConfigError> {
        let mut entries: Vec<RouteEntry> = validate_locations(locations)?
            .into_iter()
            .map(|location| {
                let pattern = PathPattern::new(location.path());
                let route = match location {
                    Location::Static { path, root } => {
                        tracing::debug!(path = %path, root = %root.display(), "Static route registered");
                        Route::Static(StaticRoute::new(path, root))
                    }
                    Location::Proxy { path, destination } => {
                        tracing::debug!(path = %path, destination = %destination, "Proxy route registered");
                        Route::Proxy(ProxyRoute::new(path, destination, client.clone()))
                    }
                };
                RouteEntry { pattern, route }
            })
            .collect();

        entries.sort_by_key(|e| Reverse(e.pattern.as_str().len()));
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the route for a request URI.
    pub fn lookup(&self, uri: &Uri) -> Dispatch<'_> {
        let path = uri.path();
        if let Some(entry) = self.entries.iter().find(|e| e.pattern.matches(path)) {
            return Dispatch::Route(&entry.route);
        }

        if !path.ends_with('/') {
            let with_slash = format!("{path}/");
            let subtree = PathPattern::Subtree(with_slash);
            if self.entries.iter().any(|e| e.pattern == subtree) {
                let mut location = subtree.as_str().to_string();
                if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
                    location.push('?');
                    location.push_str(query);
                }
                return Dispatch::Redirect(location);
            }
        }

        Dispatch::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;

    fn client() -> ForwardClient {
        ForwardClient::new(&ConnectionConfig::default())
    }

    fn table(locations: &[LocationConfig]) -> RouteTable {
        RouteTable::build(locations, &client()).unwrap()
    }

    fn matched_prefix(table: &RouteTable, uri: &str) -> Option<String> {
        match table.lookup(&uri.parse().unwrap()) {
            Dispatch::Route(Route::Proxy(r)) => Some(r.prefix().to_string()),
            Dispatch::Route(Route::Static(r)) => Some(r.prefix().to_string()),
            _ => None,
        }
    }

    #[test]
    fn build_rejects_empty_path() {
        let err = RouteTable::build(&[LocationConfig::proxy("", "http://a")], &client()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPath));
    }

    #[test]
    fn build_rejects_missing_and_conflicting_targets() {
        let neither = LocationConfig {
            path: "/a/".into(),
            ..LocationConfig::default()
        };
        let both = LocationConfig {
            path: "/b/".into(),
            destination: Some("http://up".into()),
            root: Some("/srv".into()),
        };
        assert!(matches!(
            RouteTable::build(&[neither], &client()),
            Err(ConfigError::MissingTarget { .. })
        ));
        assert!(matches!(
            RouteTable::build(&[both], &client()),
            Err(ConfigError::ConflictingTarget { .. })
        ));
    }

    #[test]
    fn build_binds_both_kinds() {
        let routes = table(&[
            LocationConfig::proxy("/api/", "http://up/svc"),
            LocationConfig::static_root("/", "/srv/www"),
        ]);
        assert_eq!(routes.len(), 2);
        match routes.lookup(&"/index.html".parse().unwrap()) {
            Dispatch::Route(Route::Static(r)) => assert_eq!(r.root(), std::path::Path::new("/srv/www")),
            other => panic!("expected static route, got {other:?}"),
        }
        match routes.lookup(&"/api/x".parse().unwrap()) {
            Dispatch::Route(Route::Proxy(r)) => assert_eq!(r.destination(), "http://up/svc"),
            other => panic!("expected proxy route, got {other:?}"),
        }
    }

    #[test]
    fn longest_pattern_wins() {
        let routes = table(&[
            LocationConfig::proxy("/", "http://root"),
            LocationConfig::proxy("/api/", "http://api"),
            LocationConfig::proxy("/api/v2/", "http://v2"),
        ]);
        assert_eq!(matched_prefix(&routes, "/api/v2/items").as_deref(), Some("/api/v2/"));
        assert_eq!(matched_prefix(&routes, "/api/v1/items").as_deref(), Some("/api/"));
        assert_eq!(matched_prefix(&routes, "/other").as_deref(), Some("/"));
    }

    #[test]
    fn exact_pattern_does_not_cover_children() {
        let routes = table(&[LocationConfig::proxy("/health", "http://up/status")]);
        assert_eq!(matched_prefix(&routes, "/health").as_deref(), Some("/health"));
        assert!(matches!(
            routes.lookup(&"/health/deep".parse().unwrap()),
            Dispatch::NotFound
        ));
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let routes = table(&[LocationConfig::proxy("/api/", "http://up")]);
        assert!(matches!(routes.lookup(&"/nope".parse().unwrap()), Dispatch::NotFound));
        assert!(matches!(RouteTable::default().lookup(&"/".parse().unwrap()), Dispatch::NotFound));
    }

    #[test]
    fn bare_subtree_path_redirects() {
        let routes = table(&[LocationConfig::proxy("/api/", "http://up")]);
        match routes.lookup(&"/api?x=1".parse().unwrap()) {
            Dispatch::Redirect(location) => assert_eq!(location, "/api/?x=1"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }
}
