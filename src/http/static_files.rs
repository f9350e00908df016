//! Static route handler.
//!
//! Thin delegation to `tower_http`'s `ServeDir`. The full request path is
//! resolved under the root, so `/assets/app.css` on a location rooted at
//! `/srv/www` reads `/srv/www/assets/app.css`.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// A location bound to a filesystem root.
#[derive(Debug, Clone)]
pub struct StaticRoute {
    prefix: String,
    root: PathBuf,
    files: ServeDir,
}

impl StaticRoute {
    pub fn new(prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            prefix: prefix.into(),
            files: ServeDir::new(&root),
            root,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn handle(&self, request: Request<Body>) -> Response {
        let result: Result<_, Infallible> = self.files.clone().oneshot(request).await;
        match result {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        }
    }
}
