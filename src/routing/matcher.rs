//! Path pattern matching.
//!
//! # Responsibilities
//! - Match subtree patterns (`/static/`) against any path below them
//! - Match exact patterns (`/health`) against that path only
//!
//! # Design Decisions
//! - Path matching is case-sensitive and works on the raw (undecoded) path
//! - No regex to guarantee O(n) matching

/// A location path interpreted with path-mux rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathPattern {
    /// Pattern ending in `/`: matches every path that starts with it.
    Subtree(String),
    /// Any other pattern: matches exactly.
    Exact(String),
}

impl PathPattern {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.ends_with('/') {
            PathPattern::Subtree(path)
        } else {
            PathPattern::Exact(path)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PathPattern::Subtree(p) | PathPattern::Exact(p) => p,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Subtree(prefix) => path.starts_with(prefix.as_str()),
            PathPattern::Exact(exact) => path == exact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_makes_subtree() {
        assert_eq!(PathPattern::new("/api/"), PathPattern::Subtree("/api/".into()));
        assert_eq!(PathPattern::new("/api"), PathPattern::Exact("/api".into()));
        assert_eq!(PathPattern::new("/"), PathPattern::Subtree("/".into()));
    }

    #[test]
    fn subtree_matches_descendants() {
        let pattern = PathPattern::new("/api/");
        assert!(pattern.matches("/api/"));
        assert!(pattern.matches("/api/v1/users"));
        assert!(!pattern.matches("/api"));
        assert!(!pattern.matches("/apiv2/"));
    }

    #[test]
    fn exact_matches_only_itself() {
        let pattern = PathPattern::new("/health");
        assert!(pattern.matches("/health"));
        assert!(!pattern.matches("/health/"));
        assert!(!pattern.matches("/healthz"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!PathPattern::new("/API/").matches("/api/x"));
    }
}
