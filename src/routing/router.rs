//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes ordered by precedence
//! - Look up the route for a request path
//! - Return the matched value or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan (acceptable for typical route counts)
//! - Precedence: exact routes, then patterns with more literal segments,
//!   then more segments, then registration order

use crate::routing::matcher::{compile, Matcher};

struct CompiledRoute<T> {
    matcher: Box<dyn Matcher>,
    value: T,
}

/// Precedence-ordered route table.
pub struct Router<T> {
    routes: Vec<CompiledRoute<T>>,
}

impl<T> Router<T> {
    /// Compile `(pattern, exact, value)` triples given in registration order.
    pub fn new<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = (String, bool, T)>,
    {
        let mut routes: Vec<_> = routes
            .into_iter()
            .map(|(pattern, exact, value)| CompiledRoute {
                matcher: compile(&pattern, exact),
                value,
            })
            .collect();

        // Stable: equal specificity keeps registration order.
        routes.sort_by(|a, b| b.matcher.specificity().cmp(&a.matcher.specificity()));

        Self { routes }
    }

    /// First route, in precedence order, that matches `path`.
    pub fn lookup(&self, path: &str) -> Option<&T> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(|route| &route.value)
    }

    /// Values in precedence order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.routes.iter().map(|route| &route.value)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| (&r.matcher, &r.value)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(routes: &[(&str, bool, &'static str)]) -> Router<&'static str> {
        Router::new(
            routes
                .iter()
                .map(|&(pattern, exact, value)| (pattern.to_string(), exact, value)),
        )
    }

    #[test]
    fn test_exact_beats_pattern() {
        let router = router(&[("/", false, "catch-all"), ("/about", true, "about")]);

        assert_eq!(router.lookup("/about"), Some(&"about"));
        assert_eq!(router.lookup("/about/team"), Some(&"catch-all"));
        assert_eq!(router.lookup("/"), Some(&"catch-all"));
    }

    #[test]
    fn test_most_specific_pattern_wins() {
        let router = router(&[
            ("/docs", false, "docs"),
            ("/docs/:page", false, "page"),
            ("/docs/api", false, "api"),
        ]);

        assert_eq!(router.lookup("/docs"), Some(&"docs"));
        assert_eq!(router.lookup("/docs/intro"), Some(&"page"));
        assert_eq!(router.lookup("/docs/api/v1"), Some(&"api"));
        assert_eq!(router.lookup("/blog"), None);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let router = router(&[("/a/:x", false, "first"), ("/a/:y", false, "second")]);
        assert_eq!(router.lookup("/a/1"), Some(&"first"));
        assert_eq!(router.values().copied().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_no_match_is_explicit() {
        let router = router(&[("/", true, "home")]);
        assert_eq!(router.lookup("/missing"), None);
        assert_eq!(router.len(), 1);
        assert!(Router::<()>::default().is_empty());
    }
}
