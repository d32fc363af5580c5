//! Write-once render cache.
//!
//! # Responsibilities
//! - Execute every global handler, concatenating their fragments
//! - Execute every route handler, storing one entry per route pattern
//! - Answer path lookups through a precedence-ordered router
//!
//! # Design Decisions
//! - Populated once at startup; no entry is added, removed or changed later
//! - A failed handler leaves no entry, so its route falls back to the template
//! - The first handler that renders successfully owns a pattern; exact and
//!   prefix registrations of the same pattern are distinct routes

use std::collections::HashSet;

use serde::Serialize;

use crate::extract::RouteTable;
use crate::markup::{build_fragment, HtmlFragment};
use crate::observability::metrics;
use crate::render::{execute, HandlerRegistry};
use crate::routing::Router;

/// A pre-rendered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Route pattern with quote characters removed.
    pub pattern: String,
    pub exact: bool,
    /// Handler that produced the fragment.
    pub handler: String,
    pub fragment: HtmlFragment,
}

/// Global fragment plus one entry per rendered route.
#[derive(Debug, Default)]
pub struct RenderCache {
    global: HtmlFragment,
    router: Router<CacheEntry>,
}

impl RenderCache {
    /// Build from already-rendered parts. Entries are given in registration
    /// order.
    pub fn new(global: HtmlFragment, entries: Vec<CacheEntry>) -> Self {
        let router = Router::new(
            entries
                .into_iter()
                .map(|entry| (entry.pattern.clone(), entry.exact, entry)),
        );
        Self { global, router }
    }

    /// Execute and serialize every handler named by `table`.
    pub fn populate(table: &RouteTable, registry: &HandlerRegistry) -> Self {
        let mut global = HtmlFragment::default();
        for name in table.globals() {
            if let Some(tree) = execute(registry, name) {
                global.append(&build_fragment(&tree));
            }
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(table.routes().len());
        for descriptor in table.routes() {
            let pattern = normalize_pattern(&descriptor.route);
            if seen.contains(&(pattern.clone(), descriptor.exact)) {
                tracing::warn!(
                    handler = %descriptor.handler,
                    pattern = %pattern,
                    "Route pattern already registered, ignoring handler"
                );
                continue;
            }

            let Some(tree) = execute(registry, &descriptor.handler) else {
                continue;
            };

            seen.insert((pattern.clone(), descriptor.exact));
            entries.push(CacheEntry {
                pattern,
                exact: descriptor.exact,
                handler: descriptor.handler.clone(),
                fragment: build_fragment(&tree),
            });
        }

        let cache = Self::new(global, entries);
        tracing::info!(
            globals = table.globals().len(),
            routes = table.routes().len(),
            cached = cache.len(),
            "Render cache populated"
        );
        metrics::record_cached_routes(cache.len());
        cache
    }

    /// Fragment shared by every route.
    pub fn global(&self) -> &HtmlFragment {
        &self.global
    }

    /// Entry for `path`, if any route matches.
    pub fn lookup(&self, path: &str) -> Option<&CacheEntry> {
        self.router.lookup(path)
    }

    /// Entries in precedence order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.router.values()
    }

    pub fn len(&self) -> usize {
        self.router.len()
    }

    pub fn is_empty(&self) -> bool {
        self.router.is_empty()
    }
}

/// Cache key for a route pattern.
pub fn normalize_pattern(route: &str) -> String {
    route.chars().filter(|c| !matches!(c, '\'' | '"' | '`')).collect()
}
