//! Route table types shared by both extraction paths.

use serde::{Deserialize, Serialize};

/// One route-to-handler binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteDescriptor {
    /// Name of the render function bound to the route.
    pub handler: String,

    /// Route pattern, e.g. `/` or `/blog/:slug`.
    pub route: String,

    /// Match the pattern by string equality instead of by prefix.
    #[serde(default = "default_exact")]
    pub exact: bool,
}

fn default_exact() -> bool {
    true
}

impl RouteDescriptor {
    pub fn new(handler: impl Into<String>, route: impl Into<String>, exact: bool) -> Self {
        Self {
            handler: handler.into(),
            route: route.into(),
            exact,
        }
    }
}

/// Routes keyed by handler name plus the ordered global handlers.
///
/// Both lists keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    globals: Vec<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a route. A handler registered twice keeps its original
    /// position and takes the newer pattern.
    pub fn insert_route(&mut self, descriptor: RouteDescriptor) {
        match self
            .routes
            .iter_mut()
            .find(|existing| existing.handler == descriptor.handler)
        {
            Some(existing) => *existing = descriptor,
            None => self.routes.push(descriptor),
        }
    }

    /// Record a global handler; duplicates are ignored.
    pub fn push_global(&mut self, handler: impl Into<String>) {
        let handler = handler.into();
        if !self.globals.contains(&handler) {
            self.globals.push(handler);
        }
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn globals(&self) -> &[String] {
        &self.globals
    }

    /// Look up the route bound to a handler.
    pub fn route_for(&self, handler: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|d| d.handler == handler)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.globals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut table = RouteTable::new();
        table.insert_route(RouteDescriptor::new("home", "/", true));
        table.insert_route(RouteDescriptor::new("about", "/about", true));
        table.insert_route(RouteDescriptor::new("home", "/home", false));

        assert_eq!(
            table.routes(),
            &[
                RouteDescriptor::new("home", "/home", false),
                RouteDescriptor::new("about", "/about", true),
            ]
        );
        assert_eq!(table.route_for("about").map(|d| d.route.as_str()), Some("/about"));
    }

    #[test]
    fn test_globals_are_an_ordered_set() {
        let mut table = RouteTable::new();
        table.push_global("header");
        table.push_global("footer");
        table.push_global("header");

        assert_eq!(table.globals(), &["header".to_string(), "footer".to_string()]);
        assert!(!table.is_empty());
    }
}
