//! Render handlers and the registry that names them.

use std::collections::HashMap;

use crate::render::bundle::TreeBundle;
use crate::render::context::RenderContext;
use crate::render::tree::RenderTree;

/// Result of a handler call; any error type converts with `?`.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A page or layout render function.
pub trait RenderHandler: Send + Sync {
    fn render(&self, cx: &mut RenderContext) -> HandlerResult;
}

impl<F> RenderHandler for F
where
    F: Fn(&mut RenderContext) -> HandlerResult + Send + Sync,
{
    fn render(&self, cx: &mut RenderContext) -> HandlerResult {
        self(cx)
    }
}

/// A handler that replays a tree emitted by the build.
#[derive(Debug, Clone)]
pub struct StaticTree(pub RenderTree);

impl RenderHandler for StaticTree {
    fn render(&self, cx: &mut RenderContext) -> HandlerResult {
        for node in self.0.iter() {
            cx.insert(node.clone());
        }
        Ok(())
    }
}

/// Stands in for a bundled tree that could not be decoded; every call fails.
#[derive(Debug, Clone)]
pub struct InvalidTree(pub String);

impl RenderHandler for InvalidTree {
    fn render(&self, _cx: &mut RenderContext) -> HandlerResult {
        Err(self.0.clone().into())
    }
}

/// Handlers by name.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn RenderHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure under `name`, replacing any previous handler.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut RenderContext) -> HandlerResult + Send + Sync + 'static,
    {
        self.register_handler(name, handler)
    }

    pub fn register_handler<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: RenderHandler + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Add one [`StaticTree`] handler per bundle entry, or an
    /// [`InvalidTree`] for entries that failed to decode.
    pub fn extend_from_bundle(&mut self, bundle: TreeBundle) -> &mut Self {
        for (name, tree) in bundle.into_trees() {
            match tree {
                Ok(tree) => self.register_handler(name, StaticTree(tree)),
                Err(reason) => self.register_handler(name, InvalidTree(reason)),
            };
        }
        self
    }

    pub fn from_bundle(bundle: TreeBundle) -> Self {
        let mut registry = Self::new();
        registry.extend_from_bundle(bundle);
        registry
    }

    pub fn get(&self, name: &str) -> Option<&dyn RenderHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
