//! Capability object handed to render handlers.
//!
//! A handler sees only what the context exposes: node emission, an inert
//! event-listener hook, and a console sink that never reaches the process
//! output. Nothing else from the host is reachable during pre-render.

use crate::render::tree::{RenderNode, RenderTree};

/// Per-call rendering context.
#[derive(Debug)]
pub struct RenderContext {
    tree: RenderTree,
    listeners: Vec<String>,
    console: Vec<String>,
}

impl RenderContext {
    /// A fresh context seeded with the `body` and `head` roots.
    pub fn new() -> Self {
        Self {
            tree: RenderTree::with_roots(),
            listeners: Vec::new(),
            console: Vec::new(),
        }
    }

    /// Emit a node. Re-using an id replaces the earlier node.
    pub fn insert(&mut self, node: RenderNode) -> &mut Self {
        self.tree.insert(node);
        self
    }

    /// Register an event listener. Recorded, never invoked.
    pub fn add_event_listener(&mut self, event: impl Into<String>) {
        self.listeners.push(event.into());
    }

    /// Console output from the handler; kept in the context only.
    pub fn console(&mut self, message: impl Into<String>) {
        self.console.push(message.into());
    }

    /// Always true while pre-rendering.
    pub fn hydrating(&self) -> bool {
        true
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn listeners(&self) -> &[String] {
        &self.listeners
    }

    pub fn console_output(&self) -> &[String] {
        &self.console
    }

    pub fn into_tree(self) -> RenderTree {
        self.tree
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
