//! Flat render tree → HTML fragment.
//!
//! # Responsibilities
//! - Synthesize opening/closing tags per node
//! - Rebuild parent → children adjacency in discovery order
//! - Serialize the `body` and `head` roots independently, without their own
//!   wrapper tags (the base template already has them)
//!
//! # Design Decisions
//! - Nodes with an unresolvable parent are dropped without error
//! - Values are emitted verbatim; trees come from trusted build output
//! - Each node is emitted at most once, so a malformed tree still terminates

use std::collections::HashMap;

use serde::Serialize;

use crate::render::tree::{RenderNode, RenderTree, BODY_ROOT, HEAD_ROOT};

/// Serialized head and body markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlFragment {
    pub head: String,
    pub body: String,
}

impl HtmlFragment {
    pub fn new(head: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
        }
    }

    /// Append another fragment's head and body to this one.
    pub fn append(&mut self, other: &HtmlFragment) {
        self.head.push_str(&other.head);
        self.body.push_str(&other.body);
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.body.is_empty()
    }
}

/// Build the fragment for a render tree.
pub fn build_fragment(tree: &RenderTree) -> HtmlFragment {
    let builder = TreeBuilder::new(tree);
    HtmlFragment {
        head: builder.contents_of(HEAD_ROOT),
        body: builder.contents_of(BODY_ROOT),
    }
}

struct TreeBuilder<'a> {
    nodes: Vec<&'a RenderNode>,
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> TreeBuilder<'a> {
    fn new(tree: &'a RenderTree) -> Self {
        let nodes: Vec<_> = tree.iter().collect();
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();

        for (at, &node) in nodes.iter().enumerate() {
            match node.parent.as_deref() {
                Some(parent) if parent != node.id && tree.contains(parent) => {
                    children.entry(parent).or_default().push(at);
                }
                _ => {}
            }
        }

        Self { nodes, children }
    }

    /// Root text and serialized children, or empty when the root is absent.
    fn contents_of(&self, root: &str) -> String {
        let Some(at) = self.nodes.iter().position(|n| n.id == root) else {
            return String::new();
        };

        let mut visited = vec![false; self.nodes.len()];
        visited[at] = true;

        let mut out = String::new();
        if let Some(text) = &self.nodes[at].text {
            out.push_str(text);
        }
        self.write_children(root, &mut visited, &mut out);
        out
    }

    fn write_node(&self, at: usize, visited: &mut [bool], out: &mut String) {
        if visited[at] {
            return;
        }
        visited[at] = true;

        let node = self.nodes[at];
        out.push('<');
        out.push_str(&node.kind);
        out.push_str(" class=\"");
        out.push_str(node.class_name.as_deref().unwrap_or(""));
        out.push_str("\" id=\"");
        out.push_str(&node.id);
        out.push_str("\">");
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        self.write_children(&node.id, visited, out);
        out.push_str("</");
        out.push_str(&node.kind);
        out.push('>');
    }

    fn write_children(&self, id: &str, visited: &mut [bool], out: &mut String) {
        if let Some(children) = self.children.get(id) {
            for &child in children {
                self.write_node(child, visited, out);
            }
        }
    }
}
