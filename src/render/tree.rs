//! Flat render tree produced by a handler.
//!
//! Nodes reference their parent by id. On the wire a tree is a JSON object
//! keyed by node id:
//!
//! ```json
//! { "a": { "type": "div", "parent": "body", "className": "x", "text": "hi" } }
//! ```
//!
//! Key order is kept; it decides sibling order when the tree is serialized.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Id of the root whose contents become the page body.
pub const BODY_ROOT: &str = "body";

/// Id of the root whose contents become the page head.
pub const HEAD_ROOT: &str = "head";

/// One element of a render tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderNode {
    /// Node id; taken from the map key on the wire.
    #[serde(skip)]
    pub id: String,

    /// Element name, e.g. `div`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, alias = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Text content. Numbers and booleans on the wire are kept as their text.
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl RenderNode {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Insertion-ordered mapping of id to node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTree {
    nodes: Vec<RenderNode>,
    index: HashMap<String, usize>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding only the bare `body` and `head` roots.
    pub fn with_roots() -> Self {
        let mut tree = Self::new();
        tree.insert(RenderNode::new(BODY_ROOT, "body"));
        tree.insert(RenderNode::new(HEAD_ROOT, "head"));
        tree
    }

    /// Insert a node. An existing id is replaced and keeps its position.
    pub fn insert(&mut self, node: RenderNode) {
        match self.index.get(&node.id) {
            Some(&at) => self.nodes[at] = node,
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&RenderNode> {
        self.index.get(id).map(|&at| &self.nodes[at])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<RenderNode> for RenderTree {
    fn from_iter<I: IntoIterator<Item = RenderNode>>(iter: I) -> Self {
        let mut tree = Self::new();
        for node in iter {
            tree.insert(node);
        }
        tree
    }
}

impl Serialize for RenderTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for node in &self.nodes {
            map.serialize_entry(&node.id, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RenderTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = RenderTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of node id to render node")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tree = RenderTree::new();
                while let Some((id, mut node)) = access.next_entry::<String, RenderNode>()? {
                    node.id = id;
                    tree.insert(node);
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}
