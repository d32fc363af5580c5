//! Render tree bundle emitted by the client build.
//!
//! A JSON object mapping handler name to the flat tree that handler produces.
//! Each tree is decoded on its own: a malformed entry only breaks its own
//! handler, while an unreadable file or a document that is not an object is
//! fatal.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::value::RawValue;
use thiserror::Error;

use crate::render::tree::RenderTree;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read tree bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tree bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Decoded trees by handler name; entries that failed to decode hold the
/// reason.
#[derive(Debug, Clone, Default)]
pub struct TreeBundle {
    trees: HashMap<String, Result<RenderTree, String>>,
}

impl TreeBundle {
    pub fn from_json(content: &str) -> Result<Self, BundleError> {
        let raw: HashMap<String, Box<RawValue>> = serde_json::from_str(content)?;

        let trees = raw
            .into_iter()
            .map(|(name, value)| {
                let tree = serde_json::from_str::<RenderTree>(value.get()).map_err(|e| {
                    tracing::error!(handler = %name, error = %e, "Invalid render tree in bundle");
                    format!("invalid render tree: {e}")
                });
                (name, tree)
            })
            .collect();

        Ok(Self { trees })
    }

    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let content = fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of entries that failed to decode.
    pub fn invalid(&self) -> usize {
        self.trees.values().filter(|tree| tree.is_err()).count()
    }

    pub fn into_trees(self) -> impl Iterator<Item = (String, Result<RenderTree, String>)> {
        self.trees.into_iter()
    }
}
