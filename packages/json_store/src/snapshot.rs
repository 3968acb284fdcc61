//! Loading an in-memory tree from a JSON snapshot.
//!
//! Snapshot layout:
//!
//! ```text
//! {
//!   "_data": "data of the root node (optional)",
//!   "live_nodes": {
//!     "10.0.0.1:8983_solr": null
//!   },
//!   "clusterprops.json": "{\"urlScheme\":\"https\"}",
//!   "aliases.json": {"_data": {"collection": {}}, "child": "x"}
//! }
//! ```
//!
//! - an object is a node; its keys are child names, except `"_data"`,
//!   which holds the node's own data
//! - a string is a leaf holding those UTF-8 bytes
//! - `null` is a leaf with no data
//! - any other value is a leaf holding its compact JSON text
//!
//! `serde_json` maps keep keys sorted, so siblings are created (and later
//! listed) in lexicographic order.

use std::{fs, path};

use serde_json::Value as JsonValue;
use tracing::debug;

use coordfs_core_store::{Bytes, Error, NodePath, SEPARATOR};

use crate::InMemoryTree;

/// Reserved key holding a node's own data inside an object.
pub const DATA_KEY: &str = "_data";

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {error}")]
    Io {
        path: path::PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot root must be a JSON object")]
    NotAnObject,

    #[error("Store error: {0}")]
    Store(#[from] Error),
}

fn leaf_data(value: &JsonValue) -> Option<Bytes> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(Bytes::from(s.clone())),
        other => Some(Bytes::from(other.to_string())),
    }
}

impl InMemoryTree {
    /// Build a tree from a parsed snapshot.
    pub fn from_json(snapshot: &JsonValue) -> Result<Self, SnapshotError> {
        let JsonValue::Object(root) = snapshot else {
            return Err(SnapshotError::NotAnObject);
        };

        let mut tree = match root.get(DATA_KEY).and_then(leaf_data) {
            Some(data) => InMemoryTree::with_root_data(data),
            None => InMemoryTree::new(),
        };
        tree.fill(&NodePath::root(), root)?;
        Ok(tree)
    }

    /// Read and build a tree from a snapshot file.
    pub fn load(file: &path::Path) -> Result<Self, SnapshotError> {
        debug!("Loading snapshot {}...", file.display());
        let text = fs::read_to_string(file).map_err(|error| SnapshotError::Io {
            path: file.to_path_buf(),
            error,
        })?;
        let snapshot: JsonValue = serde_json::from_str(&text)?;
        let tree = Self::from_json(&snapshot)?;
        debug!(nodes = tree.len(), "snapshot loaded");
        Ok(tree)
    }

    fn fill(
        &mut self,
        parent: &NodePath,
        children: &serde_json::Map<String, JsonValue>,
    ) -> Result<(), Error> {
        for (name, value) in children {
            if name == DATA_KEY {
                continue;
            }
            if name.is_empty() || name.contains(SEPARATOR) {
                return Err(Error::InvalidPath {
                    path: parent.child(name).into_string(),
                    message: format!("child name may not be empty or contain '{}'", SEPARATOR),
                });
            }

            let path = parent.child(name);
            match value {
                JsonValue::Object(grandchildren) => {
                    match grandchildren.get(DATA_KEY).and_then(leaf_data) {
                        Some(data) => self.create(path.clone(), data)?,
                        None => self.create_empty(path.clone())?,
                    };
                    self.fill(&path, grandchildren)?;
                }
                leaf => {
                    match leaf_data(leaf) {
                        Some(data) => self.create(path, data)?,
                        None => self.create_empty(path)?,
                    };
                }
            }
        }
        Ok(())
    }
}
