//! Node classification.

use coordfs_core_store::{CoordinationClient, Error, NodePath};
use tracing::debug;

/// How a node is treated for one request.
///
/// Recomputed on every request; another client may add or remove children
/// right after the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The node has at least one child. Names are in store order.
    Directory(Vec<String>),
    /// The node has no children.
    Leaf,
}

impl Classification {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Classification::Leaf)
    }
}

/// Classify the node at `path` by listing its immediate children.
///
/// A failed listing is returned as-is: without the child list there is
/// nothing to classify.
pub fn classify(client: &dyn CoordinationClient, path: &NodePath) -> Result<Classification, Error> {
    let children = client.list_children(path)?;
    if children.is_empty() {
        debug!(%path, "classified as leaf");
        Ok(Classification::Leaf)
    } else {
        debug!(%path, children = children.len(), "classified as directory");
        Ok(Classification::Directory(children))
    }
}
