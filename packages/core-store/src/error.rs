//! Error types for coordination-store reads.

use crate::path::NodePath;

/// Faults reported by a coordination-store client.
///
/// The `Display` text of each variant is what ends up in `{"error": ...}`
/// bodies, so keep it human-readable.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The path is not acceptable to the store.
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// The node does not exist.
    #[error("no such node: {path}")]
    NoNode { path: NodePath },

    /// A node already exists at the path.
    #[error("node already exists: {path}")]
    NodeExists { path: NodePath },

    /// The node has children and cannot be deleted.
    #[error("node not empty: {path}")]
    NotEmpty { path: NodePath },

    /// Ephemeral nodes cannot have children.
    #[error("ephemeral nodes may not have children: {path}")]
    NoChildrenForEphemerals { path: NodePath },

    /// The client is not allowed to read the node.
    #[error("not authorized to read {path}")]
    NoAuth { path: NodePath },

    /// The connection to the store was lost or never established.
    #[error("connection loss: {message}")]
    ConnectionLoss { message: String },

    /// The store answered with something the client could not interpret.
    #[error("protocol error (status {status}): {message}")]
    Protocol { status: u16, message: String },

    /// Lower-level transport failure.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn other(message: impl Into<String>) -> Self {
        Error::Other {
            message: message.into(),
        }
    }

    /// Whether this fault means the node is missing.
    pub fn is_no_node(&self) -> bool {
        matches!(self, Error::NoNode { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}
