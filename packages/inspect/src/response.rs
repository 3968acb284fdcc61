//! Inspection responses and their wire rendering.

use serde::Serialize;

use coordfs_core_store::{Bytes, Format, NodePath};

use crate::builder::{DirectoryListing, LeafContent};

/// The answer to one inspection request.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// Metadata of each child of a directory node.
    Directory(DirectoryListing),
    /// Content of a leaf node.
    Leaf { path: NodePath, content: LeafContent },
    /// The request as a whole failed.
    Failure { message: String },
}

/// A rendered response, ready for a transport to send.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub content_type: Format,
    pub bytes: Bytes,
    /// Write `bytes` as-is instead of through the transport's usual
    /// response writer.
    pub raw: bool,
    /// Leave out the transport's standard response header/envelope.
    pub omit_header: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl Response {
    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failure { .. })
    }

    /// The failure message, for whole-request failures.
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Failure { message } => Some(message),
            _ => None,
        }
    }

    /// Whether the transport should bypass its response wrapping.
    ///
    /// Only non-empty leaf payloads are written raw.
    pub fn is_raw(&self) -> bool {
        matches!(
            self,
            Response::Leaf {
                content: LeafContent::Payload { .. },
                ..
            }
        )
    }

    pub fn content_type(&self) -> Format {
        match self {
            Response::Leaf {
                content: LeafContent::Payload { format, .. },
                ..
            } => format.clone(),
            _ => Format::JSON,
        }
    }

    /// Render into bytes plus transport hints.
    ///
    /// | response | body |
    /// |---|---|
    /// | directory | `{path: {child: stat-or-error}}` |
    /// | empty leaf | `{path: null}` |
    /// | payload | the stored bytes, unchanged |
    /// | failure | `{"error": message}` |
    pub fn into_body(self) -> Result<Body, serde_json::Error> {
        let content_type = self.content_type();
        let raw = self.is_raw();
        let bytes = match self {
            Response::Directory(listing) => Bytes::from(serde_json::to_vec(&listing)?),
            Response::Leaf {
                content: LeafContent::Payload { bytes, .. },
                ..
            } => bytes,
            Response::Leaf {
                path,
                content: LeafContent::Empty,
            } => {
                let mut map = serde_json::Map::with_capacity(1);
                map.insert(path.into_string(), serde_json::Value::Null);
                Bytes::from(serde_json::to_vec(&map)?)
            }
            Response::Failure { message } => {
                Bytes::from(serde_json::to_vec(&ErrorBody { error: &message })?)
            }
        };

        Ok(Body {
            content_type,
            bytes,
            raw,
            omit_header: raw,
        })
    }
}
