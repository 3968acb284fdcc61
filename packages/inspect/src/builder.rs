//! Response building for directories and leaves.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use coordfs_core_store::{Bytes, CoordinationClient, Error, Format, NodePath, Stat};

/// Outcome of reading one child's metadata.
#[derive(Clone, Debug, PartialEq)]
pub enum ChildResult {
    /// The child's metadata, copied verbatim from the store.
    Ok(Stat),
    /// The stat call failed; carries the failure's message.
    ///
    /// Serializes as `{"error": message}`.
    Failed(String),
}

impl ChildResult {
    pub fn stat(&self) -> Option<&Stat> {
        match self {
            ChildResult::Ok(stat) => Some(stat),
            ChildResult::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChildResult::Failed(_))
    }
}

impl Serialize for ChildResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChildResult::Ok(stat) => stat.serialize(serializer),
            ChildResult::Failed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

/// Metadata of every child of one directory node, in listing order.
///
/// Serializes as `{path: {child: stat-or-error, ...}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryListing {
    pub path: NodePath,
    pub entries: Vec<(String, ChildResult)>,
}

impl DirectoryListing {
    /// Look up a child's entry by name.
    pub fn get(&self, name: &str) -> Option<&ChildResult> {
        self.entries
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, result)| result)
    }

    /// Child names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of children whose stat failed.
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_failed()).count()
    }
}

struct Entries<'a>(&'a [(String, ChildResult)]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, result) in self.0 {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

impl Serialize for DirectoryListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.path.as_str(), &Entries(&self.entries))?;
        map.end()
    }
}

/// What a leaf node holds.
#[derive(Clone, Debug, PartialEq)]
pub enum LeafContent {
    /// No data, or zero-length data.
    Empty,
    /// Non-empty data with the content type picked from its first byte.
    Payload { bytes: Bytes, format: Format },
}

/// Stat every child of `path`, keeping failures inline.
///
/// A child that cannot be stat'ed (including one deleted after it was
/// listed) gets a `ChildResult::Failed` entry under its own name; the
/// remaining children are still read.
pub fn build_directory(
    client: &dyn CoordinationClient,
    path: &NodePath,
    children: Vec<String>,
) -> DirectoryListing {
    let entries = children
        .into_iter()
        .map(|name| {
            let child = path.child(&name);
            let result = match client.stat(&child) {
                Ok(stat) => ChildResult::Ok(stat),
                Err(e) => {
                    warn!(path = %child, error = %e, "child stat failed");
                    ChildResult::Failed(e.to_string())
                }
            };
            (name, result)
        })
        .collect();

    DirectoryListing {
        path: path.clone(),
        entries,
    }
}

/// Read the data of a leaf node.
pub fn build_leaf(client: &dyn CoordinationClient, path: &NodePath) -> Result<LeafContent, Error> {
    match client.get_data(path)? {
        Some(bytes) if !bytes.is_empty() => {
            let format = Format::sniff(&bytes);
            debug!(%path, len = bytes.len(), %format, "leaf payload");
            Ok(LeafContent::Payload { bytes, format })
        }
        _ => {
            debug!(%path, "empty leaf");
            Ok(LeafContent::Empty)
        }
    }
}
