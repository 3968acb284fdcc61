//! In-memory coordination tree.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use coordfs_core_store::{Bytes, CoordinationClient, Error, NodePath, Stat, SEPARATOR};

struct Node {
    data: Option<Bytes>,
    stat: Stat,
    /// Child names in creation order.
    children: Vec<String>,
}

impl Node {
    fn new(data: Option<Bytes>, zxid: i64, now: i64, ephemeral_owner: i64) -> Self {
        Node {
            stat: Stat {
                ctime: now,
                czxid: zxid,
                ephemeral_owner,
                mtime: now,
                mzxid: zxid,
                pzxid: zxid,
                data_length: data_length(&data),
                ..Stat::default()
            },
            data,
            children: Vec::new(),
        }
    }
}

fn data_length(data: &Option<Bytes>) -> i32 {
    data.as_ref().map_or(0, |d| d.len() as i32)
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as i64)
}

/// A coordination tree held in memory.
///
/// Keeps the bookkeeping a real store does: every mutation takes the next
/// transaction id, and versions, child versions, `pzxid` and child counts
/// are maintained the same way. Children are listed in creation order.
///
/// Paths must be absolute. Empty segments and trailing separators are
/// ignored, so `/a/b/` and `/a//b` name the same node as `/a/b`.
///
/// # Example
///
/// ```rust
/// use coordfs_memory_store::InMemoryTree;
/// use coordfs_core_store::{CoordinationClient, NodePath};
///
/// let mut tree = InMemoryTree::new();
/// tree.create("/live_nodes", "").unwrap();
/// tree.create_ephemeral("/live_nodes/10.0.0.1:8983_solr", "", 0x72).unwrap();
///
/// let children = tree.list_children(&NodePath::from("/live_nodes")).unwrap();
/// assert_eq!(children, vec!["10.0.0.1:8983_solr"]);
/// ```
pub struct InMemoryTree {
    nodes: BTreeMap<String, Node>,
    last_zxid: i64,
}

impl InMemoryTree {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self::with_root(None)
    }

    /// Create a tree whose root already holds `data`, at version 0.
    pub fn with_root_data(data: impl Into<Bytes>) -> Self {
        Self::with_root(Some(data.into()))
    }

    fn with_root(data: Option<Bytes>) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(SEPARATOR.to_string(), Node::new(data, 0, 0, 0));
        Self {
            nodes,
            last_zxid: 0,
        }
    }

    /// Create a persistent node. The parent must already exist.
    pub fn create(
        &mut self,
        path: impl Into<NodePath>,
        data: impl Into<Bytes>,
    ) -> Result<NodePath, Error> {
        self.insert(&path.into(), Some(data.into()), 0)
    }

    /// Create a persistent node with no data at all.
    pub fn create_empty(&mut self, path: impl Into<NodePath>) -> Result<NodePath, Error> {
        self.insert(&path.into(), None, 0)
    }

    /// Create an ephemeral node owned by `session_id`.
    ///
    /// Ephemeral nodes cannot have children.
    pub fn create_ephemeral(
        &mut self,
        path: impl Into<NodePath>,
        data: impl Into<Bytes>,
        session_id: i64,
    ) -> Result<NodePath, Error> {
        self.insert(&path.into(), Some(data.into()), session_id)
    }

    /// Replace a node's data, bumping its version.
    pub fn set_data(
        &mut self,
        path: impl Into<NodePath>,
        data: impl Into<Bytes>,
    ) -> Result<Stat, Error> {
        let path = path.into();
        let key = Self::key(&path)?;
        if !self.nodes.contains_key(&key) {
            return Err(Error::NoNode { path });
        }

        let zxid = self.next_zxid();
        let node = self.nodes.get_mut(&key).ok_or(Error::NoNode { path })?;
        let data = Some(data.into());
        node.stat.version += 1;
        node.stat.mzxid = zxid;
        node.stat.mtime = now_millis();
        node.stat.data_length = data_length(&data);
        node.data = data;
        Ok(node.stat)
    }

    /// Delete a node that has no children.
    pub fn delete(&mut self, path: impl Into<NodePath>) -> Result<(), Error> {
        let path = path.into();
        let key = Self::key(&path)?;
        let (parent_key, name) = Self::split(&key).ok_or_else(|| Error::InvalidPath {
            path: key.clone(),
            message: "the root node cannot be deleted".to_string(),
        })?;

        match self.nodes.get(&key) {
            None => return Err(Error::NoNode { path }),
            Some(node) if !node.children.is_empty() => return Err(Error::NotEmpty { path }),
            Some(_) => {}
        }

        let zxid = self.next_zxid();
        self.nodes.remove(&key);
        if let Some(parent) = self.nodes.get_mut(&parent_key) {
            parent.children.retain(|child| child != &name);
            parent.stat.cversion += 1;
            parent.stat.pzxid = zxid;
            parent.stat.num_children = parent.children.len() as i32;
        }
        Ok(())
    }

    /// Check whether a node exists.
    pub fn exists(&self, path: &NodePath) -> bool {
        Self::key(path).is_ok_and(|key| self.nodes.contains_key(&key))
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if only the root node exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The most recently issued transaction id.
    pub fn last_zxid(&self) -> i64 {
        self.last_zxid
    }

    fn next_zxid(&mut self) -> i64 {
        self.last_zxid += 1;
        self.last_zxid
    }

    fn insert(
        &mut self,
        path: &NodePath,
        data: Option<Bytes>,
        ephemeral_owner: i64,
    ) -> Result<NodePath, Error> {
        let key = Self::key(path)?;
        let (parent_key, name) = Self::split(&key).ok_or_else(|| Error::NodeExists {
            path: NodePath::root(),
        })?;

        if self.nodes.contains_key(&key) {
            return Err(Error::NodeExists {
                path: NodePath::from(key),
            });
        }
        match self.nodes.get(&parent_key) {
            None => {
                return Err(Error::NoNode {
                    path: NodePath::from(parent_key),
                })
            }
            Some(parent) if parent.stat.is_ephemeral() => {
                return Err(Error::NoChildrenForEphemerals {
                    path: NodePath::from(parent_key),
                })
            }
            Some(_) => {}
        }

        let zxid = self.next_zxid();
        let now = now_millis();
        if let Some(parent) = self.nodes.get_mut(&parent_key) {
            parent.children.push(name);
            parent.stat.cversion += 1;
            parent.stat.pzxid = zxid;
            parent.stat.num_children = parent.children.len() as i32;
        }
        self.nodes
            .insert(key.clone(), Node::new(data, zxid, now, ephemeral_owner));
        Ok(NodePath::from(key))
    }

    /// Canonical lookup key for a path.
    fn key(path: &NodePath) -> Result<String, Error> {
        if !path.as_str().starts_with(SEPARATOR) {
            return Err(Error::InvalidPath {
                path: path.to_string(),
                message: format!("must start with '{}'", SEPARATOR),
            });
        }
        let mut key = String::with_capacity(path.as_str().len());
        for component in path.components() {
            key.push(SEPARATOR);
            key.push_str(component);
        }
        if key.is_empty() {
            key.push(SEPARATOR);
        }
        Ok(key)
    }

    /// Split a canonical key into parent key and child name.
    fn split(key: &str) -> Option<(String, String)> {
        let path = NodePath::from(key);
        let (parent, name) = path.split_last()?;
        Some((parent.into_string(), name.to_string()))
    }

    fn node(&self, path: &NodePath) -> Result<&Node, Error> {
        let key = Self::key(path)?;
        self.nodes
            .get(&key)
            .ok_or_else(|| Error::NoNode { path: path.clone() })
    }
}

impl Default for InMemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinationClient for InMemoryTree {
    fn list_children(&self, path: &NodePath) -> Result<Vec<String>, Error> {
        Ok(self.node(path)?.children.clone())
    }

    fn stat(&self, path: &NodePath) -> Result<Stat, Error> {
        Ok(self.node(path)?.stat)
    }

    fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, Error> {
        Ok(self.node(path)?.data.clone())
    }
}
