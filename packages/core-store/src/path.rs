//! Node paths in the coordination tree.

use std::fmt;

/// The path separator.
pub const SEPARATOR: char = '/';

/// A path naming a node in the coordination tree.
///
/// Paths are kept exactly as supplied. The only normalization is that an
/// empty or missing path means the root (`/`). Trailing separators are not
/// trimmed; they only matter when building child paths, where
/// [`NodePath::child`] never doubles a separator.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodePath(String);

impl NodePath {
    /// The root path, `/`.
    pub fn root() -> Self {
        NodePath(SEPARATOR.to_string())
    }

    /// Build a path from a request parameter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coordfs_core_store::NodePath;
    ///
    /// assert_eq!(NodePath::normalize(None), NodePath::root());
    /// assert_eq!(NodePath::normalize(Some("")), NodePath::root());
    /// assert_eq!(NodePath::normalize(Some("/live_nodes/")).as_str(), "/live_nodes/");
    /// ```
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if !s.is_empty() => NodePath(s.to_string()),
            _ => Self::root(),
        }
    }

    /// Path of the child `name`, with exactly one separator in between.
    #[must_use]
    pub fn child(&self, name: &str) -> NodePath {
        let mut path = String::with_capacity(self.0.len() + name.len() + 1);
        path.push_str(&self.0);
        if !path.ends_with(SEPARATOR) {
            path.push(SEPARATOR);
        }
        path.push_str(name);
        NodePath(path)
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Non-empty components of the path.
    ///
    /// Empty segments (from `//` or a trailing `/`) are skipped, so
    /// `/a//b/` yields `a`, `b`.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|c| !c.is_empty())
    }

    /// The parent path and the final component name.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, &str)> {
        let trimmed = self.0.trim_end_matches(SEPARATOR);
        let idx = trimmed.rfind(SEPARATOR)?;
        let name = &trimmed[idx + 1..];
        if name.is_empty() {
            return None;
        }
        let parent = if idx == 0 {
            Self::root()
        } else {
            NodePath(trimmed[..idx].to_string())
        };
        Some((parent, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for NodePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodePath {
    fn from(s: &str) -> Self {
        Self::normalize(Some(s))
    }
}

impl From<String> for NodePath {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Self::root()
        } else {
            NodePath(s)
        }
    }
}

impl From<Option<&str>> for NodePath {
    fn from(s: Option<&str>) -> Self {
        Self::normalize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_are_root() {
        assert_eq!(NodePath::normalize(None), NodePath::root());
        assert_eq!(NodePath::normalize(Some("")), NodePath::root());
        assert_eq!(NodePath::from(String::new()), NodePath::root());
        assert!(NodePath::normalize(None).is_root());
    }

    #[test]
    fn no_other_normalization() {
        assert_eq!(NodePath::from("/a/b/").as_str(), "/a/b/");
        assert_eq!(NodePath::from("a//b").as_str(), "a//b");
        assert!(!NodePath::from("//").is_root());
    }

    #[test]
    fn child_inserts_one_separator() {
        assert_eq!(NodePath::from("/a").child("b").as_str(), "/a/b");
        assert_eq!(NodePath::from("/a/").child("b").as_str(), "/a/b");
        assert_eq!(NodePath::root().child("zookeeper").as_str(), "/zookeeper");
    }

    #[test]
    fn child_does_not_touch_name() {
        assert_eq!(
            NodePath::from("/collections").child("techproducts.shard1").as_str(),
            "/collections/techproducts.shard1"
        );
    }

    #[test]
    fn components_skip_empty_segments() {
        let p = NodePath::from("/a//b/");
        assert_eq!(p.components().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(NodePath::root().components().count(), 0);
    }

    #[test]
    fn split_last_works() {
        let ab = NodePath::from("/a/b");
        let (parent, name) = ab.split_last().unwrap();
        assert_eq!(parent.as_str(), "/a");
        assert_eq!(name, "b");

        let trailing = NodePath::from("/a/");
        let (parent, name) = trailing.split_last().unwrap();
        assert!(parent.is_root());
        assert_eq!(name, "a");

        assert!(NodePath::root().split_last().is_none());
        assert!(NodePath::from("relative").split_last().is_none());
    }

    #[test]
    fn display_is_verbatim() {
        assert_eq!(format!("{}", NodePath::from("/overseer/queue")), "/overseer/queue");
    }
}
