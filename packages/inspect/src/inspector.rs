//! The inspection entry point and its fault boundary.

use std::sync::Arc;

use tracing::warn;

use coordfs_core_store::{CoordinationClient, Error, NodePath};

use crate::builder::{build_directory, build_leaf};
use crate::classify::{classify, Classification};
use crate::response::Response;

/// Inspect the node at `path`.
///
/// An empty or missing path means `/`. This never fails: a failed listing
/// or leaf read comes back as [`Response::Failure`], and failed child stats
/// are kept inline in the directory listing.
#[tracing::instrument(level = "debug", skip(client))]
pub fn inspect(client: &dyn CoordinationClient, path: Option<&str>) -> Response {
    let path = NodePath::normalize(path);
    match respond(client, &path) {
        Ok(response) => response,
        Err(e) => {
            warn!(%path, error = %e, "inspection failed");
            Response::Failure {
                message: e.to_string(),
            }
        }
    }
}

fn respond(client: &dyn CoordinationClient, path: &NodePath) -> Result<Response, Error> {
    match classify(client, path)? {
        Classification::Directory(children) => {
            Ok(Response::Directory(build_directory(client, path, children)))
        }
        Classification::Leaf => Ok(Response::Leaf {
            content: build_leaf(client, path)?,
            path: path.clone(),
        }),
    }
}

/// A shared client handle bound to the inspection logic.
///
/// Transports that serve many requests hold one `Inspector` and call
/// [`Inspector::inspect`] per request. The inspector owns no connection
/// state of its own.
#[derive(Clone)]
pub struct Inspector {
    client: Arc<dyn CoordinationClient>,
}

impl Inspector {
    pub fn new(client: Arc<dyn CoordinationClient>) -> Self {
        Self { client }
    }

    pub fn from_client(client: impl CoordinationClient + 'static) -> Self {
        Self::new(Arc::new(client))
    }

    pub fn inspect(&self, path: Option<&str>) -> Response {
        inspect(self.client.as_ref(), path)
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coordfs_core_store::{Bytes, Stat};

    /// A client that cannot reach the store.
    struct Offline;

    impl CoordinationClient for Offline {
        fn list_children(&self, _path: &NodePath) -> Result<Vec<String>, Error> {
            Err(Error::ConnectionLoss {
                message: "session expired".to_string(),
            })
        }

        fn stat(&self, _path: &NodePath) -> Result<Stat, Error> {
            unreachable!()
        }

        fn get_data(&self, _path: &NodePath) -> Result<Option<Bytes>, Error> {
            unreachable!()
        }
    }

    /// A leaf whose data read fails.
    struct UnreadableLeaf;

    impl CoordinationClient for UnreadableLeaf {
        fn list_children(&self, _path: &NodePath) -> Result<Vec<String>, Error> {
            Ok(Vec::new())
        }

        fn stat(&self, _path: &NodePath) -> Result<Stat, Error> {
            unreachable!()
        }

        fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, Error> {
            Err(Error::NoAuth { path: path.clone() })
        }
    }

    #[test]
    fn listing_failure_becomes_failure_response() {
        let response = inspect(&Offline, Some("/live_nodes"));
        assert_eq!(response.error(), Some("connection loss: session expired"));
    }

    #[test]
    fn leaf_read_failure_becomes_failure_response() {
        let response = inspect(&UnreadableLeaf, Some("/security.json"));
        assert_eq!(response.error(), Some("not authorized to read /security.json"));
    }

    #[test]
    fn inspector_shares_one_client() {
        let inspector = Inspector::from_client(UnreadableLeaf);
        let copy = inspector.clone();
        assert!(inspector.inspect(None).is_failure());
        assert!(copy.inspect(Some("")).is_failure());
        assert!(format!("{:?}", inspector).starts_with("Inspector"));
    }
}
