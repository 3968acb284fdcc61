//! The read-only client interface to a coordination store.

use std::sync::Arc;

use bytes::Bytes;

use crate::{Error, NodePath, Stat};

/// Read operations against a hierarchical coordination store.
///
/// Implementations own their connection, session and retry handling. Every
/// call is a blocking request/response that either answers or fails in
/// bounded time.
///
/// # Object Safety
///
/// This trait is object-safe: one `Arc<dyn CoordinationClient>` can be
/// shared by any number of concurrent callers.
pub trait CoordinationClient: Send + Sync {
    /// Names of the immediate children of `path`, in store order.
    ///
    /// A leaf answers with an empty list. A missing node is an error.
    fn list_children(&self, path: &NodePath) -> Result<Vec<String>, Error>;

    /// Metadata of the node at `path`.
    fn stat(&self, path: &NodePath) -> Result<Stat, Error>;

    /// Data stored at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The node exists but holds no data.
    /// * `Ok(Some(bytes))` - The node's data, possibly zero-length.
    /// * `Err(Error)` - The read failed.
    fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, Error>;
}

// Blanket implementations for references and smart pointers

impl<T: CoordinationClient + ?Sized> CoordinationClient for &T {
    fn list_children(&self, path: &NodePath) -> Result<Vec<String>, Error> {
        (**self).list_children(path)
    }

    fn stat(&self, path: &NodePath) -> Result<Stat, Error> {
        (**self).stat(path)
    }

    fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, Error> {
        (**self).get_data(path)
    }
}

impl<T: CoordinationClient + ?Sized> CoordinationClient for Box<T> {
    fn list_children(&self, path: &NodePath) -> Result<Vec<String>, Error> {
        self.as_ref().list_children(path)
    }

    fn stat(&self, path: &NodePath) -> Result<Stat, Error> {
        self.as_ref().stat(path)
    }

    fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, Error> {
        self.as_ref().get_data(path)
    }
}

impl<T: CoordinationClient + ?Sized> CoordinationClient for Arc<T> {
    fn list_children(&self, path: &NodePath) -> Result<Vec<String>, Error> {
        self.as_ref().list_children(path)
    }

    fn stat(&self, path: &NodePath) -> Result<Stat, Error> {
        self.as_ref().stat(path)
    }

    fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, Error> {
        self.as_ref().get_data(path)
    }
}
