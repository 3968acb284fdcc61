//! # coordfs-inspect
//!
//! Read-only inspection of a coordination store, one node at a time.
//!
//! Given a path, [`inspect`] lists the node's children:
//!
//! - **Directory** (one or more children): every child is stat'ed and the
//!   result is an ordered map of child name to metadata. A child whose stat
//!   fails is reported inline as `{"error": message}` without failing the
//!   rest of the listing.
//! - **Leaf** (no children): the node's data is read. Empty data renders as
//!   `{path: null}`; anything else is handed back verbatim, labelled
//!   `application/json` when it starts with `{` and
//!   `application/octet-stream` otherwise.
//!
//! Any other failure (the listing itself, or the leaf read) becomes a
//! single `{"error": message}` response.
//!
//! ## Example
//!
//! ```rust,ignore
//! use coordfs_inspect::inspect;
//! use coordfs_memory_store::InMemoryTree;
//!
//! let mut tree = InMemoryTree::new();
//! tree.create("/config.json", b"{\"x\":1}".to_vec())?;
//!
//! let body = inspect(&tree, Some("/config.json")).into_body()?;
//! assert!(body.raw);
//! assert_eq!(body.content_type.as_str(), "application/json");
//! ```

mod builder;
mod classify;
mod inspector;
mod response;

pub use builder::{build_directory, build_leaf, ChildResult, DirectoryListing, LeafContent};
pub use classify::{classify, Classification};
pub use inspector::{inspect, Inspector};
pub use response::{Body, Response};
