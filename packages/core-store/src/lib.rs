//! CoordFS core types.
//!
//! Shared vocabulary for reading a hierarchical coordination store:
//! - `NodePath`: a slash-delimited path into the tree
//! - `Stat`: the metadata snapshot of one node
//! - `Format`: the content type handed to a transport with raw bytes
//! - `CoordinationClient`: the three read operations a store exposes
//!
//! # Example
//!
//! ```rust
//! use coordfs_core_store::{CoordinationClient, Error, NodePath, Stat};
//!
//! fn stat_children(client: &dyn CoordinationClient, path: &NodePath) -> Result<Vec<Stat>, Error> {
//!     client
//!         .list_children(path)?
//!         .iter()
//!         .map(|name| client.stat(&path.child(name)))
//!         .collect()
//! }
//! ```

pub use bytes::Bytes;

mod error;
mod format;
mod path;
mod stat;
mod traits;

pub use error::Error;
pub use format::Format;
pub use path::{NodePath, SEPARATOR};
pub use stat::Stat;
pub use traits::CoordinationClient;
