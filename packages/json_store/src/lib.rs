//! In-memory coordination tree for CoordFS.
//!
//! [`InMemoryTree`] implements [`coordfs_core_store::CoordinationClient`]
//! entirely in memory. It can be built node by node or loaded from a JSON
//! snapshot (see [`snapshot`]).

pub mod in_memory;
pub mod snapshot;

pub use in_memory::InMemoryTree;
pub use snapshot::{SnapshotError, DATA_KEY};
