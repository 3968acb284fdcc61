use base64::Engine;
use serde::Deserialize;

use coordfs_core_store::{Bytes, Stat};

/// Answer to `GET /znodes/v1{path}?view=children`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChildrenView {
    /// Path of the listed node.
    pub path: String,

    #[serde(default)]
    pub uri: Option<String>,

    /// URI template for child nodes, e.g. `http://host/znodes/v1/a/{child}`
    #[serde(default)]
    pub child_uri_template: Option<String>,

    /// Child names
    #[serde(default)]
    pub children: Vec<String>,
}

/// Answer to `GET /znodes/v1{path}?dataformat=base64`: the node's stat
/// plus its data.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ZNodeView {
    pub path: String,

    #[serde(default)]
    pub uri: Option<String>,

    pub czxid: i64,
    pub mzxid: i64,
    pub ctime: i64,
    pub mtime: i64,
    pub version: i32,
    pub cversion: i32,
    pub aversion: i32,
    pub ephemeral_owner: i64,
    pub data_length: i32,
    pub num_children: i32,
    pub pzxid: i64,

    /// Base64 encoded data; absent or null when the node has no data
    #[serde(default)]
    pub data64: Option<String>,
}

impl ZNodeView {
    pub fn stat(&self) -> Stat {
        Stat {
            version: self.version,
            aversion: self.aversion,
            num_children: self.num_children,
            ctime: self.ctime,
            cversion: self.cversion,
            czxid: self.czxid,
            ephemeral_owner: self.ephemeral_owner,
            mtime: self.mtime,
            mzxid: self.mzxid,
            pzxid: self.pzxid,
            data_length: self.data_length,
        }
    }

    /// Decode `data64`.
    pub fn data(&self) -> Result<Option<Bytes>, base64::DecodeError> {
        self.data64
            .as_deref()
            .map(|encoded| {
                base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map(Bytes::from)
            })
            .transpose()
    }
}
