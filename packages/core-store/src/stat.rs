//! The Stat type - per-node metadata snapshot.

use serde::{Deserialize, Serialize};

/// Metadata attached to a node at the moment it was read.
///
/// Serializes with the store's conventional short field names, in this
/// order: `version`, `aversion`, `children`, `ctime`, `cversion`, `czxid`,
/// `ephemeralOwner`, `mtime`, `mzxid`, `pzxid`, `dataLength`.
///
/// Times are milliseconds since the epoch. Transaction ids (`*zxid`) and the
/// ephemeral owner session id are opaque 64-bit values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    /// Data modification counter.
    pub version: i32,
    /// ACL modification counter.
    pub aversion: i32,
    /// Number of children.
    #[serde(rename = "children")]
    pub num_children: i32,
    pub ctime: i64,
    /// Child list modification counter.
    pub cversion: i32,
    pub czxid: i64,
    /// Owning session id, 0 unless the node is ephemeral.
    pub ephemeral_owner: i64,
    pub mtime: i64,
    pub mzxid: i64,
    /// Transaction id of the last change to this node's children.
    pub pzxid: i64,
    pub data_length: i32,
}

impl Stat {
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral_owner != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names_in_order() {
        let stat = Stat {
            version: 1,
            aversion: 2,
            num_children: 3,
            ctime: 4,
            cversion: 5,
            czxid: 6,
            ephemeral_owner: 7,
            mtime: 8,
            mzxid: 9,
            pzxid: 10,
            data_length: 11,
        };
        let json = serde_json::to_string(&stat).unwrap();
        assert_eq!(
            json,
            r#"{"version":1,"aversion":2,"children":3,"ctime":4,"cversion":5,"czxid":6,"ephemeralOwner":7,"mtime":8,"mzxid":9,"pzxid":10,"dataLength":11}"#
        );
    }

    #[test]
    fn deserializes_from_wire_names() {
        let stat: Stat = serde_json::from_str(
            r#"{"version":0,"aversion":0,"children":2,"ctime":100,"cversion":2,"czxid":5,
                "ephemeralOwner":0,"mtime":100,"mzxid":5,"pzxid":9,"dataLength":0}"#,
        )
        .unwrap();
        assert_eq!(stat.num_children, 2);
        assert_eq!(stat.pzxid, 9);
        assert!(!stat.is_ephemeral());
    }

    #[test]
    fn large_ids_survive() {
        let stat = Stat {
            czxid: 0x1_0000_0002,
            ephemeral_owner: 0x7200_0012_3456_0001,
            ..Stat::default()
        };
        let back: Stat = serde_json::from_str(&serde_json::to_string(&stat).unwrap()).unwrap();
        assert_eq!(back, stat);
        assert!(back.is_ephemeral());
    }
}
