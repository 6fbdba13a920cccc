//! Protocol messages for meshsync.
//!
//! These are the records exchanged between peers. They carry only what cannot
//! be derived on the receiving side: block offsets and file sizes are rebuilt
//! from the block list, and paths always use forward slashes.

use serde::{Deserialize, Serialize};

use crate::{FileFlags, NodeFlags, NodeId, WireError};

/// All possible protocol messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Declared repository and node topology, sent once per connection
    ClusterConfig(ClusterConfigMessage),
    /// Full index of a repository
    Index(IndexMessage),
    /// Request a byte range of a file
    Request(RequestMessage),
    /// Data answering a request
    Response(ResponseMessage),
}

impl Message {
    /// Serialize to MessagePack bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        rmp_serde::to_vec(self).map_err(WireError::Serialization)
    }

    /// Deserialize from MessagePack bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        rmp_serde::from_slice(bytes).map_err(WireError::Deserialization)
    }

    /// Name of the message kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::ClusterConfig(_) => "ClusterConfig",
            Message::Index(_) => "Index",
            Message::Request(_) => "Request",
            Message::Response(_) => "Response",
        }
    }

    /// Unwrap a cluster config, or report what was received instead.
    pub fn into_cluster_config(self) -> Result<ClusterConfigMessage, WireError> {
        match self {
            Message::ClusterConfig(cm) => Ok(cm),
            other => Err(WireError::UnexpectedMessage {
                expected: "ClusterConfig",
                actual: other.kind(),
            }),
        }
    }

    /// Unwrap an index, or report what was received instead.
    pub fn into_index(self) -> Result<IndexMessage, WireError> {
        match self {
            Message::Index(index) => Ok(index),
            other => Err(WireError::UnexpectedMessage {
                expected: "Index",
                actual: other.kind(),
            }),
        }
    }
}

/// One block of a file as sent on the wire. The offset is implied by the
/// position in the block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block length in bytes
    pub size: u32,
    /// Content hash of the block
    pub hash: Vec<u8>,
}

/// File metadata as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path relative to the repository root, separated by `/`
    pub name: String,
    /// File flags, including the invalid bit for suppressed files
    pub flags: FileFlags,
    /// Modification time, Unix seconds
    pub modified: i64,
    /// Version counter
    pub version: u64,
    /// Blocks in file order
    pub blocks: Vec<BlockInfo>,
}

/// A node taking part in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node identity
    pub id: NodeId,
    /// Sharing flags for this node in the enclosing repository
    pub flags: NodeFlags,
}

/// A repository and the nodes it is shared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository identifier
    pub id: String,
    /// Nodes sharing this repository
    pub nodes: Vec<Node>,
}

/// One peer's complete declared view of repository membership.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterConfigMessage {
    /// Name of the sending implementation (informational)
    pub client_name: String,
    /// Version of the sending implementation (informational)
    pub client_version: String,
    /// Declared repositories
    pub repositories: Vec<Repository>,
}

/// Full index of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMessage {
    /// Repository the files belong to
    pub repository: String,
    /// File records
    pub files: Vec<FileInfo>,
}

/// Request for a byte range of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMessage {
    /// Repository of the file
    pub repository: String,
    /// Path of the file, separated by `/`
    pub name: String,
    /// First byte requested
    pub offset: u64,
    /// Number of bytes requested
    pub size: u32,
}

/// Answer to a [`RequestMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Requested bytes
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FLAG_INVALID, FLAG_SHARE_READ_ONLY};

    fn sample_cluster_config() -> ClusterConfigMessage {
        ClusterConfigMessage {
            client_name: "meshsync".into(),
            client_version: "0.1.0".into(),
            repositories: vec![Repository {
                id: "default".into(),
                nodes: vec![
                    Node {
                        id: NodeId::new("node-1"),
                        flags: NodeFlags::from_bits(FLAG_SHARE_READ_ONLY),
                    },
                    Node {
                        id: NodeId::new("node-2"),
                        flags: NodeFlags::default(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn cluster_config_message_roundtrip() {
        let msg = Message::ClusterConfig(sample_cluster_config());

        let bytes = msg.to_bytes().unwrap();
        let restored = Message::from_bytes(&bytes).unwrap();

        assert_eq!(msg, restored);
    }

    #[test]
    fn index_keeps_invalid_bit_and_block_order() {
        let msg = Message::Index(IndexMessage {
            repository: "default".into(),
            files: vec![FileInfo {
                name: "docs/readme.txt".into(),
                flags: FileFlags::from_bits(0o644 | FLAG_INVALID),
                modified: 1_705_000_000,
                version: 7,
                blocks: vec![
                    BlockInfo {
                        size: 100,
                        hash: vec![1; 32],
                    },
                    BlockInfo {
                        size: 50,
                        hash: vec![2; 32],
                    },
                ],
            }],
        });

        let bytes = msg.to_bytes().unwrap();
        let index = Message::from_bytes(&bytes).unwrap().into_index().unwrap();

        let file = &index.files[0];
        assert!(file.flags.is_invalid());
        assert_eq!(file.blocks[0].size, 100);
        assert_eq!(file.blocks[1].hash, vec![2; 32]);
    }

    #[test]
    fn into_index_rejects_other_messages() {
        let msg = Message::Request(RequestMessage {
            repository: "default".into(),
            name: "a".into(),
            offset: 0,
            size: 128,
        });

        let err = msg.into_index().unwrap_err();
        assert!(matches!(
            err,
            WireError::UnexpectedMessage {
                expected: "Index",
                actual: "Request"
            }
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        let result = Message::from_bytes(&[0xc1, 0x00, 0xff]);
        assert!(matches!(result, Err(WireError::Deserialization(_))));
    }

    #[test]
    fn kind_names_variant() {
        let msg = Message::Response(ResponseMessage { data: vec![1, 2] });
        assert_eq!(msg.kind(), "Response");
    }
}
