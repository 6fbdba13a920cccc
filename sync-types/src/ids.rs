//! Identity types for meshsync.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a peer node in the mesh.
///
/// Node IDs are derived from the node's TLS certificate and displayed as
/// URL-safe base64. Peers compare them as exact strings.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an already-encoded node ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the node ID from a DER-encoded certificate.
    pub fn from_certificate(der: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let digest = Sha256::digest(der);
        Self(URL_SAFE_NO_PAD.encode(digest))
    }

    /// The encoded ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.0.get(..8).unwrap_or(&self.0);
        write!(f, "NodeId({short})")
    }
}
