//! Flag bitfields carried by wire records.
//!
//! The protocol reuses a single `u32` field for two unrelated purposes:
//! per-file state on [`FileInfo`](crate::FileInfo) records and per-node sharing
//! permissions on [`Node`](crate::Node) entries. Each purpose gets its own
//! newtype so the bits of one can never be read through the other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mask of the Unix permission bits stored in the low bits of file flags.
pub const FLAG_PERM_BITS: u32 = 0o7777;

/// The file has been deleted.
pub const FLAG_DELETED: u32 = 1 << 12;

/// The file is known but must not be synchronized.
///
/// Locally this bit is owned by `File::suppressed` and never stored in the
/// local flags.
pub const FLAG_INVALID: u32 = 1 << 13;

/// The entry is a directory.
pub const FLAG_DIRECTORY: u32 = 1 << 14;

/// The permission bits are meaningless and must be ignored.
pub const FLAG_NO_PERM_BITS: u32 = 1 << 15;

/// The node is trusted with this repository.
pub const FLAG_SHARE_TRUSTED: u32 = 1 << 0;

/// The node may only receive changes for this repository.
pub const FLAG_SHARE_READ_ONLY: u32 = 1 << 1;

/// Node flag bits that form the sharing contract between peers.
///
/// Both sides of a connection must agree on these bits for every node of every
/// repository they have in common. Bits outside this mask are local
/// annotations.
pub const FLAG_SHARE_BITS: u32 = 0x0000_00ff;

/// Flags of a file record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileFlags(u32);

impl FileFlags {
    /// Wrap raw flag bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw flag bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the reserved invalid bit is set.
    pub const fn is_invalid(self) -> bool {
        self.0 & FLAG_INVALID != 0
    }

    /// The same flags with the invalid bit cleared.
    pub const fn without_invalid(self) -> Self {
        Self(self.0 & !FLAG_INVALID)
    }

    /// The same flags with the invalid bit set to `invalid`.
    pub const fn with_invalid(self, invalid: bool) -> Self {
        if invalid {
            Self(self.0 | FLAG_INVALID)
        } else {
            self.without_invalid()
        }
    }

    /// Whether the file is a deletion record.
    pub const fn is_deleted(self) -> bool {
        self.0 & FLAG_DELETED != 0
    }

    /// Whether the entry is a directory.
    pub const fn is_directory(self) -> bool {
        self.0 & FLAG_DIRECTORY != 0
    }

    /// Unix permission bits, unless the record says they carry no meaning.
    pub const fn permissions(self) -> Option<u32> {
        if self.0 & FLAG_NO_PERM_BITS != 0 {
            None
        } else {
            Some(self.0 & FLAG_PERM_BITS)
        }
    }
}

impl fmt::Debug for FileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileFlags({:#o})", self.0)
    }
}

/// Flags of a node entry within a repository.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeFlags(u32);

impl NodeFlags {
    /// Wrap raw flag bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Build flags from the sharing permissions an operator declares.
    pub const fn from_permissions(trusted: bool, read_only: bool) -> Self {
        let mut bits = 0;
        if trusted {
            bits |= FLAG_SHARE_TRUSTED;
        }
        if read_only {
            bits |= FLAG_SHARE_READ_ONLY;
        }
        Self(bits)
    }

    /// Raw flag bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The sharing contract: only these bits are compared across peers.
    pub const fn share_bits(self) -> u32 {
        self.0 & FLAG_SHARE_BITS
    }

    /// Whether the node is trusted.
    pub const fn is_trusted(self) -> bool {
        self.0 & FLAG_SHARE_TRUSTED != 0
    }

    /// Whether the node is read-only.
    pub const fn is_read_only(self) -> bool {
        self.0 & FLAG_SHARE_READ_ONLY != 0
    }
}

impl fmt::Debug for NodeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeFlags({:#010b})", self.0)
    }
}
