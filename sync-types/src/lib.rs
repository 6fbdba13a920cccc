//! # sync-types
//!
//! Wire format types for the meshsync cluster protocol.
//!
//! This crate provides the foundational types used across all meshsync crates:
//! - [`NodeId`] - Peer identity
//! - [`FileFlags`], [`NodeFlags`] - The two views of the protocol flag field
//! - [`Message`] - Protocol messages (ClusterConfig, Index, Request, Response)
//! - [`WireError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod flags;
mod ids;
mod messages;

pub use error::WireError;
pub use flags::{
    FileFlags, NodeFlags, FLAG_DELETED, FLAG_DIRECTORY, FLAG_INVALID, FLAG_NO_PERM_BITS,
    FLAG_PERM_BITS, FLAG_SHARE_BITS, FLAG_SHARE_READ_ONLY, FLAG_SHARE_TRUSTED,
};
pub use ids::NodeId;
pub use messages::{
    BlockInfo, ClusterConfigMessage, FileInfo, IndexMessage, Message, Node, Repository,
    RequestMessage, ResponseMessage,
};
