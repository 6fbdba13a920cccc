//! # sync-core
//!
//! Pure logic for meshsync (no I/O, instant tests).
//!
//! ## Modules
//!
//! - [`translate`]: maps file records between their wire form
//!   ([`FileInfo`](meshsync_types::FileInfo)) and the local tracking form
//!   ([`File`]).
//! - [`cluster`]: decides whether a remote peer's declared repository and node
//!   topology agrees with ours.
//! - [`units`]: byte count formatting for status output.
//!
//! ## Design Philosophy
//!
//! Everything here is a function of its arguments. Nothing is cached between
//! calls and nothing blocks, so all of it may be called concurrently from any
//! thread without coordination.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cluster;
pub mod file;
pub mod translate;
pub mod units;

pub use cluster::{compare_cluster_config, ClusterConfigMismatch, MismatchKind};
pub use file::{Block, File, FileSummary};
pub use translate::{to_local, to_wire};
pub use units::{binary_prefix, metric_prefix};
