//! Cluster configuration reconciliation.
//!
//! When two peers connect they exchange a [`ClusterConfigMessage`] describing
//! which repositories they share with which nodes. Before any index is
//! exchanged the local peer checks that the remote's declaration agrees with
//! its own:
//!
//! - every local repository exists remotely, with every local node and the
//!   same share bits for each of them;
//! - no repository known to both sides has nodes the local side does not know;
//! - the remote declares no repository the local side does not know.
//!
//! Only the first discrepancy is reported. Repositories and nodes are visited
//! in identifier order, so the outcome does not depend on the order in which
//! either peer lists them.

use std::collections::BTreeMap;

use meshsync_types::{ClusterConfigMessage, NodeFlags, NodeId};
use thiserror::Error;

/// Category of a [`ClusterConfigMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchKind {
    /// A local repository is absent on the remote side.
    MissingRepository,
    /// A local node is absent from a shared repository on the remote side.
    MissingNode,
    /// Both sides list the node but disagree on its share bits.
    SharingFlags,
    /// The remote lists a node the local side does not expect.
    ExtraNode,
    /// The remote lists a repository the local side does not know.
    ExtraRepository,
}

impl MismatchKind {
    /// Stable kebab-case name, for logs and machine-readable output.
    pub fn as_str(self) -> &'static str {
        match self {
            MismatchKind::MissingRepository => "missing-repository",
            MismatchKind::MissingNode => "missing-node",
            MismatchKind::SharingFlags => "sharing-flag-conflict",
            MismatchKind::ExtraNode => "extra-node",
            MismatchKind::ExtraRepository => "extra-repository",
        }
    }
}

/// The first difference found between two cluster configurations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterConfigMismatch {
    /// Remote does not declare a repository the local peer shares.
    #[error("remote is missing repository \"{repository}\"")]
    MissingRepository {
        /// The repository.
        repository: String,
    },

    /// Remote does not share a repository with a node the local peer expects.
    #[error("remote is missing node \"{node}\" in repository \"{repository}\"")]
    MissingNode {
        /// The repository.
        repository: String,
        /// The node.
        node: NodeId,
    },

    /// Both sides list the node with different share bits.
    #[error(
        "remote has different sharing flags for node \"{node}\" in repository \"{repository}\" \
         (local {local:#04x}, remote {remote:#04x})"
    )]
    SharingFlags {
        /// The repository.
        repository: String,
        /// The node.
        node: NodeId,
        /// Local share bits.
        local: u32,
        /// Remote share bits.
        remote: u32,
    },

    /// Remote shares a repository with a node the local peer does not expect.
    #[error("remote has extra node \"{node}\" in repository \"{repository}\"")]
    ExtraNode {
        /// The repository.
        repository: String,
        /// The node.
        node: NodeId,
    },

    /// Remote declares a repository the local peer does not know.
    #[error("remote has extra repository \"{repository}\"")]
    ExtraRepository {
        /// The repository.
        repository: String,
    },
}

impl ClusterConfigMismatch {
    /// Category of the mismatch.
    pub fn kind(&self) -> MismatchKind {
        match self {
            Self::MissingRepository { .. } => MismatchKind::MissingRepository,
            Self::MissingNode { .. } => MismatchKind::MissingNode,
            Self::SharingFlags { .. } => MismatchKind::SharingFlags,
            Self::ExtraNode { .. } => MismatchKind::ExtraNode,
            Self::ExtraRepository { .. } => MismatchKind::ExtraRepository,
        }
    }

    /// Repository the mismatch was found in.
    pub fn repository(&self) -> &str {
        match self {
            Self::MissingRepository { repository }
            | Self::MissingNode { repository, .. }
            | Self::SharingFlags { repository, .. }
            | Self::ExtraNode { repository, .. }
            | Self::ExtraRepository { repository } => repository,
        }
    }

    /// Node the mismatch concerns, if it is about a single node.
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Self::MissingNode { node, .. }
            | Self::SharingFlags { node, .. }
            | Self::ExtraNode { node, .. } => Some(node),
            Self::MissingRepository { .. } | Self::ExtraRepository { .. } => None,
        }
    }
}

/// repository -> node -> flags
type ShareMap<'a> = BTreeMap<&'a str, BTreeMap<&'a NodeId, NodeFlags>>;

/// Later declarations of the same repository or node replace earlier ones.
fn share_map(cm: &ClusterConfigMessage) -> ShareMap<'_> {
    cm.repositories
        .iter()
        .map(|repo| {
            let nodes = repo.nodes.iter().map(|n| (&n.id, n.flags)).collect();
            (repo.id.as_str(), nodes)
        })
        .collect()
}

/// Check that `remote` declares the same sharing topology as `local`.
///
/// Returns `Ok(())` for equivalent configurations, otherwise the first
/// mismatch found.
pub fn compare_cluster_config(
    local: &ClusterConfigMessage,
    remote: &ClusterConfigMessage,
) -> Result<(), ClusterConfigMismatch> {
    let lm = share_map(local);
    let rm = share_map(remote);

    let outcome = find_mismatch(&lm, &rm);
    match &outcome {
        Ok(()) => tracing::trace!(
            repositories = lm.len(),
            "cluster configurations are consistent"
        ),
        Err(mismatch) => tracing::debug!(
            kind = mismatch.kind().as_str(),
            repository = mismatch.repository(),
            "cluster configuration mismatch: {}",
            mismatch
        ),
    }
    outcome
}

fn find_mismatch(lm: &ShareMap<'_>, rm: &ShareMap<'_>) -> Result<(), ClusterConfigMismatch> {
    for (&repo, lnodes) in lm {
        let Some(rnodes) = rm.get(repo) else {
            return Err(ClusterConfigMismatch::MissingRepository {
                repository: repo.to_owned(),
            });
        };

        for (&node, lflags) in lnodes {
            match rnodes.get(node) {
                None => {
                    return Err(ClusterConfigMismatch::MissingNode {
                        repository: repo.to_owned(),
                        node: node.clone(),
                    })
                }
                Some(rflags) if rflags.share_bits() != lflags.share_bits() => {
                    return Err(ClusterConfigMismatch::SharingFlags {
                        repository: repo.to_owned(),
                        node: node.clone(),
                        local: lflags.share_bits(),
                        remote: rflags.share_bits(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    for (&repo, rnodes) in rm {
        let Some(lnodes) = lm.get(repo) else {
            continue;
        };
        if let Some(&node) = rnodes.keys().find(|node| !lnodes.contains_key(*node)) {
            return Err(ClusterConfigMismatch::ExtraNode {
                repository: repo.to_owned(),
                node: node.clone(),
            });
        }
    }

    if let Some(&repo) = rm.keys().find(|repo| !lm.contains_key(*repo)) {
        return Err(ClusterConfigMismatch::ExtraRepository {
            repository: repo.to_owned(),
        });
    }

    Ok(())
}
