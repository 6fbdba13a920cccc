//! Configuration loading for meshsync.
//!
//! The operator declares which repositories this node shares and with whom
//! in a TOML file (default: `meshsync.toml` in the platform config dir):
//!
//! ```toml
//! [node]
//! id = "AAAA..."
//! name = "laptop"
//!
//! [[repository]]
//! id = "default"
//! directory = "~/Sync"
//!
//! [[repository.node]]
//! id = "AAAA..."
//! trusted = true
//!
//! [[repository.node]]
//! id = "BBBB..."
//! read_only = true
//! ```

use meshsync_types::{ClusterConfigMessage, Node, NodeFlags, NodeId, Repository};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name announced in cluster config messages.
pub const CLIENT_NAME: &str = "meshsync";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// This node's own identity.
    #[serde(default)]
    pub node: Option<LocalNodeConfig>,
    /// Shared repositories.
    #[serde(default, rename = "repository")]
    pub repositories: Vec<RepositoryConfig>,
}

/// Identity of the node running this configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalNodeConfig {
    /// Node ID, as derived from this node's certificate.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,
}

/// One shared repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Repository identifier, identical on every participating node.
    pub id: String,
    /// Local directory backing the repository.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Nodes the repository is shared with.
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeConfig>,
}

/// A node participating in a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Node ID.
    pub id: String,
    /// The node only receives changes (default: false).
    #[serde(default = "default_read_only")]
    pub read_only: bool,
    /// The node is trusted (default: false).
    #[serde(default = "default_trusted")]
    pub trusted: bool,
}

fn default_read_only() -> bool {
    false
}

fn default_trusted() -> bool {
    false
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject empty and duplicate identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node.as_ref().is_some_and(|node| node.id.is_empty()) {
            return Err(ConfigError::Invalid("[node] with empty id".into()));
        }

        let mut repos = HashSet::new();
        for repo in &self.repositories {
            if repo.id.is_empty() {
                return Err(ConfigError::Invalid("repository with empty id".into()));
            }
            if !repos.insert(repo.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "repository \"{}\" declared more than once",
                    repo.id
                )));
            }

            let mut nodes = HashSet::new();
            for node in &repo.nodes {
                if node.id.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "node with empty id in repository \"{}\"",
                        repo.id
                    )));
                }
                if !nodes.insert(node.id.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "node \"{}\" listed more than once in repository \"{}\"",
                        node.id, repo.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// This node's ID, if the `[node]` table declares one.
    pub fn local_node_id(&self) -> Option<NodeId> {
        self.node.as_ref().map(|node| NodeId::new(node.id.as_str()))
    }

    /// The cluster config message this node announces to its peers.
    pub fn cluster_config(&self) -> ClusterConfigMessage {
        ClusterConfigMessage {
            client_name: CLIENT_NAME.to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            repositories: self
                .repositories
                .iter()
                .map(|repo| Repository {
                    id: repo.id.clone(),
                    nodes: repo
                        .nodes
                        .iter()
                        .map(|node| Node {
                            id: NodeId::new(node.id.as_str()),
                            flags: NodeFlags::from_permissions(node.trusted, node.read_only),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// Configuration is well-formed but inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
