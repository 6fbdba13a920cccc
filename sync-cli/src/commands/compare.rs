//! Compare the local cluster configuration against a remote one.

use anyhow::{Context, Result};
use meshsync_core::compare_cluster_config;
use meshsync_types::ClusterConfigMessage;
use std::path::Path;

use super::read_message;
use crate::config::Config;

/// Run the compare command.
///
/// `remote` is either a TOML configuration (`.toml`) or a frame written by
/// `meshsync export`. A mismatch is returned as an error so the process exits
/// non-zero.
pub async fn run(config: &Config, remote: &Path) -> Result<()> {
    let local = config.cluster_config();
    let remote_cm = load_remote(remote).await?;

    tracing::debug!(
        local_repositories = local.repositories.len(),
        remote_repositories = remote_cm.repositories.len(),
        remote_client = %remote_cm.client_name,
        "comparing cluster configurations"
    );

    compare_cluster_config(&local, &remote_cm).with_context(|| {
        format!(
            "Cluster configuration of {} does not match ours",
            remote.display()
        )
    })?;

    println!("configurations are consistent");
    Ok(())
}

async fn load_remote(path: &Path) -> Result<ClusterConfigMessage> {
    if path.extension().is_some_and(|ext| ext == "toml") {
        let config = Config::from_file(path).await?;
        return Ok(config.cluster_config());
    }

    let message = read_message(path).await?;
    Ok(message.into_cluster_config()?)
}
