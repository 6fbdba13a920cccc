//! Export the local cluster configuration as a wire frame.

use anyhow::{Context, Result};
use meshsync_types::Message;
use std::path::Path;

use crate::config::Config;

/// Run the export command.
pub async fn run(config: &Config, out: &Path) -> Result<()> {
    let message = Message::ClusterConfig(config.cluster_config());
    let bytes = message
        .to_bytes()
        .context("Failed to encode cluster configuration")?;

    tokio::fs::write(out, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;

    tracing::info!(path = %out.display(), bytes = bytes.len(), "exported cluster config");
    println!(
        "Wrote cluster configuration ({} repositories) to {}",
        config.repositories.len(),
        out.display()
    );

    Ok(())
}
