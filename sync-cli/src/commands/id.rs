//! Derive a node ID from its certificate.

use anyhow::{Context, Result};
use meshsync_types::NodeId;
use std::path::Path;

/// Run the id command.
pub async fn run(cert: &Path) -> Result<()> {
    let id = node_id(cert).await?;
    println!("{id}");
    Ok(())
}

/// Read a DER certificate and derive the node ID it identifies.
async fn node_id(cert: &Path) -> Result<NodeId> {
    let der = tokio::fs::read(cert)
        .await
        .with_context(|| format!("Failed to read certificate {}", cert.display()))?;
    if der.is_empty() {
        anyhow::bail!("Certificate {} is empty", cert.display());
    }
    let id = NodeId::from_certificate(&der);
    tracing::debug!(cert = %cert.display(), id = %id, "derived node id");
    Ok(id)
}
