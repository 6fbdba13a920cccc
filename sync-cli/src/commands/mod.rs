//! CLI command implementations.

use anyhow::{Context, Result};
use meshsync_types::Message;
use std::path::Path;

pub mod compare;
pub mod export;
pub mod id;
pub mod index;
pub mod show;

/// Read and decode a single MessagePack frame from a file.
async fn read_message(path: &Path) -> Result<Message> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let message = Message::from_bytes(&bytes)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    tracing::debug!(kind = message.kind(), bytes = bytes.len(), "decoded frame");
    Ok(message)
}
