//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding `data_file` exists, creating it if needed.
///
/// A missing data file itself is fine: the store is created on first write.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    let Some(dir) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    if tokio::fs::metadata(data_file).await.is_err() {
        info!(file = %data_file.display(), "data file absent; it will be created on first write");
    }
    Ok(())
}
