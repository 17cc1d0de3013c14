//! `cdnvendor assets publish <dir>` – copy cached assets into site output.

use anyhow::{Context, Result};
use cdnvendor_core::config::VendorConfig;
use std::path::Path;

use super::open_cache;

/// Publishes one named asset, or every cached asset when `name` is `None`.
/// Any copy failure aborts the command.
pub async fn run_publish(cfg: &VendorConfig, output_dir: &Path, name: Option<&str>) -> Result<()> {
    let cache = open_cache(cfg)?;
    let output_dir = output_dir.to_path_buf();
    match name {
        Some(name) => {
            let asset = cache
                .registry()
                .get(name)
                .cloned()
                .with_context(|| format!("unknown asset {name:?}"))?;
            let dst = tokio::task::spawn_blocking(move || cache.copy_to_output(&asset, &output_dir))
                .await
                .context("publish task join")??;
            println!("Published {} -> {}", name, dst.display());
        }
        None => {
            let shown = output_dir.clone();
            let copied = tokio::task::spawn_blocking(move || cache.copy_all_to_output(&output_dir))
                .await
                .context("publish task join")??;
            println!("Published {} cached asset(s) to {}", copied, shown.display());
        }
    }
    Ok(())
}
