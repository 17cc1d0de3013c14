//! `cdnvendor assets clean` – delete the asset cache.

use anyhow::Result;
use cdnvendor_core::config::VendorConfig;

use super::open_cache;

pub async fn run_clean(cfg: &VendorConfig) -> Result<()> {
    let cache = open_cache(cfg)?;
    let dir = cache.cache_dir().to_path_buf();
    tokio::task::spawn_blocking(move || cache.clean()).await??;
    println!("Removed {}", dir.display());
    Ok(())
}
