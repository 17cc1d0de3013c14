//! CLI command handlers. Each command is in its own file.

mod clean;
mod completions;
mod download;
mod integrity;
mod list;
mod publish;

pub use clean::run_clean;
pub use completions::run_completions;
pub use download::run_download;
pub use integrity::run_integrity;
pub use list::run_list;
pub use publish::run_publish;

use anyhow::Result;
use cdnvendor_core::cache::AssetCache;
use cdnvendor_core::config::VendorConfig;
use std::sync::Arc;

/// Registry + cache as configured.
fn open_cache(cfg: &VendorConfig) -> Result<AssetCache> {
    let registry = Arc::new(cfg.load_registry()?);
    Ok(AssetCache::from_config(registry, cfg))
}

/// Human-readable byte count (B, KiB, MiB).
pub(crate) fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
