use std::fs;
use std::time::SystemTime;

use super::AssetCache;
use crate::registry::AssetKind;

/// Cache state of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub name: String,
    pub local_path: String,
    pub kind: AssetKind,
    pub cached: bool,
    /// File size when cached.
    pub size: Option<u64>,
    /// Modification time of the cached file, when the platform reports it.
    pub cached_at: Option<SystemTime>,
}

impl AssetCache {
    /// One row per registry entry, in registry order. Read-only.
    pub fn status(&self) -> Vec<AssetStatus> {
        self.registry
            .iter()
            .map(|asset| {
                let meta = fs::metadata(self.cache_path(asset))
                    .ok()
                    .filter(|m| m.is_file());
                AssetStatus {
                    name: asset.name.clone(),
                    local_path: asset.local_path.clone(),
                    kind: asset.kind,
                    cached: meta.is_some(),
                    size: meta.as_ref().map(|m| m.len()),
                    cached_at: meta.and_then(|m| m.modified().ok()),
                }
            })
            .collect()
    }
}
