//! Copy cached assets into a site's output tree.
//!
//! Publishing never downloads: an asset must be cached first. Files are copied
//! byte-for-byte to `output_dir/<local_path>` because templates reference
//! assets by that path.

use std::path::{Path, PathBuf};

use super::AssetCache;
use crate::error::AssetError;
use crate::registry::AssetDescriptor;
use crate::storage;

impl AssetCache {
    /// Copy one cached asset to `output_dir/<local_path>` and return the destination.
    /// Fails with `AssetError::NotCached` (writing nothing) if the asset was never downloaded.
    pub fn copy_to_output(
        &self,
        asset: &AssetDescriptor,
        output_dir: &Path,
    ) -> Result<PathBuf, AssetError> {
        let src = self.cached_path(asset).ok_or_else(|| AssetError::NotCached {
            name: asset.name.clone(),
        })?;
        let dst = output_dir.join(asset.relative_path());
        let bytes = storage::copy_atomic(&src, &dst).map_err(|e| AssetError::io(&dst, e))?;
        tracing::debug!(asset = %asset.name, bytes, dst = %dst.display(), "published asset");
        Ok(dst)
    }

    /// Copy every cached asset into `output_dir`, skipping ones that are not cached.
    /// Stops at the first copy failure. Returns the number of files copied.
    pub fn copy_all_to_output(&self, output_dir: &Path) -> Result<usize, AssetError> {
        let mut copied = 0;
        for asset in self.registry.iter() {
            if !self.is_cached(asset) {
                tracing::debug!(asset = %asset.name, "not cached, skipping publish");
                continue;
            }
            self.copy_to_output(asset, output_dir)?;
            copied += 1;
        }
        tracing::info!(copied, output = %output_dir.display(), "published cached assets");
        Ok(copied)
    }
}
