//! Local cache of registry assets.
//!
//! `AssetCache` downloads registry entries into `cache_dir/<local_path>`,
//! verifies them, reports per-asset outcomes, and publishes cached files
//! into a site's output tree. A file present in the cache is valid for the
//! life of the cache directory; only `clean` removes entries.
//!
//! Two batch policies live here on purpose:
//! - `download_all` is best-effort: each asset's failure stays in its own outcome.
//! - `copy_all_to_output` is strict: the first copy failure aborts the batch.

mod download;
mod outcome;
mod pool;
mod publish;
mod status;

pub use outcome::{DownloadOutcome, DownloadSummary};
pub use status::AssetStatus;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::VendorConfig;
use crate::error::AssetError;
use crate::fetch::FetchOptions;
use crate::registry::{AssetDescriptor, Registry};

/// Downloader and cache over a read-only registry.
///
/// Holds no mutable state besides the filesystem, so it is cheap to clone and
/// share across threads.
#[derive(Debug, Clone)]
pub struct AssetCache {
    registry: Arc<Registry>,
    cache_dir: PathBuf,
    verify_integrity: bool,
    fetch: FetchOptions,
}

impl AssetCache {
    /// Cache rooted at `cache_dir` with integrity checks on and default fetch options.
    pub fn new(registry: Arc<Registry>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            cache_dir: cache_dir.into(),
            verify_integrity: true,
            fetch: FetchOptions::default(),
        }
    }

    pub fn from_config(registry: Arc<Registry>, cfg: &VendorConfig) -> Self {
        Self::new(registry, cfg.cache_dir.clone())
            .with_verify_integrity(cfg.verify_integrity)
            .with_fetch_options(cfg.fetch_options())
    }

    pub fn with_verify_integrity(mut self, verify: bool) -> Self {
        self.verify_integrity = verify;
        self
    }

    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn verify_integrity(&self) -> bool {
        self.verify_integrity
    }

    /// Where `asset` lives in the cache, whether or not it has been downloaded.
    pub fn cache_path(&self, asset: &AssetDescriptor) -> PathBuf {
        self.cache_dir.join(asset.relative_path())
    }

    /// Filesystem check only; never touches the network.
    pub fn is_cached(&self, asset: &AssetDescriptor) -> bool {
        self.cache_path(asset).is_file()
    }

    /// Cache path of `asset` if the file exists.
    pub fn cached_path(&self, asset: &AssetDescriptor) -> Option<PathBuf> {
        let path = self.cache_path(asset);
        path.is_file().then_some(path)
    }

    /// Remove the whole cache directory. Every asset goes back to not cached.
    /// A missing directory is not an error.
    pub fn clean(&self) -> Result<(), AssetError> {
        match fs::remove_dir_all(&self.cache_dir) {
            Ok(()) => {
                tracing::info!(dir = %self.cache_dir.display(), "removed asset cache");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssetError::io(&self.cache_dir, e)),
        }
    }
}
