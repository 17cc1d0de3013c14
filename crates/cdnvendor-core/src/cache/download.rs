//! Fetch one asset into the cache, or many through the worker pool.

use std::collections::HashSet;
use std::fs;
use std::time::Instant;

use super::pool::run_pool;
use super::{AssetCache, DownloadOutcome};
use crate::config::resolve_concurrency;
use crate::control::CancelToken;
use crate::error::AssetError;
use crate::fetch::fetch_bytes;
use crate::integrity;
use crate::registry::AssetDescriptor;
use crate::storage;

impl AssetCache {
    /// Download `asset` unless it is already cached.
    pub fn download(&self, asset: &AssetDescriptor) -> DownloadOutcome {
        self.download_with(asset, &CancelToken::new())
    }

    /// Like `download`, aborting the transfer when `cancel` is set.
    pub fn download_with(&self, asset: &AssetDescriptor, cancel: &CancelToken) -> DownloadOutcome {
        let started = Instant::now();
        match self.fetch_into_cache(asset, cancel) {
            Ok((byte_size, was_already_cached)) => DownloadOutcome {
                asset: asset.clone(),
                was_already_cached,
                error: None,
                byte_size,
                duration: started.elapsed(),
            },
            Err(e) => {
                tracing::warn!(
                    asset = %asset.name,
                    url = %asset.source_url,
                    "download failed: {}",
                    e
                );
                DownloadOutcome::failed(asset.clone(), e, started.elapsed())
            }
        }
    }

    /// Download every registry entry with up to `concurrency` parallel transfers
    /// (0 means the default of 4). Outcome `i` belongs to registry entry `i`.
    pub fn download_all(&self, concurrency: usize) -> Vec<DownloadOutcome> {
        self.download_all_with(concurrency, &CancelToken::new(), |_| {})
    }

    /// `download_all` with cancellation and a callback invoked as each asset finishes
    /// (in completion order).
    pub fn download_all_with<F>(
        &self,
        concurrency: usize,
        cancel: &CancelToken,
        on_outcome: F,
    ) -> Vec<DownloadOutcome>
    where
        F: FnMut(&DownloadOutcome),
    {
        let assets = self.registry.list_all();
        self.download_many(&assets, concurrency, cancel, on_outcome)
    }

    /// Download an explicit list of assets; outcomes follow the order of `assets`.
    ///
    /// Only the first occurrence of a name goes through the pool. Repeats are
    /// resolved afterwards, one at a time, so they are cache hits once the
    /// first copy landed.
    pub fn download_many<F>(
        &self,
        assets: &[AssetDescriptor],
        concurrency: usize,
        cancel: &CancelToken,
        mut on_outcome: F,
    ) -> Vec<DownloadOutcome>
    where
        F: FnMut(&DownloadOutcome),
    {
        let mut seen = HashSet::new();
        let (unique, repeats): (Vec<_>, Vec<_>) =
            (0..assets.len()).partition(|&i| seen.insert(assets[i].name.as_str()));
        let batch: Vec<AssetDescriptor> = unique.iter().map(|&i| assets[i].clone()).collect();

        let workers = resolve_concurrency(Some(concurrency));
        tracing::debug!(
            assets = batch.len(),
            repeated = repeats.len(),
            workers,
            "starting batch download"
        );
        let pooled = run_pool(
            &batch,
            workers,
            cancel,
            |asset, cancel| self.download_with(asset, cancel),
            &mut on_outcome,
        );

        let mut slots: Vec<Option<DownloadOutcome>> = (0..assets.len()).map(|_| None).collect();
        for (i, outcome) in unique.into_iter().zip(pooled) {
            slots[i] = Some(outcome);
        }
        for i in repeats {
            let outcome = self.download_with(&assets[i], cancel);
            on_outcome(&outcome);
            slots[i] = Some(outcome);
        }
        slots.into_iter().flatten().collect()
    }

    /// Returns (size, was_already_cached).
    fn fetch_into_cache(
        &self,
        asset: &AssetDescriptor,
        cancel: &CancelToken,
    ) -> Result<(u64, bool), AssetError> {
        let path = self.cache_path(asset);
        if path.is_file() {
            let size = fs::metadata(&path)
                .map_err(|e| AssetError::io(&path, e))?
                .len();
            tracing::debug!(asset = %asset.name, path = %path.display(), "cache hit");
            return Ok((size, true));
        }
        if cancel.is_cancelled() {
            return Err(AssetError::Cancelled);
        }

        storage::ensure_parent(&path).map_err(|e| AssetError::io(&path, e))?;
        let body = fetch_bytes(&asset.source_url, &self.fetch, cancel)
            .map_err(|e| AssetError::from_fetch(&asset.source_url, e))?;

        if self.verify_integrity {
            integrity::verify(&body, asset.integrity.as_deref())?;
        }

        storage::write_atomic(&path, &body).map_err(|e| AssetError::io(&path, e))?;
        tracing::info!(
            asset = %asset.name,
            bytes = body.len(),
            path = %path.display(),
            "cached asset"
        );
        Ok((body.len() as u64, false))
    }
}
