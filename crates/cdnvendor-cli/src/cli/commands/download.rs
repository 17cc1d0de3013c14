//! `cdnvendor assets download` – fetch registry assets into the cache.

use anyhow::{bail, Context, Result};
use cdnvendor_core::cache::{DownloadOutcome, DownloadSummary};
use cdnvendor_core::config::{resolve_concurrency, VendorConfig};
use cdnvendor_core::control::CancelToken;
use cdnvendor_core::registry::{AssetDescriptor, Registry};
use std::collections::HashSet;

use super::{format_size, open_cache};

fn outcome_line(o: &DownloadOutcome) -> String {
    let state = match (&o.error, o.was_already_cached) {
        (Some(_), _) => "FAILED",
        (None, true) => "cached",
        (None, false) => "fetched",
    };
    let detail = match &o.error {
        Some(e) => e.to_string(),
        None => format!("{} in {:.2}s", format_size(o.byte_size), o.duration.as_secs_f64()),
    };
    format!("{:<8} {:<28} {}", state, o.asset.name, detail)
}

/// Resolves requested names against the registry, in request order with repeats
/// dropped. No names means every registry entry.
fn select_assets(registry: &Registry, names: &[String]) -> Result<Vec<AssetDescriptor>> {
    if names.is_empty() {
        return Ok(registry.list_all());
    }
    let mut requested = HashSet::new();
    names
        .iter()
        .filter(|n| requested.insert(n.as_str()))
        .map(|n| {
            registry
                .get(n)
                .cloned()
                .with_context(|| format!("unknown asset {n:?}"))
        })
        .collect()
}

/// Downloads the selected assets (all when `names` is empty). Prints one line per
/// asset as it finishes and fails if any asset failed. Ctrl-C cancels in-flight transfers.
pub async fn run_download(
    cfg: &VendorConfig,
    names: &[String],
    concurrency: Option<usize>,
) -> Result<()> {
    let cache = open_cache(cfg)?;
    let assets = select_assets(cache.registry(), names)?;
    let concurrency = resolve_concurrency(concurrency.or(cfg.concurrency));

    let cancel = CancelToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling downloads");
            on_signal.cancel();
        }
    });

    println!(
        "Downloading {} asset(s) into {} ({} at a time)",
        assets.len(),
        cache.cache_dir().display(),
        concurrency
    );
    let outcomes = tokio::task::spawn_blocking(move || {
        cache.download_many(&assets, concurrency, &cancel, |o| println!("{}", outcome_line(o)))
    })
    .await
    .context("download task join")?;

    let summary = DownloadSummary::from_outcomes(&outcomes);
    println!(
        "{} fetched ({}), {} already cached, {} failed",
        summary.fetched,
        format_size(summary.bytes_fetched),
        summary.already_cached,
        summary.failed
    );
    if !summary.all_succeeded() {
        bail!("{} asset(s) failed to download", summary.failed);
    }
    Ok(())
}
