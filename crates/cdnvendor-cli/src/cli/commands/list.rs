//! `cdnvendor assets list` – cache status of every registry asset.

use anyhow::Result;
use cdnvendor_core::cache::AssetStatus;
use cdnvendor_core::config::VendorConfig;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::{format_size, open_cache};

/// Compact age: 42s, 7m, 3h, 12d.
pub(crate) fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86_399 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86_400),
    }
}

fn age_of(status: &AssetStatus, now: SystemTime) -> Option<Duration> {
    status
        .cached_at
        .map(|t| now.duration_since(t).unwrap_or(Duration::ZERO))
}

fn to_json(rows: &[AssetStatus], now: SystemTime) -> serde_json::Value {
    serde_json::Value::Array(
        rows.iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "local_path": s.local_path,
                    "kind": s.kind.as_str(),
                    "cached": s.cached,
                    "size": s.size,
                    "cached_at": s
                        .cached_at
                        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                        .map(|d| d.as_secs()),
                    "age_secs": age_of(s, now).map(|d| d.as_secs()),
                })
            })
            .collect(),
    )
}

pub async fn run_list(cfg: &VendorConfig, json: bool) -> Result<()> {
    let cache = open_cache(cfg)?;
    let rows = cache.status();
    let now = SystemTime::now();
    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&rows, now))?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("Registry is empty.");
        return Ok(());
    }
    println!("{:<28} {:<6} {:<7} {:<10} {:<6} {}", "NAME", "KIND", "CACHED", "SIZE", "AGE", "PATH");
    for s in &rows {
        let size = s.size.map(format_size).unwrap_or_else(|| "-".to_string());
        let age = age_of(s, now).map(format_age).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<28} {:<6} {:<7} {:<10} {:<6} {}",
            s.name,
            s.kind,
            if s.cached { "yes" } else { "no" },
            size,
            age,
            s.local_path
        );
    }
    let cached = rows.iter().filter(|s| s.cached).count();
    println!(
        "{cached}/{} cached in {} (mode: {:?}, local assets in use: {})",
        rows.len(),
        cache.cache_dir().display(),
        cfg.mode,
        cfg.mode.uses_local_assets(&rows)
    );
    Ok(())
}
