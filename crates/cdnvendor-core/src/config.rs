use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::AssetStatus;
use crate::fetch::{default_user_agent, FetchOptions};
use crate::registry::Registry;

/// Worker pool size used when none (or zero) is configured.
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Per-asset transfer timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Cache directory, relative to the site root.
pub const DEFAULT_CACHE_DIR: &str = ".cache/assets-cache";

/// How generated pages reference third-party libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetMode {
    /// Always link the upstream CDN.
    Cdn,
    /// Always link the local copies.
    SelfHosted,
    /// Local copies when every asset is cached, CDN otherwise.
    #[default]
    Auto,
}

impl AssetMode {
    /// Whether pages should reference cached copies given the current cache status.
    pub fn uses_local_assets(&self, statuses: &[AssetStatus]) -> bool {
        match self {
            AssetMode::Cdn => false,
            AssetMode::SelfHosted => true,
            AssetMode::Auto => statuses.iter().all(|s| s.cached),
        }
    }
}

/// Configuration loaded from `~/.config/cdnvendor/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorConfig {
    #[serde(default)]
    pub mode: AssetMode,
    /// Cache root; `cacheDir/<local_path>` holds each asset.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Check downloaded bytes against registry integrity hashes.
    #[serde(default = "default_true")]
    pub verify_integrity: bool,
    /// Parallel downloads; `None` or 0 means `DEFAULT_CONCURRENCY`.
    #[serde(default)]
    pub concurrency: Option<usize>,
    /// Per-asset timeout in seconds; `None` means `DEFAULT_TIMEOUT_SECS`.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// TOML manifest replacing the built-in registry.
    #[serde(default)]
    pub registry_file: Option<PathBuf>,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            mode: AssetMode::default(),
            cache_dir: default_cache_dir(),
            verify_integrity: true,
            concurrency: None,
            timeout_secs: None,
            registry_file: None,
        }
    }
}

/// Resolve a requested pool size: `None` or 0 become `DEFAULT_CONCURRENCY`.
pub fn resolve_concurrency(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => DEFAULT_CONCURRENCY,
    }
}

/// Resolve a timeout: `None` or 0 become `DEFAULT_TIMEOUT_SECS`.
pub fn resolve_timeout(secs: Option<u64>) -> Duration {
    match secs {
        Some(n) if n > 0 => Duration::from_secs(n),
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

impl VendorConfig {
    pub fn concurrency(&self) -> usize {
        resolve_concurrency(self.concurrency)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: resolve_timeout(self.timeout_secs),
            user_agent: default_user_agent(),
        }
    }

    /// The configured manifest if any, otherwise the built-in catalog.
    pub fn load_registry(&self) -> Result<Registry> {
        let registry = match &self.registry_file {
            Some(path) => Registry::from_path(path)?,
            None => Registry::builtin()?,
        };
        Ok(registry)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdnvendor")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<VendorConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VendorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<VendorConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: VendorConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
