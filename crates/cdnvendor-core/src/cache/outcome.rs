use std::time::Duration;

use crate::error::AssetError;
use crate::registry::AssetDescriptor;

/// Result of one download attempt for one asset.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub asset: AssetDescriptor,
    /// The file was already in the cache; no request was made.
    pub was_already_cached: bool,
    /// `None` on success.
    pub error: Option<AssetError>,
    /// Size of the cached file (0 on failure).
    pub byte_size: u64,
    pub duration: Duration,
}

impl DownloadOutcome {
    pub(crate) fn failed(asset: AssetDescriptor, error: AssetError, duration: Duration) -> Self {
        Self {
            asset,
            was_already_cached: false,
            error: Some(error),
            byte_size: 0,
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Counts over a batch of outcomes, for end-of-run reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub fetched: usize,
    pub already_cached: usize,
    pub failed: usize,
    /// Bytes written by this run (cache hits excluded).
    pub bytes_fetched: u64,
}

impl DownloadSummary {
    pub fn from_outcomes(outcomes: &[DownloadOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut s, o| {
            if !o.is_success() {
                s.failed += 1;
            } else if o.was_already_cached {
                s.already_cached += 1;
            } else {
                s.fetched += 1;
                s.bytes_fetched += o.byte_size;
            }
            s
        })
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
