//! Cancellation for in-flight downloads.
//!
//! A `CancelToken` is shared between the caller and every download task. The
//! worker pool checks it before picking up the next asset and the fetcher
//! checks it from curl's progress callback, so setting it aborts transfers
//! that are already running. Files already written to the cache stay there.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancel flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
