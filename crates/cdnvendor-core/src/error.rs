//! Per-asset error taxonomy.
//!
//! Every failure that can happen while caching or publishing one asset maps to
//! an `AssetError`. Batch downloads capture these per asset instead of
//! propagating them, so one bad asset never stops its siblings.

use std::io;
use std::path::{Path, PathBuf};

use crate::fetch::FetchError;
use crate::integrity::IntegrityError;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    DownloadFailed { url: String, status: u32 },

    /// Connection, TLS, timeout or other transport failure.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Downloaded bytes failed integrity verification (or the descriptor was unusable).
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Publish was attempted before the asset was downloaded.
    #[error("asset {name} is not cached; run a download first")]
    NotCached { name: String },

    /// Filesystem failure (create dir, read, write, rename, remove).
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("download cancelled")]
    Cancelled,

    /// A download worker thread panicked while handling this asset.
    #[error("download worker panicked")]
    WorkerPanicked,
}

impl AssetError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        AssetError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn from_fetch(url: &str, err: FetchError) -> Self {
        match err {
            FetchError::Http(status) => AssetError::DownloadFailed {
                url: url.to_string(),
                status,
            },
            FetchError::Curl(source) => AssetError::Transport {
                url: url.to_string(),
                source,
            },
            FetchError::Aborted => AssetError::Cancelled,
        }
    }

    /// True for failures caused by the integrity gate.
    pub fn is_integrity(&self) -> bool {
        matches!(self, AssetError::Integrity(_))
    }
}
