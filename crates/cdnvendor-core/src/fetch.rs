//! Single HTTP GET into memory.
//!
//! Uses the curl crate (libcurl). Assets are small library bundles, so the
//! whole body is buffered and handed back for verification before anything
//! touches the disk. Runs on the calling thread.

use std::time::Duration;

use crate::control::CancelToken;

/// Default per-asset transfer timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: u32 = 10;

/// `User-Agent` sent with every request.
pub fn default_user_agent() -> String {
    format!("cdnvendor/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Whole-transfer timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The cancel token was set before or during the transfer.
    #[error("transfer aborted")]
    Aborted,
}

/// GET `url` and return the full body. Non-2xx responses are errors and their
/// body is discarded.
pub fn fetch_bytes(
    url: &str,
    opts: &FetchOptions,
    cancel: &CancelToken,
) -> Result<Vec<u8>, FetchError> {
    if cancel.is_cancelled() {
        return Err(FetchError::Aborted);
    }

    let mut body = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(CONNECT_TIMEOUT.min(opts.timeout))?;
    easy.timeout(opts.timeout)?;
    // Progress callbacks are how a running transfer notices cancellation.
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
        if let Err(e) = transfer.perform() {
            if e.is_aborted_by_callback() {
                return Err(FetchError::Aborted);
            }
            return Err(FetchError::Curl(e));
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}
