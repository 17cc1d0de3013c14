//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! `RUST_LOG` always wins; otherwise the directives come from the CLI
//! verbosity count.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter directives for a `-v` count when `RUST_LOG` is unset.
pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info,cdnvendor_core=debug,cdnvendor=debug",
        1 => "info,cdnvendor_core=trace,cdnvendor=trace",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)))
}

/// Writer that is either the log file or stderr (used when the file handle can't be cloned).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct AppendFile(fs::File);

impl<'a> MakeWriter<'a> for AppendFile {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// `~/.local/state/cdnvendor/cdnvendor.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdnvendor")?;
    Ok(xdg_dirs.get_state_home().join("cdnvendor.log"))
}

/// Initialize structured logging appended to `log_file_path()` and return that path.
/// On failure (e.g. state dir unwritable) returns Err so the caller can fall back to stderr.
pub fn init_logging(verbosity: u8) -> Result<PathBuf> {
    let log_file_path = log_file_path()?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(BoxMakeWriter::new(AppendFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("cdnvendor logging initialized at {}", log_file_path.display());
    Ok(log_file_path)
}

/// Initialize logging to stderr only. Use when `init_logging` fails so the CLI keeps running.
pub fn init_logging_stderr(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_detail() {
        assert!(default_directives(0).starts_with("info"));
        assert!(default_directives(1).contains("cdnvendor_core=trace"));
        assert_eq!(default_directives(2), "trace");
        assert_eq!(default_directives(9), "trace");
    }

    #[test]
    fn directives_parse() {
        for v in 0..3 {
            assert!(EnvFilter::try_new(default_directives(v)).is_ok());
        }
    }
}
