//! Disk I/O for cache and output files.
//!
//! Every write goes to a uniquely named `.part` sibling first, is synced, and
//! is then renamed over the final name. A reader never observes a partially
//! written asset, and two writers targeting the same path never share a temp
//! file (the last rename wins).

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Create the parent directory of `path` (and its ancestors) if missing.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Open a fresh temp file next to `final_path`, named `<file name>.<random>.part`.
/// The file is deleted on drop unless persisted.
fn part_file(
    final_path: &Path,
    permissions: Option<fs::Permissions>,
) -> io::Result<NamedTempFile> {
    let dir = match final_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut prefix = final_path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    prefix.push(".");

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(TEMP_SUFFIX);
    if let Some(permissions) = permissions {
        builder.permissions(permissions);
    }
    builder.tempfile_in(dir)
}

fn persist(tmp: NamedTempFile, final_path: &Path) -> io::Result<()> {
    tmp.as_file().sync_all()?;
    tmp.persist(final_path).map(drop).map_err(|e| e.error)
}

/// Write `data` to `final_path` via temp file + fsync + rename.
/// The temp file is removed if any step fails.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp = part_file(final_path, default_permissions())?;
    tmp.write_all(data)?;
    persist(tmp, final_path)
}

/// Copy `src` to `dst` byte-for-byte, creating `dst`'s parent directories.
/// Keeps the source's permissions. Returns the number of bytes copied.
pub fn copy_atomic(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut input = File::open(src)?;
    let permissions = input.metadata()?.permissions();
    ensure_parent(dst)?;
    let mut tmp = part_file(dst, cfg!(unix).then_some(permissions))?;
    let n = io::copy(&mut input, &mut tmp)?;
    persist(tmp, dst)?;
    Ok(n)
}
