//! `cdnvendor integrity <path>` – print a file's SRI string.

use anyhow::Result;
use cdnvendor_core::integrity::{self, Algorithm};
use std::path::Path;

pub async fn run_integrity(path: &Path, algorithm: Algorithm) -> Result<()> {
    let sri = integrity::compute_path(path, algorithm)?;
    println!("{}  {}", sri, path.display());
    Ok(())
}
