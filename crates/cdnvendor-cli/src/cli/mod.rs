//! CLI for caching and publishing vendored CDN assets.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cdnvendor_core::config::{self, VendorConfig};
use cdnvendor_core::integrity::Algorithm;
use std::path::PathBuf;

use commands::{
    run_clean, run_completions, run_download, run_integrity, run_list, run_publish,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cdnvendor", version)]
#[command(about = "Cache third-party CDN assets locally and publish them with a static site", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/cdnvendor/config.toml, created on first run).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log detail (-v, -vv). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Manage the local asset cache.
    Assets {
        #[command(subcommand)]
        action: AssetsCommand,
    },

    /// Print the SRI integrity string of a file (for filling in registry hashes).
    Integrity {
        /// Path to the file.
        path: PathBuf,
        /// Digest algorithm.
        #[arg(long, value_enum, default_value_t = DigestAlgorithm::Sha384)]
        algorithm: DigestAlgorithm,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// SRI digest algorithms accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl From<DigestAlgorithm> for Algorithm {
    fn from(value: DigestAlgorithm) -> Self {
        match value {
            DigestAlgorithm::Sha256 => Algorithm::Sha256,
            DigestAlgorithm::Sha384 => Algorithm::Sha384,
            DigestAlgorithm::Sha512 => Algorithm::Sha512,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AssetsCommand {
    /// Download registry assets into the cache (all of them unless names are given).
    Download {
        /// Asset names; defaults to every registry entry.
        names: Vec<String>,
        /// Parallel downloads (default from config, else 4).
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },

    /// Show cache status of every registry asset.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Delete the whole asset cache.
    Clean,

    /// Copy cached assets into a site output directory.
    Publish {
        /// Output root; assets land at OUTPUT_DIR/<local path>.
        output_dir: PathBuf,
        /// Publish only this asset (must be cached).
        name: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub async fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Assets { action } => {
                let cfg = load_config(self.config.as_deref())?;
                tracing::debug!("loaded config: {:?}", cfg);
                match action {
                    AssetsCommand::Download { names, concurrency } => {
                        run_download(&cfg, &names, concurrency).await?
                    }
                    AssetsCommand::List { json } => run_list(&cfg, json).await?,
                    AssetsCommand::Clean => run_clean(&cfg).await?,
                    AssetsCommand::Publish { output_dir, name } => {
                        run_publish(&cfg, &output_dir, name.as_deref()).await?
                    }
                }
            }
            CliCommand::Integrity { path, algorithm } => {
                run_integrity(&path, algorithm.into()).await?
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }
        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<VendorConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
