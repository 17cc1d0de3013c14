//! Tests for global flags, integrity and completions.

use super::parse;
use crate::cli::{CliCommand, DigestAlgorithm};
use cdnvendor_core::integrity::Algorithm;
use std::path::Path;

#[test]
fn cli_parse_global_flags() {
    let cli = parse(&["cdnvendor", "-vv", "assets", "list", "--config", "site/cdnvendor.toml"]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some(Path::new("site/cdnvendor.toml")));
}

#[test]
fn cli_parse_integrity_default_algorithm() {
    match parse(&["cdnvendor", "integrity", "dist/app.js"]).command {
        CliCommand::Integrity { path, algorithm } => {
            assert_eq!(path, Path::new("dist/app.js"));
            assert_eq!(algorithm, DigestAlgorithm::Sha384);
        }
        other => panic!("expected Integrity, got {other:?}"),
    }
}

#[test]
fn cli_parse_integrity_algorithm() {
    match parse(&["cdnvendor", "integrity", "a.css", "--algorithm", "sha512"]).command {
        CliCommand::Integrity { algorithm, .. } => {
            assert_eq!(Algorithm::from(algorithm), Algorithm::Sha512)
        }
        other => panic!("expected Integrity, got {other:?}"),
    }
}

#[test]
fn cli_rejects_unknown_algorithm() {
    use clap::Parser;
    let err = crate::cli::Cli::try_parse_from([
        "cdnvendor",
        "integrity",
        "a.css",
        "--algorithm",
        "md5",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    let msg = err.to_string();
    assert!(msg.contains("sha256") && msg.contains("sha512"), "{msg}");
}

#[test]
fn cli_parse_completions() {
    match parse(&["cdnvendor", "completions", "bash"]).command {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        other => panic!("expected Completions, got {other:?}"),
    }
}

#[test]
fn cli_requires_subcommand() {
    use clap::Parser;
    assert!(crate::cli::Cli::try_parse_from(["cdnvendor"]).is_err());
    assert!(crate::cli::Cli::try_parse_from(["cdnvendor", "assets"]).is_err());
}
