//! Tests for the `assets` subcommands.

use super::parse;
use crate::cli::{AssetsCommand, CliCommand};
use std::path::Path;

fn assets_action(args: &[&str]) -> AssetsCommand {
    match parse(args).command {
        CliCommand::Assets { action } => action,
        other => panic!("expected Assets, got {other:?}"),
    }
}

#[test]
fn cli_parse_download_all() {
    match assets_action(&["cdnvendor", "assets", "download"]) {
        AssetsCommand::Download { names, concurrency } => {
            assert!(names.is_empty());
            assert!(concurrency.is_none());
        }
        other => panic!("expected Download, got {other:?}"),
    }
}

#[test]
fn cli_parse_download_selected() {
    match assets_action(&[
        "cdnvendor",
        "assets",
        "download",
        "katex-js",
        "katex-css",
        "--concurrency",
        "8",
    ]) {
        AssetsCommand::Download { names, concurrency } => {
            assert_eq!(names, ["katex-js", "katex-css"]);
            assert_eq!(concurrency, Some(8));
        }
        other => panic!("expected Download, got {other:?}"),
    }
}

#[test]
fn cli_parse_list() {
    match assets_action(&["cdnvendor", "assets", "list"]) {
        AssetsCommand::List { json } => assert!(!json),
        other => panic!("expected List, got {other:?}"),
    }
    match assets_action(&["cdnvendor", "assets", "list", "--json"]) {
        AssetsCommand::List { json } => assert!(json),
        other => panic!("expected List --json, got {other:?}"),
    }
}

#[test]
fn cli_parse_clean() {
    assert!(matches!(
        assets_action(&["cdnvendor", "assets", "clean"]),
        AssetsCommand::Clean
    ));
}

#[test]
fn cli_parse_publish() {
    match assets_action(&["cdnvendor", "assets", "publish", "public/vendor"]) {
        AssetsCommand::Publish { output_dir, name } => {
            assert_eq!(output_dir, Path::new("public/vendor"));
            assert!(name.is_none());
        }
        other => panic!("expected Publish, got {other:?}"),
    }
    match assets_action(&["cdnvendor", "assets", "publish", "out", "mermaid-js"]) {
        AssetsCommand::Publish { output_dir, name } => {
            assert_eq!(output_dir, Path::new("out"));
            assert_eq!(name.as_deref(), Some("mermaid-js"));
        }
        other => panic!("expected Publish with a name, got {other:?}"),
    }
}

#[test]
fn cli_rejects_bad_concurrency() {
    use clap::Parser;
    assert!(crate::cli::Cli::try_parse_from([
        "cdnvendor",
        "assets",
        "download",
        "--concurrency",
        "-1",
    ])
    .is_err());
}
