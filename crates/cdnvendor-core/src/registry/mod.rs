//! Catalog of known external assets.
//!
//! A `Registry` is built once (from the built-in table or a TOML manifest),
//! validated, and then only read. It answers "what should exist" for the
//! cache; it never touches the filesystem or network itself.

mod builtin;
mod descriptor;
mod manifest;

pub use descriptor::{AssetDescriptor, AssetKind};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate asset name {0:?}")]
    DuplicateName(String),
    #[error("assets {first:?} and {second:?} share local path {path:?}")]
    DuplicatePath {
        first: String,
        second: String,
        path: String,
    },
    #[error("asset {name:?} has unsafe local path {path:?}")]
    UnsafePath { name: String, path: String },
    #[error("asset {name:?} has invalid source URL {url:?}: {reason}")]
    InvalidUrl {
        name: String,
        url: String,
        reason: String,
    },
    #[error("failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Immutable, validated asset catalog.
#[derive(Debug, Clone)]
pub struct Registry {
    assets: Vec<AssetDescriptor>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Validates and indexes `assets`, keeping their order.
    /// Names and local paths must be unique; local paths must be safe relative paths.
    pub fn new(assets: Vec<AssetDescriptor>) -> Result<Self, RegistryError> {
        let mut by_name = HashMap::with_capacity(assets.len());
        let mut paths: HashMap<&str, &str> = HashMap::with_capacity(assets.len());
        for (index, asset) in assets.iter().enumerate() {
            asset.validate()?;
            if by_name.insert(asset.name.clone(), index).is_some() {
                return Err(RegistryError::DuplicateName(asset.name.clone()));
            }
            if let Some(first) = paths.insert(asset.local_path.as_str(), asset.name.as_str()) {
                return Err(RegistryError::DuplicatePath {
                    first: first.to_string(),
                    second: asset.name.clone(),
                    path: asset.local_path.clone(),
                });
            }
        }
        Ok(Self { assets, by_name })
    }

    /// The default catalog of CDN libraries.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(builtin::assets())
    }

    /// Owned copy of every entry, in registry order.
    pub fn list_all(&self) -> Vec<AssetDescriptor> {
        self.assets.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.iter()
    }

    pub fn get(&self, name: &str) -> Option<&AssetDescriptor> {
        self.by_name.get(name).map(|&i| &self.assets[i])
    }

    pub fn list_by_kind(&self, kind: AssetKind) -> Vec<AssetDescriptor> {
        self.assets
            .iter()
            .filter(|a| a.kind == kind)
            .cloned()
            .collect()
    }

    /// Entries grouped by library (first segment of `local_path`), registry order within a group.
    pub fn group_by_library(&self) -> BTreeMap<String, Vec<AssetDescriptor>> {
        let mut groups: BTreeMap<String, Vec<AssetDescriptor>> = BTreeMap::new();
        for asset in &self.assets {
            groups
                .entry(asset.library().to_string())
                .or_default()
                .push(asset.clone());
        }
        groups
    }

    pub fn names(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.name.as_str()).collect()
    }

    /// Libraries present in the registry, sorted.
    pub fn libraries(&self) -> Vec<String> {
        let set: HashSet<&str> = self.assets.iter().map(|a| a.library()).collect();
        let mut libs: Vec<String> = set.into_iter().map(str::to_string).collect();
        libs.sort();
        libs
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
