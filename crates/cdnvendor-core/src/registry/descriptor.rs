//! Registry entry types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};

use super::RegistryError;

/// Coarse content type, used for filtering and grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Js,
    Css,
    #[default]
    Other,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Js => "js",
            AssetKind::Css => "css",
            AssetKind::Other => "other",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One known external asset: where it comes from and where it lives locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Unique, stable identifier.
    pub name: String,
    /// Absolute URL to fetch from.
    pub source_url: String,
    /// Path relative to the cache / output root (e.g. `glightbox/glightbox.min.js`).
    pub local_path: String,
    /// SRI-style `<algorithm>-<base64 digest>`; `None` skips verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// Informational upstream version.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kind: AssetKind,
}

impl AssetDescriptor {
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        local_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            local_path: local_path.into(),
            integrity: None,
            version: String::new(),
            kind: AssetKind::Other,
        }
    }

    pub fn with_integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_kind(mut self, kind: AssetKind) -> Self {
        self.kind = kind;
        self
    }

    /// Library name: first segment of `local_path`.
    pub fn library(&self) -> &str {
        self.local_path
            .split('/')
            .find(|s| !s.is_empty())
            .unwrap_or(&self.local_path)
    }

    pub fn relative_path(&self) -> &Path {
        Path::new(&self.local_path)
    }

    pub(super) fn validate(&self) -> Result<(), RegistryError> {
        validate_local_path(&self.name, &self.local_path)?;
        let parsed = url::Url::parse(&self.source_url).map_err(|e| RegistryError::InvalidUrl {
            name: self.name.clone(),
            url: self.source_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RegistryError::InvalidUrl {
                name: self.name.clone(),
                url: self.source_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(())
    }
}

/// Local paths must be relative, use `/`, and contain no empty, `.` or `..` segments.
fn validate_local_path(name: &str, local_path: &str) -> Result<(), RegistryError> {
    let unsafe_path = || RegistryError::UnsafePath {
        name: name.to_string(),
        path: local_path.to_string(),
    };
    if local_path.is_empty() || local_path.contains('\\') || local_path.contains('\0') {
        return Err(unsafe_path());
    }
    if !local_path
        .split('/')
        .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
    {
        return Err(unsafe_path());
    }
    if !Path::new(local_path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(unsafe_path());
    }
    Ok(())
}
