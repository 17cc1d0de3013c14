//! User-supplied registry manifests (`[[asset]]` tables in TOML).

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{AssetDescriptor, Registry, RegistryError};

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "asset")]
    assets: Vec<AssetDescriptor>,
}

impl Registry {
    /// Parse a manifest such as:
    ///
    /// ```toml
    /// [[asset]]
    /// name = "glightbox-js"
    /// source_url = "https://cdn.jsdelivr.net/npm/glightbox@3.3.0/dist/js/glightbox.min.js"
    /// local_path = "glightbox/glightbox.min.js"
    /// integrity = "sha384-..."
    /// version = "3.3.0"
    /// kind = "js"
    /// ```
    pub fn from_toml_str(data: &str) -> Result<Self, RegistryError> {
        let manifest: Manifest = toml::from_str(data)?;
        Self::new(manifest.assets)
    }

    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let data = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AssetKind;

    #[test]
    fn parses_manifest_with_defaults() {
        let data = r#"
            [[asset]]
            name = "lib-js"
            source_url = "https://example.test/lib.js"
            local_path = "lib/lib.js"

            [[asset]]
            name = "lib-css"
            source_url = "https://example.test/lib.css"
            local_path = "lib/lib.css"
            integrity = "sha256-LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="
            version = "1.2.3"
            kind = "css"
        "#;
        let reg = Registry::from_toml_str(data).unwrap();
        assert_eq!(reg.names(), ["lib-js", "lib-css"]);
        let js = reg.get("lib-js").unwrap();
        assert!(js.integrity.is_none());
        assert_eq!(js.kind, AssetKind::Other);
        let css = reg.get("lib-css").unwrap();
        assert_eq!(css.kind, AssetKind::Css);
        assert_eq!(css.version, "1.2.3");
        assert!(css.integrity.as_deref().unwrap().starts_with("sha256-"));
    }

    #[test]
    fn empty_manifest_is_empty_registry() {
        let reg = Registry::from_toml_str("").unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn manifest_entries_are_validated() {
        let data = r#"
            [[asset]]
            name = "evil"
            source_url = "https://example.test/x.js"
            local_path = "../outside.js"
        "#;
        assert!(matches!(
            Registry::from_toml_str(data),
            Err(RegistryError::UnsafePath { .. })
        ));
        assert!(matches!(
            Registry::from_toml_str("[[asset]]\nname = 1"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::from_path(&dir.path().join("assets.toml")).unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }));
    }
}
