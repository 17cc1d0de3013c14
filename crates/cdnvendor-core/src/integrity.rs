//! Subresource-integrity style verification of downloaded bytes.
//!
//! Descriptors look like `sha384-<base64 digest>`. Verification runs inline
//! in the download path, before anything is written to the cache; an asset
//! without a descriptor is not verified.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("malformed integrity descriptor {0:?} (expected <algorithm>-<base64 digest>)")]
    Format(String),
    #[error("unsupported integrity algorithm {0:?}")]
    UnsupportedAlgorithm(String),
    #[error("integrity mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    pub fn token(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Raw digest of `bytes`.
    pub fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Algorithm::Sha256 => Sha256::digest(bytes).to_vec(),
            Algorithm::Sha384 => Sha384::digest(bytes).to_vec(),
            Algorithm::Sha512 => Sha512::digest(bytes).to_vec(),
        }
    }

    fn digest_reader(&self, reader: &mut impl Read) -> std::io::Result<Vec<u8>> {
        match self {
            Algorithm::Sha256 => hash_reader::<Sha256>(reader),
            Algorithm::Sha384 => hash_reader::<Sha384>(reader),
            Algorithm::Sha512 => hash_reader::<Sha512>(reader),
        }
    }
}

impl FromStr for Algorithm {
    type Err = IntegrityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Algorithm::Sha256),
            "sha384" => Ok(Algorithm::Sha384),
            "sha512" => Ok(Algorithm::Sha512),
            other => Err(IntegrityError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Parsed `<algorithm>-<base64 digest>` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integrity {
    pub algorithm: Algorithm,
    /// Base64 digest exactly as written in the descriptor.
    pub digest: String,
}

impl Integrity {
    pub fn parse(descriptor: &str) -> Result<Self, IntegrityError> {
        let descriptor = descriptor.trim();
        let (algo, digest) = descriptor
            .split_once('-')
            .ok_or_else(|| IntegrityError::Format(descriptor.to_string()))?;
        if algo.is_empty() || digest.is_empty() {
            return Err(IntegrityError::Format(descriptor.to_string()));
        }
        Ok(Integrity {
            algorithm: algo.parse()?,
            digest: digest.to_string(),
        })
    }

    /// Hash `bytes` with this descriptor's algorithm and compare the base64 forms.
    pub fn check(&self, bytes: &[u8]) -> Result<(), IntegrityError> {
        let actual = STANDARD.encode(self.algorithm.digest(bytes));
        if actual.as_bytes() != self.digest.as_bytes() {
            return Err(IntegrityError::Mismatch {
                expected: self.to_string(),
                actual: format!("{}-{}", self.algorithm, actual),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.algorithm, self.digest)
    }
}

/// Verify `bytes` against an optional descriptor. `None` or a blank descriptor passes.
pub fn verify(bytes: &[u8], descriptor: Option<&str>) -> Result<(), IntegrityError> {
    match descriptor.map(str::trim) {
        None | Some("") => Ok(()),
        Some(d) => Integrity::parse(d)?.check(bytes),
    }
}

/// SRI descriptor for `bytes`.
pub fn compute(bytes: &[u8], algorithm: Algorithm) -> String {
    format!("{}-{}", algorithm, STANDARD.encode(algorithm.digest(bytes)))
}

/// SRI descriptor of a file, read in chunks so large files stay out of memory.
pub fn compute_path(path: &Path, algorithm: Algorithm) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let digest = algorithm
        .digest_reader(&mut f)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(format!("{}-{}", algorithm, STANDARD.encode(digest)))
}

fn hash_reader<D: Digest>(reader: &mut impl Read) -> std::io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}
