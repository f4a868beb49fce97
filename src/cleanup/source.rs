//! Manifest discovery and multi-document parsing

use crate::resource::ManagedObject;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Well-formed YAML that is not a resource manifest
    #[error("document is not a resource manifest: {0}")]
    Document(#[source] serde_yaml::Error),
}

/// Trait for locating and reading manifest files
///
/// Production code uses `FsManifestSource`.
/// Tests use `MockManifestSource` which serves files from memory.
pub trait ManifestSource: Send + Sync {
    /// Expand the given paths into manifest files, keeping the supplied order
    fn resolve_files(&self, paths: &[PathBuf]) -> Vec<PathBuf>;

    /// Read the raw bytes of one resolved file
    fn read(&self, path: &Path) -> Result<Vec<u8>, ManifestError>;
}

/// Manifests on the local filesystem
///
/// Directories are walked recursively in name order; only `.yaml`, `.yml`
/// and `.json` files inside them are picked up. Paths that do not exist are
/// skipped with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestSource;

impl ManifestSource for FsManifestSource {
    fn resolve_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_dir() {
                if let Err(e) = collect_dir(path, &mut files) {
                    warn!(path = %path.display(), error = %e, "Failed to read manifest directory");
                }
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                warn!(path = %path.display(), "Manifest path does not exist");
            }
        }
        files
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, ManifestError> {
        std::fs::read(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            collect_dir(&entry, files)?;
        } else if is_manifest_file(&entry) {
            files.push(entry);
        }
    }
    Ok(())
}

fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MANIFEST_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Parse a YAML (or JSON) stream of one or more documents
///
/// Documents are yielded lazily in stream order; empty documents are skipped.
/// A document that is valid YAML but not a manifest yields `Document` and
/// the stream goes on. A syntax error yields `Parse`; nothing after it can be
/// trusted, so callers should stop consuming the stream.
pub fn parse_documents(
    bytes: &[u8],
) -> impl Iterator<Item = Result<ManagedObject, ManifestError>> + '_ {
    serde_yaml::Deserializer::from_slice(bytes).filter_map(|document| {
        match serde_yaml::Value::deserialize(document) {
            Ok(serde_yaml::Value::Null) => None,
            Ok(value) => {
                Some(serde_yaml::from_value::<ManagedObject>(value).map_err(ManifestError::Document))
            }
            Err(e) => Some(Err(ManifestError::from(e))),
        }
    })
}

/// In-memory manifest source for testing
#[cfg(test)]
#[derive(Default)]
pub struct MockManifestSource {
    files: Vec<(PathBuf, Result<Vec<u8>, String>)>,
}

#[cfg(test)]
impl MockManifestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files
            .push((PathBuf::from(path), Ok(contents.as_bytes().to_vec())));
        self
    }

    /// A file that resolves but cannot be read
    pub fn with_unreadable_file(mut self, path: &str) -> Self {
        self.files
            .push((PathBuf::from(path), Err("permission denied".to_string())));
        self
    }
}

#[cfg(test)]
impl ManifestSource for MockManifestSource {
    fn resolve_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .filter(|p| self.files.iter().any(|(path, _)| path == *p))
            .cloned()
            .collect()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, ManifestError> {
        match self.files.iter().find(|(p, _)| p == path) {
            Some((_, Ok(bytes))) => Ok(bytes.clone()),
            Some((_, Err(msg))) => Err(ManifestError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, msg.clone()),
            }),
            None => Err(ManifestError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}
