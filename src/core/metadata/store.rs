//! core::metadata::store
//!
//! Metadata files on disk.
//!
//! # Layout
//!
//! Metadata lives next to the board definition it describes, one file per
//! node, named `<stem><suffix>` (default suffix: [`DEFAULT_METADATA_SUFFIX`]).
//! This module finds those files in a single directory and loads them; the
//! recursive walk belongs to [`crate::engine::scan`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::{parse_descriptor, MetadataDescriptor, MetadataError};

/// Suffix of metadata files in a Zephyr/ZMK board tree.
pub const DEFAULT_METADATA_SUFFIX: &str = ".zmk.yml";

/// Errors from loading metadata files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file or directory could not be read.
    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file was read but its content is unusable.
    #[error("invalid metadata file '{path}'")]
    Invalid {
        path: PathBuf,
        source: MetadataError,
    },
}

/// A loaded metadata file with its location.
#[derive(Debug, Clone)]
pub struct MetadataEntry {
    /// Where the descriptor was read from.
    pub path: PathBuf,
    /// The parsed descriptor.
    pub descriptor: MetadataDescriptor,
}

/// Read-only access to the metadata files of one directory.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    suffix: String,
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new(DEFAULT_METADATA_SUFFIX)
    }
}

impl MetadataStore {
    /// Create a store matching files that end with `suffix`.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The file-name suffix this store matches.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether `path` names a metadata file (by name only).
    pub fn is_metadata_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(&self.suffix))
    }

    /// List metadata files directly inside `dir`, sorted by file name.
    ///
    /// Subdirectories are not descended into.
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let entries = fs::read_dir(dir).map_err(|e| StoreError::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Read {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && self.is_metadata_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Read and parse a single metadata file.
    pub fn read(&self, path: &Path) -> Result<MetadataEntry, StoreError> {
        let contents = fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let descriptor = parse_descriptor(&contents).map_err(|e| StoreError::Invalid {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(MetadataEntry {
            path: path.to_path_buf(),
            descriptor,
        })
    }

    /// Load every metadata file directly inside `dir`.
    pub fn read_dir(&self, dir: &Path) -> Result<Vec<MetadataEntry>, StoreError> {
        self.list(dir)?
            .iter()
            .map(|path| self.read(path))
            .collect()
    }
}
