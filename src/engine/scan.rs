//! engine::scan
//!
//! Board tree scanning and node classification.
//!
//! # Architecture
//!
//! The scanner walks a board tree and produces a [`ScanResult`] containing:
//! - Plain boards, as shield-less [`Target`]s
//! - Interconnects: board id -> exposed bus
//! - Companions (shields): shield id -> required bus
//!
//! The walk is depth-first and post-order: a directory's children are scanned
//! before its own metadata files. Every level returns a fresh `ScanResult` and
//! parents merge what their children return; nothing is accumulated through
//! shared mutable state.
//!
//! # Invariants
//!
//! - Scan is read-only
//! - Scan is deterministic given the same tree (children are visited in
//!   file-name order, but the result is a set/map projection either way)
//! - An interconnect is never also recorded as a plain board
//! - The first bad metadata file aborts the scan with its path

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::metadata::{MetadataDescriptor, MetadataStore, Role, StoreError};
use crate::core::types::{BoardId, BusId, Target};

/// Deepest directory nesting followed below the scan root.
///
/// Board trees are a handful of levels deep; hitting this means a symlink loop.
pub const MAX_SCAN_DEPTH: usize = 64;

/// Errors from scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root is missing or not a directory.
    #[error("board directory '{0}' does not exist or is not a directory")]
    NotADirectory(PathBuf),

    /// A directory listing failed.
    #[error("failed to list directory '{path}'")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Nesting exceeded [`MAX_SCAN_DEPTH`].
    #[error("directory nesting too deep at '{0}' (symlink loop?)")]
    TooDeep(PathBuf),

    /// A metadata file could not be read or is malformed.
    #[error(transparent)]
    Metadata(#[from] StoreError),
}

/// Scanner settings.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Matches and reads metadata files.
    pub store: MetadataStore,
    /// Top-level directory names that are never entered.
    pub skip_dirs: Vec<String>,
    /// Trace progress on stderr.
    pub debug: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            store: MetadataStore::default(),
            skip_dirs: vec!["interconnects".to_string()],
            debug: false,
        }
    }
}

/// The three collections a scan produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Plain boards, each as a `(id, None)` target.
    pub boards: Vec<Target>,
    /// Interconnect board id -> exposed bus.
    pub exposes: BTreeMap<BoardId, BusId>,
    /// Companion id -> required bus.
    pub requires: BTreeMap<BoardId, BusId>,
    /// Number of metadata files read.
    pub files_scanned: usize,
}

impl ScanResult {
    /// Whether the scan found no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty() && self.exposes.is_empty() && self.requires.is_empty()
    }

    /// Fold another result into this one. Later map entries win.
    pub fn merge(&mut self, other: ScanResult) {
        self.boards.extend(other.boards);
        self.exposes.extend(other.exposes);
        self.requires.extend(other.requires);
        self.files_scanned += other.files_scanned;
    }

    /// Record one classified node.
    pub fn record(&mut self, descriptor: MetadataDescriptor) {
        self.files_scanned += 1;
        match descriptor.role {
            Role::Interconnect { bus } => {
                self.exposes.insert(descriptor.primary_id, bus);
            }
            Role::Companion { bus } => {
                for id in descriptor.sibling_ids {
                    self.requires.insert(id, bus.clone());
                }
            }
            Role::Board => {
                self.boards
                    .extend(descriptor.sibling_ids.into_iter().map(Target::board));
            }
        }
    }
}

/// Scan a board tree.
///
/// Only directories directly under `root` are walked: files at the root
/// (shared overlays) are ignored, as are directories named in
/// `options.skip_dirs`.
///
/// # Errors
///
/// - `NotADirectory` if `root` is not a directory
/// - `Metadata` for the first unreadable or malformed metadata file
/// - `ReadDir` / `TooDeep` for problems walking the tree
pub fn scan(root: &Path, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    if options.debug {
        eprintln!("[debug] Scanning {}", root.display());
    }

    let mut result = ScanResult::default();
    for child in child_dirs(root)? {
        let skipped = child
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| options.skip_dirs.iter().any(|s| s == name));
        if skipped {
            if options.debug {
                eprintln!("[debug] Skipping {}", child.display());
            }
            continue;
        }

        result.merge(scan_dir(&child, options, 1)?);
    }

    if options.debug {
        eprintln!(
            "[debug] Scan found {} metadata files: {} boards, {} interconnects, {} shields",
            result.files_scanned,
            result.boards.len(),
            result.exposes.len(),
            result.requires.len()
        );
    }

    Ok(result)
}

/// Scan one directory: children first, then its own metadata files.
fn scan_dir(dir: &Path, options: &ScanOptions, depth: usize) -> Result<ScanResult, ScanError> {
    if depth > MAX_SCAN_DEPTH {
        return Err(ScanError::TooDeep(dir.to_path_buf()));
    }

    let mut result = ScanResult::default();
    for child in child_dirs(dir)? {
        result.merge(scan_dir(&child, options, depth + 1)?);
    }

    for entry in options.store.read_dir(dir)? {
        if options.debug {
            eprintln!(
                "[debug] {}: {} ({:?})",
                entry.path.display(),
                entry.descriptor.primary_id,
                entry.descriptor.role
            );
        }
        result.record(entry.descriptor);
    }

    Ok(result)
}

/// Subdirectories of `dir`, sorted by name.
fn child_dirs(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
