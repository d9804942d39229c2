//! core::paths
//!
//! Centralized path routing for an application directory.
//!
//! # Layout
//!
//! Everything is relative to the application directory (the directory the
//! build tool runs in):
//! - `boards/` - Board tree scanned for metadata (configurable)
//! - `build/<target>/` - One build directory per target (configurable root)
//! - `.boardsweep.toml` - Project configuration
//!
//! Absolute configured paths are used as-is.
//!
//! # Example
//!
//! ```
//! use boardsweep::core::paths::AppPaths;
//! use boardsweep::core::types::{BoardId, Target};
//! use std::path::PathBuf;
//!
//! let paths = AppPaths::new(PathBuf::from("/zmk/app"), "boards", "build");
//! assert_eq!(paths.boards_dir(), PathBuf::from("/zmk/app/boards"));
//!
//! let target = Target::board(BoardId::new("planck").unwrap());
//! assert_eq!(paths.build_dir(&target), PathBuf::from("/zmk/app/build/planck"));
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::Target;

/// Path routing for one application directory.
///
/// No other module should join board or build directories by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    app_dir: PathBuf,
    boards_dir: PathBuf,
    build_root: PathBuf,
}

impl AppPaths {
    /// Create paths for `app_dir` with the given (possibly relative)
    /// boards directory and build root.
    pub fn new(app_dir: PathBuf, boards_dir: impl AsRef<Path>, build_root: impl AsRef<Path>) -> Self {
        let boards_dir = app_dir.join(boards_dir);
        let build_root = app_dir.join(build_root);
        Self {
            app_dir,
            boards_dir,
            build_root,
        }
    }

    /// Replace the boards directory (e.g. from `--boards-dir`).
    pub fn with_boards_dir(mut self, boards_dir: impl AsRef<Path>) -> Self {
        self.boards_dir = self.app_dir.join(boards_dir);
        self
    }

    /// Directory the build tool runs in.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Root of the scanned board tree.
    pub fn boards_dir(&self) -> PathBuf {
        self.boards_dir.clone()
    }

    /// Parent of all per-target build directories.
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Build directory for a single target.
    ///
    /// The directory name is [`Target::slug`], which is unique per target,
    /// so builds can run side by side.
    pub fn build_dir(&self, target: &Target) -> PathBuf {
        self.build_root.join(target.slug())
    }
}
