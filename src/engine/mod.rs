//! engine
//!
//! Orchestrates the run lifecycle: Scan -> Resolve -> Build -> Report.
//!
//! # Architecture
//!
//! 1. **Scan**: Walk the board tree and classify every metadata file
//! 2. **Resolve**: Pair shields with interconnects, collect the target set
//! 3. **Build**: Hand each target to a [`crate::build::Builder`]
//! 4. **Report**: Return a [`RunReport`]; the CLI maps it to an exit code
//!
//! Data flows one way. Scanning and resolution never depend on build results,
//! and nothing below the CLI terminates the process.
//!
//! # Example
//!
//! ```no_run
//! use boardsweep::build::{BuildOutcome, WestBuilder};
//! use boardsweep::core::paths::AppPaths;
//! use boardsweep::engine::{discover, run_targets, RunOptions, ScanOptions};
//! use std::path::PathBuf;
//!
//! let paths = AppPaths::new(PathBuf::from("zmk/app"), "boards", "build");
//! let resolution = discover(&paths.boards_dir(), &ScanOptions::default())?;
//!
//! let builder = WestBuilder::new(paths);
//! let report = run_targets(&resolution.ordered(), &builder, RunOptions::default(), &|outcome: &BuildOutcome| {
//!     println!("{}: {}", outcome.command_line, if outcome.is_success() { "ok" } else { "fail" });
//! });
//! std::process::exit(if report.any_failed() { 1 } else { 0 });
//! # Ok::<(), boardsweep::engine::RunError>(())
//! ```

pub mod resolve;
pub mod runner;
pub mod scan;

pub use resolve::{resolve, Resolution, UnresolvedCompanion};
pub use runner::{discover, run_targets, RunError, RunOptions, RunReport};
pub use scan::{scan, ScanError, ScanOptions, ScanResult};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Application directory override (default: current directory).
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The application directory this run operates on.
    pub fn app_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
