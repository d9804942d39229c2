//! engine::runner
//!
//! Engine runner - the entry points for target discovery and building.
//!
//! # Architecture
//!
//! ```text
//! Scan -> Resolve -> [List | Build each target] -> RunReport
//! ```
//!
//! [`discover`] performs the first two steps; [`run_targets`] dispatches
//! the builds. Neither exits the process: the outcome of a run is returned as
//! a [`RunReport`] and turned into an exit code at the very top of the CLI.
//!
//! # Concurrency
//!
//! Builds are independent (each has its own build directory), so
//! `run_targets` runs them on `jobs` scoped worker threads pulling from a
//! shared index. The only shared state is that index, the failure/stop flags
//! and the outcome list.
//!
//! # Invariants
//!
//! - Every target is built at most once; there are no retries
//! - With fail-fast, no target is *started* after a failure has been
//!   observed; builds already running finish and are reported
//! - With one job, targets are built in the order given

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use thiserror::Error;

use super::resolve::{resolve, Resolution};
use super::scan::{scan, ScanError, ScanOptions};
use crate::build::{BuildOutcome, Builder};
use crate::core::types::Target;

/// Errors from the engine runner.
#[derive(Debug, Error)]
pub enum RunError {
    /// Scan failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Scan a board tree and resolve its targets.
pub fn discover(boards_dir: &Path, options: &ScanOptions) -> Result<Resolution, RunError> {
    if options.debug {
        eprintln!("[debug] Step 1: Scan");
    }
    let scanned = scan(boards_dir, options)?;
    if options.debug && scanned.is_empty() {
        eprintln!(
            "[debug] No '*{}' files under {}",
            options.store.suffix(),
            boards_dir.display()
        );
    }

    if options.debug {
        eprintln!("[debug] Step 2: Resolve");
    }
    let resolution = resolve(&scanned);

    if options.debug {
        eprintln!(
            "[debug] Resolved {} targets ({} shields unresolved)",
            resolution.targets.len(),
            resolution.unresolved.len()
        );
    }

    Ok(resolution)
}

/// Build dispatch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Worker threads (at least 1).
    pub jobs: usize,
    /// Stop dispatching after the first failure.
    pub failfast: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            failfast: false,
        }
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Outcomes of every build that ran, in target order.
    pub outcomes: Vec<BuildOutcome>,
    /// Targets never started because fail-fast stopped the run.
    pub skipped: Vec<Target>,
    /// Whether fail-fast stopped the run.
    pub aborted: bool,
}

impl RunReport {
    /// Whether any build failed.
    pub fn any_failed(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Failed builds.
    pub fn failures(&self) -> impl Iterator<Item = &BuildOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Number of successful builds.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// One-line summary, e.g. `3 targets: 2 ok, 1 failed`.
    pub fn summary(&self) -> String {
        let total = self.outcomes.len() + self.skipped.len();
        let failed = self.failures().count();
        let mut line = format!(
            "{} target{}: {} ok, {} failed",
            total,
            if total == 1 { "" } else { "s" },
            self.succeeded(),
            failed
        );
        if !self.skipped.is_empty() {
            line.push_str(&format!(", {} skipped (failfast)", self.skipped.len()));
        }
        line
    }
}

/// Build every target with `builder`.
///
/// `on_outcome` is called once per finished build, from the worker thread
/// that ran it, as soon as the build ends.
///
/// # Example
///
/// ```
/// use boardsweep::build::mock::MockBuilder;
/// use boardsweep::core::types::{BoardId, Target};
/// use boardsweep::engine::runner::{run_targets, RunOptions};
///
/// let targets = vec![Target::board(BoardId::new("planck").unwrap())];
/// let report = run_targets(&targets, &MockBuilder::new(), RunOptions::default(), &|_| {});
/// assert!(!report.any_failed());
/// assert_eq!(report.summary(), "1 target: 1 ok, 0 failed");
/// ```
pub fn run_targets(
    targets: &[Target],
    builder: &dyn Builder,
    options: RunOptions,
    on_outcome: &(dyn Fn(&BuildOutcome) + Sync),
) -> RunReport {
    let workers = options.jobs.clamp(1, targets.len().max(1));
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let outcomes = Mutex::new(Vec::with_capacity(targets.len()));

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                let Some(target) = targets.get(next.fetch_add(1, Ordering::SeqCst)) else {
                    break;
                };

                let outcome = builder.build(target);
                on_outcome(&outcome);

                if !outcome.is_success() && options.failfast {
                    stop.store(true, Ordering::SeqCst);
                }
                outcomes
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(outcome);
            });
        }
    });

    let mut outcomes = outcomes
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    outcomes.sort_by(|a, b| a.target.cmp(&b.target));

    let skipped: Vec<Target> = targets
        .iter()
        .filter(|t| !outcomes.iter().any(|o| &o.target == *t))
        .cloned()
        .collect();

    RunReport {
        aborted: stop.load(Ordering::SeqCst),
        outcomes,
        skipped,
    }
}
