//! build::traits
//!
//! Builder trait definition and build outcome types.
//!
//! # Design
//!
//! A builder turns one [`Target`] into one [`BuildOutcome`]. Compile failures
//! are outcomes, not errors: the caller collects them and decides what the
//! run as a whole reports. Builders must be shareable across worker threads.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::types::Target;

/// A fully specified build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    /// Program to execute
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory of the child process
    pub cwd: PathBuf,
}

impl BuildInvocation {
    /// Human-readable command line, used in status lines.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for BuildInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// How a single build ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// The build tool exited successfully.
    Success,
    /// The build tool exited non-zero, was killed, or could not be started.
    Failure {
        /// Exit code, if the process ran to an exit.
        code: Option<i32>,
        /// Captured diagnostic output.
        diagnostics: String,
    },
}

/// Result of building one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// The target that was built.
    pub target: Target,
    /// The command line that was run.
    pub command_line: String,
    /// How it ended.
    pub status: BuildStatus,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl BuildOutcome {
    /// Whether the build succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.status, BuildStatus::Success)
    }

    /// Captured diagnostics of a failed build.
    pub fn diagnostics(&self) -> Option<&str> {
        match &self.status {
            BuildStatus::Failure { diagnostics, .. } => Some(diagnostics),
            BuildStatus::Success => None,
        }
    }
}

/// Something that can compile a target.
pub trait Builder: Send + Sync {
    /// Builder kind, for diagnostics (e.g. "west").
    fn name(&self) -> &'static str;

    /// Build one target and classify the result.
    fn build(&self, target: &Target) -> BuildOutcome;
}
