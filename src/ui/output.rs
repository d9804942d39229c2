//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Results go to stdout; warnings, errors, failures and debug traces go to
//! stderr. Everything except errors and failures respects the quiet flag.

use std::fmt::Display;

use crate::build::BuildOutcome;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Whether debug traces are enabled.
    pub fn is_debug(self) -> bool {
        self == Verbosity::Debug
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Status line for a finished build.
///
/// Successes go to stdout and respect quiet mode; failures always go to
/// stderr, followed by the captured diagnostics when `show_diagnostics` is set.
/// Build time is only reported in debug mode.
pub fn build_status(outcome: &BuildOutcome, show_diagnostics: bool, verbosity: Verbosity) {
    debug(
        format!(
            "{} finished in {:.1}s",
            outcome.target,
            outcome.elapsed.as_secs_f64()
        ),
        verbosity,
    );

    if outcome.is_success() {
        print(format_status(outcome), verbosity);
        return;
    }

    let mut message = format_status(outcome);
    if show_diagnostics {
        if let Some(diagnostics) = outcome.diagnostics().filter(|d| !d.is_empty()) {
            message.push('\n');
            message.push_str(diagnostics);
        }
    }
    // One write per failure keeps parallel builds from interleaving lines.
    eprintln!("{}", message);
}

/// Format the one-line status of a build: `<command line>: ok|fail`.
pub fn format_status(outcome: &BuildOutcome) -> String {
    let verdict = if outcome.is_success() { "ok" } else { "fail" };
    format!("{}: {}", outcome.command_line, verdict)
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
