//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Use that directory as the application directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! # Paired Flags
//!
//! Boolean run options come in `--flag` / `--no-flag` pairs. The last one on
//! the command line wins; when neither is given the configured default
//! applies.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// boardsweep - (Try to) compile every board and shield in a firmware tree
#[derive(Parser, Debug)]
#[command(name = "boardsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Application directory (the one containing `boards/`); defaults to the current directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Resolve a `--flag` / `--no-flag` pair.
///
/// Returns `None` when neither was given.
pub fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// (Try to) compile every board and shield configuration
    #[command(
        name = "compile-everything",
        visible_alias = "compile_everything",
        long_about = "(Try to) compile every board and shield configuration.\n\n\
            Scans the board tree for metadata files, pairs every shield with a board \
            exposing the connector it requires, and runs the build tool once per \
            resulting target. Each target builds in its own directory under the \
            build root. The command exits non-zero if any target fails.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Build everything, printing compiler errors for failures
    boardsweep compile-everything

    # Stop at the first broken target
    boardsweep compile-everything --failfast

    # Just list the targets (e.g. to fan out a CI matrix)
    boardsweep compile-everything --list

    # Four builds at a time, status lines only
    boardsweep compile-everything -j 4 --no-verbose

OUTPUT:
    west build -p -b planck -d build/planck: ok
    west build -p -b nice_nano_v2 -d build/nice_nano_v2-corne_left -- -DSHIELD=corne_left: fail"
    )]
    CompileEverything {
        /// Print the build tool's diagnostics for failed builds (default)
        #[arg(long, overrides_with = "no_verbose")]
        verbose: bool,

        /// Only print status lines for failed builds
        #[arg(long, overrides_with = "verbose")]
        no_verbose: bool,

        /// Stop after the first failed build
        #[arg(long, overrides_with = "no_failfast")]
        failfast: bool,

        /// Keep building after failures (default)
        #[arg(long, overrides_with = "failfast")]
        no_failfast: bool,

        /// Print the targets as a JSON array instead of building them
        #[arg(long, overrides_with = "no_list")]
        list: bool,

        /// Build the targets (default)
        #[arg(long, overrides_with = "list")]
        no_list: bool,

        /// Number of builds to run in parallel
        #[arg(short, long, value_name = "N")]
        jobs: Option<NonZeroUsize>,

        /// Scan this directory instead of the configured boards directory
        #[arg(long, value_name = "DIR")]
        boards_dir: Option<PathBuf>,
    },

    /// Show the effective configuration
    #[command(
        name = "config",
        long_about = "Show the effective configuration.\n\n\
            Prints every setting after merging built-in defaults, the global config \
            file and the project config file, together with the files that were read."
    )]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash
    boardsweep completion bash > ~/.local/share/bash-completion/completions/boardsweep

    # Zsh
    boardsweep completion zsh > \"${fpath[1]}/_boardsweep\""
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
