//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and merges CLI overrides
//! 2. Calls the engine to do the work
//! 3. Formats and displays output
//!
//! Handlers never exit the process; they report a [`CommandStatus`].

mod compile_everything;
mod completion;
mod config_cmd;

// Re-export command functions for testing and direct invocation
pub use compile_everything::{compile_everything, CompileOptions};
pub use completion::completion;
pub use config_cmd::show as config_show;

use crate::cli::args::{flag_pair, Command};
use crate::cli::CommandStatus;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<CommandStatus> {
    match command {
        Command::CompileEverything {
            verbose,
            no_verbose,
            failfast,
            no_failfast,
            list,
            no_list,
            jobs,
            boards_dir,
        } => {
            let options = CompileOptions {
                verbose: flag_pair(verbose, no_verbose),
                failfast: flag_pair(failfast, no_failfast),
                list: flag_pair(list, no_list).unwrap_or(false),
                jobs: jobs.map(|j| j.get()),
                boards_dir,
            };
            compile_everything::compile_everything(ctx, &options)
        }
        Command::Config => config_cmd::show(ctx).map(|()| CommandStatus::Success),
        Command::Completion { shell } => {
            completion::completion(shell).map(|()| CommandStatus::Success)
        }
    }
}
