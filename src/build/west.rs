//! build::west
//!
//! Builder that shells out to `west build`.
//!
//! # Invocation
//!
//! ```text
//! west build [-p] -b <board> -d <build_root>/<target> [extra args...] [-- -DSHIELD=<shield>]
//! ```
//!
//! The child runs in the application directory with its output captured.
//! Each target gets its own build directory, so several builders can run at
//! once without clobbering each other.

use std::process::{Command, Stdio};
use std::time::Instant;

use super::traits::{BuildInvocation, BuildOutcome, BuildStatus, Builder};
use crate::core::config::Config;
use crate::core::paths::AppPaths;
use crate::core::types::Target;

/// Separator between west options and CMake arguments.
const CMAKE_SEPARATOR: &str = "--";

/// `west build` driver.
#[derive(Debug, Clone)]
pub struct WestBuilder {
    program: String,
    pristine: bool,
    extra_args: Vec<String>,
    paths: AppPaths,
}

impl WestBuilder {
    /// Create a builder with defaults: `west`, pristine, no extra arguments.
    pub fn new(paths: AppPaths) -> Self {
        Self {
            program: "west".to_string(),
            pristine: true,
            extra_args: Vec::new(),
            paths,
        }
    }

    /// Create a builder from loaded configuration.
    pub fn from_config(config: &Config, paths: AppPaths) -> Self {
        Self::new(paths)
            .program(config.build_tool())
            .pristine(config.pristine())
            .extra_args(config.extra_args().to_vec())
    }

    /// Use a different build tool program.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Toggle pristine (`-p`) builds.
    pub fn pristine(mut self, pristine: bool) -> Self {
        self.pristine = pristine;
        self
    }

    /// Arguments appended after the board and build directory.
    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Compute the invocation for a target without running it.
    pub fn invocation(&self, target: &Target) -> BuildInvocation {
        let mut args = vec!["build".to_string()];
        if self.pristine {
            args.push("-p".to_string());
        }
        args.push("-b".to_string());
        args.push(target.board.to_string());
        args.push("-d".to_string());
        args.push(self.paths.build_dir(target).display().to_string());
        args.extend(self.extra_args.iter().cloned());

        if let Some(shield) = &target.shield {
            if !self.extra_args.iter().any(|a| a == CMAKE_SEPARATOR) {
                args.push(CMAKE_SEPARATOR.to_string());
            }
            args.push(format!("-DSHIELD={}", shield));
        }

        BuildInvocation {
            program: self.program.clone(),
            args,
            cwd: self.paths.app_dir().to_path_buf(),
        }
    }
}

impl Builder for WestBuilder {
    fn name(&self) -> &'static str {
        "west"
    }

    fn build(&self, target: &Target) -> BuildOutcome {
        let invocation = self.invocation(target);
        let started = Instant::now();

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .output();

        let status = match output {
            Ok(output) if output.status.success() => BuildStatus::Success,
            Ok(output) => BuildStatus::Failure {
                code: output.status.code(),
                diagnostics: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            },
            Err(e) => BuildStatus::Failure {
                code: None,
                diagnostics: format!("failed to run '{}': {}", invocation.program, e),
            },
        };

        BuildOutcome {
            target: target.clone(),
            command_line: invocation.command_line(),
            status,
            elapsed: started.elapsed(),
        }
    }
}
