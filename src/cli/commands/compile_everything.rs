//! compile-everything command - Discover and build every target

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::build::{BuildOutcome, Builder, WestBuilder};
use crate::cli::CommandStatus;
use crate::core::config::{Config, ConfigLoadResult};
use crate::core::metadata::MetadataStore;
use crate::core::paths::AppPaths;
use crate::engine::{discover, run_targets, Context, RunOptions, ScanOptions};
use crate::ui::output::{self, Verbosity};

/// Options for `compile-everything`, after flag pairs are resolved.
///
/// `None` means "use the configured default".
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Print diagnostics of failed builds.
    pub verbose: Option<bool>,
    /// Stop after the first failed build.
    pub failfast: Option<bool>,
    /// Print targets as JSON instead of building.
    pub list: bool,
    /// Parallel builds.
    pub jobs: Option<usize>,
    /// Boards directory override.
    pub boards_dir: Option<PathBuf>,
}

/// Discover every target and build it (or list it with `--list`).
///
/// Returns `BuildsFailed` if any build failed. Listing always succeeds once
/// targets are resolved.
pub fn compile_everything(ctx: &Context, options: &CompileOptions) -> Result<CommandStatus> {
    let app_dir = ctx
        .app_dir()
        .context("Failed to determine the application directory")?;
    let loaded = Config::load(Some(&app_dir)).context("Failed to load configuration")?;
    compile_with_config(ctx, options, app_dir, loaded)
}

/// Body of [`compile_everything`] once configuration is loaded.
fn compile_with_config(
    ctx: &Context,
    options: &CompileOptions,
    app_dir: PathBuf,
    loaded: ConfigLoadResult,
) -> Result<CommandStatus> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    for warning in &loaded.warnings {
        output::warn(&warning.message, verbosity);
    }
    let config = loaded.config;

    let mut paths = AppPaths::new(app_dir, config.boards_dir(), config.build_root());
    if let Some(dir) = &options.boards_dir {
        paths = paths.with_boards_dir(dir);
    }

    let scan_options = ScanOptions {
        store: MetadataStore::new(config.metadata_suffix()),
        skip_dirs: config.skip_dirs(),
        debug: verbosity.is_debug(),
    };
    let boards_dir = paths.boards_dir();
    let resolution = discover(&boards_dir, &scan_options)
        .with_context(|| format!("Failed to collect targets from '{}'", boards_dir.display()))?;

    for unresolved in &resolution.unresolved {
        output::warn(unresolved, verbosity);
    }

    let targets = resolution.ordered();

    if options.list {
        let json = serde_json::to_string(&targets).context("Failed to serialize targets")?;
        println!("{}", json);
        return Ok(CommandStatus::Success);
    }

    if targets.is_empty() {
        output::warn(
            format!("no targets found under '{}'", boards_dir.display()),
            verbosity,
        );
        return Ok(CommandStatus::Success);
    }

    let verbose = options.verbose.unwrap_or_else(|| config.verbose());
    let run_options = RunOptions {
        jobs: options.jobs.unwrap_or_else(|| config.jobs()),
        failfast: options.failfast.unwrap_or_else(|| config.failfast()),
    };

    output::debug(
        format!("Build directories go under {}", paths.build_root().display()),
        verbosity,
    );
    let builder = WestBuilder::from_config(&config, paths);
    output::debug(
        format!(
            "Building {} targets with {} ({} jobs, failfast: {})",
            targets.len(),
            builder.name(),
            run_options.jobs,
            run_options.failfast
        ),
        verbosity,
    );

    let report = run_targets(&targets, &builder, run_options, &|outcome: &BuildOutcome| {
        output::build_status(outcome, verbose, verbosity);
    });

    if report.aborted && !report.skipped.is_empty() {
        output::warn(
            format!(
                "stopped after the first failure; {} targets not built",
                report.skipped.len()
            ),
            verbosity,
        );
    }
    output::print(report.summary(), verbosity);

    Ok(if report.any_failed() {
        CommandStatus::BuildsFailed
    } else {
        CommandStatus::Success
    })
}
