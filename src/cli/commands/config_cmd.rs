//! config command - Show the effective configuration

use std::path::Path;

use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Print every setting after precedence is applied.
pub fn show(ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let app_dir = ctx
        .app_dir()
        .context("Failed to determine the application directory")?;
    let loaded = Config::load(Some(&app_dir)).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        output::warn(&warning.message, verbosity);
    }

    println!("{}", render(&loaded.config));
    Ok(())
}

fn source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string())
}

/// Render the effective configuration as `key = value` lines.
fn render(config: &Config) -> String {
    let quoted = |items: &[String]| {
        items
            .iter()
            .map(|s| format!("{:?}", s))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let lines = [
        format!("# global config: {}", source(config.global_config_loaded_from())),
        format!("# project config: {}", source(config.project_config_loaded_from())),
        format!("scan.boards_dir = {:?}", config.boards_dir()),
        format!("scan.metadata_suffix = {:?}", config.metadata_suffix()),
        format!("scan.skip_dirs = [{}]", quoted(config.skip_dirs().as_slice())),
        format!("build.tool = {:?}", config.build_tool()),
        format!("build.pristine = {}", config.pristine()),
        format!("build.build_root = {:?}", config.build_root()),
        format!("build.jobs = {}", config.jobs()),
        format!("build.extra_args = [{}]", quoted(config.extra_args())),
        format!("run.verbose = {}", config.verbose()),
        format!("run.failfast = {}", config.failfast()),
    ];
    output::format_list(&lines, "")
}
