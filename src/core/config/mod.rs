//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! boardsweep has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Settings stored in the application directory
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$BOARDSWEEP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/boardsweep/config.toml`
//! 3. `~/.boardsweep/config.toml`
//!
//! # Project Config Locations
//!
//! Searched in order:
//! 1. `<app dir>/.boardsweep.toml` (canonical)
//! 2. `<app dir>/boardsweep.toml` (warns if both exist)
//!
//! # Example
//!
//! ```no_run
//! use boardsweep::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/zmk/app"))).unwrap();
//! let config = result.config;
//!
//! println!("Boards dir: {}", config.boards_dir());
//! println!("Build tool: {}", config.build_tool());
//! println!("Jobs: {}", config.jobs());
//! ```

pub mod schema;

pub use schema::{BuildSettings, RunSettings, ScanSettings, SweepConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::metadata::DEFAULT_METADATA_SUFFIX;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "BOARDSWEEP_CONFIG";

/// Canonical project config file name.
pub const PROJECT_CONFIG_FILE: &str = ".boardsweep.toml";

/// Alternative, non-hidden project config file name.
pub const PROJECT_CONFIG_FILE_ALT: &str = "boardsweep.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: project config overrides
/// global config, and built-in defaults fill whatever neither sets.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: SweepConfig,
    /// Project configuration (if found)
    pub project: Option<SweepConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `app_dir` is provided, also loads the project config there.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(app_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), app_dir)
    }

    /// Load configuration from an explicit global file and project directory.
    pub fn load_from(
        global_path: Option<&Path>,
        app_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let global = match global_path {
            Some(path) => Self::read_config(path)?,
            None => SweepConfig::default(),
        };

        let (project, project_path) = match app_dir {
            Some(dir) => Self::load_project(dir, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path: global_path.map(Path::to_path_buf),
                project_path,
            },
            warnings,
        })
    }

    /// Locate the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        Self::first_global_candidate(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    /// Pick the global config file from the lookup locations, in order:
    /// `$BOARDSWEEP_CONFIG`, `$XDG_CONFIG_HOME/boardsweep/config.toml`,
    /// `~/.boardsweep/config.toml`. Only existing files count.
    fn first_global_candidate(
        env_path: Option<PathBuf>,
        xdg_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Option<PathBuf> {
        let candidates = [
            env_path,
            xdg_home.map(|dir| dir.join("boardsweep/config.toml")),
            home.map(|dir| dir.join(".boardsweep/config.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Load project configuration from the application directory.
    fn load_project(
        app_dir: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<SweepConfig>, Option<PathBuf>), ConfigError> {
        let canonical = app_dir.join(PROJECT_CONFIG_FILE);
        let alt = app_dir.join(PROJECT_CONFIG_FILE_ALT);

        if canonical.exists() {
            if alt.exists() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "ignoring '{}' because '{}' takes precedence",
                        alt.display(),
                        canonical.display()
                    ),
                    path: alt,
                });
            }
            let config = Self::read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        if alt.exists() {
            let config = Self::read_config(&alt)?;
            return Ok((Some(config), Some(alt)));
        }

        Ok((None, None))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<SweepConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// First value set by the project config, then the global config.
    fn pick<'a, T: ?Sized>(&'a self, get: impl Fn(&'a SweepConfig) -> Option<&'a T>) -> Option<&'a T> {
        self.project
            .as_ref()
            .and_then(&get)
            .or_else(|| get(&self.global))
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Board tree, relative to the application directory.
    ///
    /// Defaults to "boards".
    pub fn boards_dir(&self) -> &str {
        self.pick(|c| c.scan.as_ref().and_then(|s| s.boards_dir.as_deref()))
            .unwrap_or("boards")
    }

    /// Metadata file-name suffix.
    ///
    /// Defaults to ".zmk.yml".
    pub fn metadata_suffix(&self) -> &str {
        self.pick(|c| c.scan.as_ref().and_then(|s| s.metadata_suffix.as_deref()))
            .unwrap_or(DEFAULT_METADATA_SUFFIX)
    }

    /// Top-level directory names excluded from scanning.
    ///
    /// Defaults to `["interconnects"]`, which only holds shared overlays.
    pub fn skip_dirs(&self) -> Vec<String> {
        self.pick(|c| c.scan.as_ref().and_then(|s| s.skip_dirs.as_deref()))
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| vec!["interconnects".to_string()])
    }

    /// Build tool program.
    ///
    /// Defaults to "west".
    pub fn build_tool(&self) -> &str {
        self.pick(|c| c.build.as_ref().and_then(|b| b.tool.as_deref()))
            .unwrap_or("west")
    }

    /// Whether builds are pristine (`-p`).
    ///
    /// Defaults to `true`.
    pub fn pristine(&self) -> bool {
        self.pick(|c| c.build.as_ref().and_then(|b| b.pristine.as_ref()))
            .copied()
            .unwrap_or(true)
    }

    /// Parent of per-target build directories.
    ///
    /// Defaults to "build".
    pub fn build_root(&self) -> &str {
        self.pick(|c| c.build.as_ref().and_then(|b| b.build_root.as_deref()))
            .unwrap_or("build")
    }

    /// Number of parallel builds.
    ///
    /// Defaults to 1 (sequential).
    pub fn jobs(&self) -> usize {
        self.pick(|c| c.build.as_ref().and_then(|b| b.jobs.as_ref()))
            .copied()
            .unwrap_or(1)
    }

    /// Extra build tool arguments.
    pub fn extra_args(&self) -> &[String] {
        self.pick(|c| c.build.as_ref().and_then(|b| b.extra_args.as_deref()))
            .unwrap_or(&[])
    }

    /// Whether failed builds print their diagnostics.
    ///
    /// Defaults to `true`.
    pub fn verbose(&self) -> bool {
        self.pick(|c| c.run.as_ref().and_then(|r| r.verbose.as_ref()))
            .copied()
            .unwrap_or(true)
    }

    /// Whether the run stops after the first failure.
    ///
    /// Defaults to `false`.
    pub fn failfast(&self) -> bool {
        self.pick(|c| c.run.as_ref().and_then(|r| r.failfast.as_ref()))
            .copied()
            .unwrap_or(false)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_files() {
        let result = Config::load_from(None, None).unwrap();
        let config = result.config;

        assert_eq!(config.boards_dir(), "boards");
        assert_eq!(config.metadata_suffix(), ".zmk.yml");
        assert_eq!(config.skip_dirs(), vec!["interconnects".to_string()]);
        assert_eq!(config.build_tool(), "west");
        assert!(config.pristine());
        assert_eq!(config.build_root(), "build");
        assert_eq!(config.jobs(), 1);
        assert!(config.extra_args().is_empty());
        assert!(config.verbose());
        assert!(!config.failfast());
        assert!(config.global_config_loaded_from().is_none());
        assert!(config.project_config_loaded_from().is_none());
    }

    #[test]
    fn global_lookup_order() {
        let temp = TempDir::new().unwrap();
        let env_file = temp.path().join("env.toml");
        let xdg = temp.path().join("xdg");
        let home = temp.path().join("home");
        fs::create_dir_all(xdg.join("boardsweep")).unwrap();
        fs::create_dir_all(home.join(".boardsweep")).unwrap();
        let xdg_file = xdg.join("boardsweep/config.toml");
        let home_file = home.join(".boardsweep/config.toml");

        let pick = || {
            Config::first_global_candidate(
                Some(env_file.clone()),
                Some(xdg.clone()),
                Some(home.clone()),
            )
        };

        assert_eq!(pick(), None);
        fs::write(&home_file, "").unwrap();
        assert_eq!(pick(), Some(home_file.clone()));
        fs::write(&xdg_file, "").unwrap();
        assert_eq!(pick(), Some(xdg_file.clone()));
        fs::write(&env_file, "").unwrap();
        assert_eq!(pick(), Some(env_file.clone()));
    }

    #[test]
    fn load_global_from_explicit_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "[build]\njobs = 3\n").unwrap();

        let config = Config::load_from(Some(&config_path), None).unwrap().config;
        assert_eq!(config.jobs(), 3);
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn project_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global_path = temp.path().join("global.toml");
        fs::write(
            &global_path,
            "[build]\ntool = \"west\"\njobs = 4\n\n[run]\nfailfast = true\n",
        )
        .unwrap();

        let app = temp.path().join("app");
        fs::create_dir(&app).unwrap();
        fs::write(app.join(PROJECT_CONFIG_FILE), "[build]\njobs = 2\n").unwrap();

        let config = Config::load_from(Some(&global_path), Some(&app))
            .unwrap()
            .config;

        assert_eq!(config.jobs(), 2);
        assert_eq!(config.build_tool(), "west");
        assert!(config.failfast());
        assert_eq!(
            config.project_config_loaded_from(),
            Some(app.join(PROJECT_CONFIG_FILE).as_path())
        );
    }

    #[test]
    fn alternative_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE_ALT),
            "[scan]\nboards_dir = \"hw\"\n",
        )
        .unwrap();

        let result = Config::load_from(None, Some(temp.path())).unwrap();
        assert_eq!(result.config.boards_dir(), "hw");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn both_project_files_warns() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "[build]\njobs = 2\n").unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE_ALT), "[build]\njobs = 9\n").unwrap();

        let result = Config::load_from(None, Some(temp.path())).unwrap();
        assert_eq!(result.config.jobs(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.warnings[0].path,
            temp.path().join(PROJECT_CONFIG_FILE_ALT)
        );
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "[build\n").unwrap();

        let err = Config::load_from(None, Some(temp.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(PROJECT_CONFIG_FILE));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "[build]\njobs = 0\n").unwrap();

        let err = Config::load_from(None, Some(temp.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
