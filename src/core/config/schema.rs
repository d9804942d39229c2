//! core::config::schema
//!
//! Configuration schema types.
//!
//! Both config scopes (global and project) share one schema; the project file
//! overrides the global one key by key.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a bad value is reported
//! against the file it came from, before any scanning or building starts.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Configuration file contents.
///
/// # Example
///
/// ```toml
/// [scan]
/// boards_dir = "boards"
/// metadata_suffix = ".zmk.yml"
/// skip_dirs = ["interconnects"]
///
/// [build]
/// tool = "west"
/// pristine = true
/// build_root = "build"
/// jobs = 4
/// extra_args = ["--", "-DCONFIG_ZMK_USB_LOGGING=y"]
///
/// [run]
/// verbose = true
/// failfast = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Board tree scanning
    pub scan: Option<ScanSettings>,

    /// Build tool invocation
    pub build: Option<BuildSettings>,

    /// Run-level defaults for CLI flags
    pub run: Option<RunSettings>,
}

impl SweepConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(scan) = &self.scan {
            scan.validate()?;
        }
        if let Some(build) = &self.build {
            build.validate()?;
        }
        Ok(())
    }
}

/// Where and how to look for metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScanSettings {
    /// Board tree, relative to the application directory
    pub boards_dir: Option<String>,

    /// File-name suffix of metadata files
    pub metadata_suffix: Option<String>,

    /// Top-level directory names never scanned
    pub skip_dirs: Option<Vec<String>>,
}

impl ScanSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(suffix) = &self.metadata_suffix {
            if suffix.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "scan.metadata_suffix cannot be empty".to_string(),
                ));
            }
        }

        if let Some(dirs) = &self.skip_dirs {
            for dir in dirs {
                if dir.is_empty() || dir.contains('/') || dir.contains('\\') {
                    return Err(ConfigError::InvalidValue(format!(
                        "scan.skip_dirs entry '{}' must be a plain directory name",
                        dir
                    )));
                }
            }
        }

        Ok(())
    }
}

/// How the build tool is invoked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// Build tool program (default: "west")
    pub tool: Option<String>,

    /// Pass `-p` for a pristine build
    pub pristine: Option<bool>,

    /// Parent of per-target build directories, relative to the application directory
    pub build_root: Option<String>,

    /// Number of parallel builds
    pub jobs: Option<usize>,

    /// Extra arguments appended after the board selection
    pub extra_args: Option<Vec<String>>,
}

impl BuildSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tool) = &self.tool {
            if tool.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "build.tool cannot be empty".to_string(),
                ));
            }
        }

        if self.jobs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "build.jobs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Defaults for the run flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    /// Print captured build diagnostics on failure
    pub verbose: Option<bool>,

    /// Stop after the first failed build
    pub failfast: Option<bool>,
}
