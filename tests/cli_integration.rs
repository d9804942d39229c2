//! Integration tests for the boardsweep binary.
//!
//! These tests run the real CLI against board trees built in temp dirs.
//! Global configuration lookup is pointed into the temp dir so the host's
//! own config never leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// An application directory containing a `boards/` tree.
struct TestApp {
    dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("boards")).unwrap();
        Self { dir }
    }

    /// The classic three-node tree: one plain board, one interconnect and
    /// one shield that requires the interconnect's bus.
    fn with_basic_tree() -> Self {
        let app = Self::new();
        app.metadata("arm/boardA/boardA.zmk.yml", "id: boardA\n");
        app.metadata("arm/hubX/hubX.zmk.yml", "id: hubX\nexposes: [busA]\n");
        app.metadata("shields/shieldY/shieldY.zmk.yml", "id: shieldY\nrequires: [busA]\n");
        app
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a metadata file relative to `boards/`.
    fn metadata(&self, relative: &str, contents: &str) {
        let path = self.path().join("boards").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Write the project config file.
    fn project_config(&self, contents: &str) {
        fs::write(self.path().join(".boardsweep.toml"), contents).unwrap();
    }

    /// A command running boardsweep in this application directory.
    fn cmd(&self) -> Command {
        let isolated = self.path().join(".isolated-home");
        let mut cmd = Command::cargo_bin("boardsweep").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", &isolated)
            .env("XDG_CONFIG_HOME", &isolated)
            .env("BOARDSWEEP_CONFIG", isolated.join("config.toml"));
        cmd
    }
}

// =============================================================================
// Global flags
// =============================================================================

#[test]
fn version_flag_works() {
    Command::cargo_bin("boardsweep")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("boardsweep"));
}

#[test]
fn help_flag_works() {
    Command::cargo_bin("boardsweep")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compile-everything"));
}

#[test]
fn unknown_command_is_usage_error() {
    Command::cargo_bin("boardsweep")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .code(2);
}

// =============================================================================
// compile-everything --list
// =============================================================================

mod list {
    use super::*;

    #[test]
    fn prints_targets_as_json() {
        let app = TestApp::with_basic_tree();
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .success()
            .stdout(
                "[{\"board\":\"boardA\",\"shield\":null},\
                 {\"board\":\"hubX\",\"shield\":\"shieldY\"}]\n",
            );
    }

    #[test]
    fn underscore_alias_works() {
        let app = TestApp::with_basic_tree();
        app.cmd()
            .args(["compile_everything", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("shieldY"));
    }

    #[test]
    fn cwd_flag_selects_app_dir() {
        let app = TestApp::with_basic_tree();
        let elsewhere = TempDir::new().unwrap();
        app.cmd()
            .current_dir(elsewhere.path())
            .arg("--cwd")
            .arg(app.path())
            .args(["compile-everything", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hubX"));
    }

    #[test]
    fn empty_tree_lists_nothing() {
        let app = TestApp::new();
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .success()
            .stdout("[]\n");
    }

    #[test]
    fn debug_reports_empty_tree() {
        let app = TestApp::new();
        app.cmd()
            .args(["--debug", "compile-everything", "--list"])
            .assert()
            .success()
            .stderr(predicate::str::contains("[debug] No '*.zmk.yml' files under"));
    }

    #[test]
    fn unmatched_shield_is_warned_and_dropped() {
        let app = TestApp::new();
        app.metadata("shields/lonely/lonely.zmk.yml", "id: lonely\nrequires: [nobus]\n");
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .success()
            .stdout("[]\n")
            .stderr(predicate::str::contains("lonely"));
    }

    #[test]
    fn top_level_interconnects_dir_is_skipped() {
        let app = TestApp::new();
        app.metadata("interconnects/pins/pins.zmk.yml", "id: pins\nexposes: [pinbus]\n");
        app.metadata("shields/s/s.zmk.yml", "id: s\nrequires: [pinbus]\n");
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .success()
            .stdout("[]\n");
    }

    #[test]
    fn no_list_overrides_list() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"true\"\n");
        app.cmd()
            .args(["compile-everything", "--list", "--no-list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 targets: 2 ok, 0 failed"));
    }
}

// =============================================================================
// compile-everything errors
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn malformed_metadata_exits_one() {
        let app = TestApp::with_basic_tree();
        app.metadata("arm/bad/bad.zmk.yml", "id: bad\nexposes: []\n");
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("error:"))
            .stderr(predicate::str::contains("bad.zmk.yml"));
    }

    #[test]
    fn error_chain_names_each_cause_once() {
        let app = TestApp::with_basic_tree();
        app.metadata("arm/bad/bad.zmk.yml", "id: bad\nsiblings: null\n");
        let assert = app
            .cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .code(1);

        let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
        assert_eq!(stderr.matches("bad.zmk.yml").count(), 1, "stderr: {}", stderr);
        assert_eq!(
            stderr.matches("'siblings' is present but null").count(),
            1,
            "stderr: {}",
            stderr
        );
    }

    #[test]
    fn invalid_yaml_exits_one() {
        let app = TestApp::new();
        app.metadata("arm/broken/broken.zmk.yml", "id: [unclosed\n");
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("broken.zmk.yml"));
    }

    #[test]
    fn missing_boards_dir_exits_one() {
        let app = TestApp::new();
        app.cmd()
            .args(["compile-everything", "--boards-dir", "missing"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("missing"));
    }

    #[test]
    fn invalid_config_exits_one() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\njobs = 0\n");
        app.cmd()
            .args(["compile-everything", "--list"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn zero_jobs_flag_is_usage_error() {
        let app = TestApp::with_basic_tree();
        app.cmd()
            .args(["compile-everything", "--jobs", "0"])
            .assert()
            .code(2);
    }
}

// =============================================================================
// compile-everything builds
// =============================================================================

#[cfg(unix)]
mod builds {
    use super::*;

    #[test]
    fn all_passing_exits_zero() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"true\"\n");
        app.cmd()
            .arg("compile-everything")
            .assert()
            .success()
            .stdout(predicate::str::contains("-b boardA"))
            .stdout(predicate::str::contains("-DSHIELD=shieldY"))
            .stdout(predicate::str::contains("2 targets: 2 ok, 0 failed"));
    }

    #[test]
    fn failures_exit_one_after_building_everything() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"false\"\n");
        app.cmd()
            .arg("compile-everything")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("-b boardA"))
            .stderr(predicate::str::contains("-b hubX"))
            .stdout(predicate::str::contains("2 targets: 0 ok, 2 failed"));
    }

    #[test]
    fn failfast_stops_after_first_failure() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"false\"\n");
        app.cmd()
            .args(["compile-everything", "--failfast", "--jobs", "1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("-b boardA"))
            .stderr(predicate::str::contains("-b hubX").not())
            .stdout(predicate::str::contains("1 skipped (failfast)"));
    }

    #[test]
    fn failfast_from_config_can_be_disabled() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"false\"\n\n[run]\nfailfast = true\n");
        app.cmd()
            .args(["compile-everything", "--no-failfast"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("2 targets: 0 ok, 2 failed"));
    }

    #[test]
    fn parallel_jobs_build_everything() {
        let app = TestApp::with_basic_tree();
        app.metadata("arm/boardB/boardB.zmk.yml", "id: boardB\n");
        app.metadata("arm/boardC/boardC.zmk.yml", "id: boardC\n");
        app.project_config("[build]\ntool = \"true\"\n");
        app.cmd()
            .args(["compile-everything", "-j", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("4 targets: 4 ok, 0 failed"));
    }

    #[test]
    fn status_lines_are_command_and_verdict_only() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"true\"\npristine = false\n");
        app.cmd()
            .arg("compile-everything")
            .assert()
            .success()
            .stdout(predicate::str::contains("true build -b boardA -d "))
            .stdout(predicate::str::contains("/build/boardA: ok\n"))
            .stdout(predicate::str::contains("-DSHIELD=shieldY: ok\n"));
    }

    #[test]
    fn debug_traces_build_root_and_timing() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"true\"\n");
        app.cmd()
            .args(["--debug", "compile-everything"])
            .assert()
            .success()
            .stderr(predicate::str::contains("[debug] Build directories go under"))
            .stderr(predicate::str::contains("boardA finished in"));
    }

    #[test]
    fn quiet_hides_success_lines() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"true\"\n");
        app.cmd()
            .args(["-q", "compile-everything"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn missing_tool_counts_as_failure() {
        let app = TestApp::with_basic_tree();
        app.project_config("[build]\ntool = \"boardsweep-no-such-tool\"\n");
        app.cmd()
            .arg("compile-everything")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to run"));
    }
}

// =============================================================================
// Other commands
// =============================================================================

#[test]
fn config_shows_project_overrides() {
    let app = TestApp::new();
    app.project_config("[build]\njobs = 4\n\n[scan]\nboards_dir = \"hw\"\n");
    app.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("build.jobs = 4"))
        .stdout(predicate::str::contains("scan.boards_dir = \"hw\""))
        .stdout(predicate::str::contains(".boardsweep.toml"));
}

#[test]
fn completion_generates_script() {
    Command::cargo_bin("boardsweep")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("boardsweep"));
}
