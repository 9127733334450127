//! Integration tests for the basalt-build binary.
//!
//! These tests exercise the full CLI against temporary project directories.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PROJECT: &str = r#"
[package]
name = "basalt"
version = "0.1.0"
description = "Graph DB Storage"

[package.entry_points]
basalt-cli = "basalt.cli:main"

[[extension]]
name = "basalt"
source_dir = "."
"#;

/// Get a command for running basalt-build, isolated from user config.
fn basalt_build(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("basalt-build").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env_remove("BASALT_BUILD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A project directory holding a basalt-build.toml.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("basalt-build.toml").write_str(PROJECT).unwrap();
    dir
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().unwrap();
    basalt_build(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("basalt-build"));
}

#[test]
fn help_flag_works() {
    let home = TempDir::new().unwrap();
    basalt_build(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check-versions"));
}

#[test]
fn metadata_prints_entry_points_and_extensions() {
    let home = TempDir::new().unwrap();
    let dir = project();

    basalt_build(&home)
        .args(["metadata", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""basalt-cli": "basalt.cli:main""#))
        .stdout(predicate::str::contains(r#""version": "0.1.0""#))
        .stdout(predicate::str::contains(r#""target": "_basalt""#));
}

#[test]
fn build_without_project_fails() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    basalt_build(&home)
        .args(["build", "--python", "python3", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no basalt-build.toml found"));
}

#[test]
fn build_with_missing_cmake_names_extensions() {
    let home = TempDir::new().unwrap();
    let dir = project();

    basalt_build(&home)
        .args(["build", "--python", "python3", "--cmake"])
        .arg(dir.path().join("no-such-cmake"))
        .arg("--cwd")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "must be installed to build the following extensions: basalt",
        ));

    dir.child("build/temp").assert(predicate::path::missing());
}

#[test]
fn check_versions_accepts_triples() {
    let home = TempDir::new().unwrap();
    basalt_build(&home)
        .args(["check-versions", "--module", "6.2.4", "--package", "0.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn check_versions_rejects_short_module_version() {
    let home = TempDir::new().unwrap();
    basalt_build(&home)
        .args(["check-versions", "--module", "6.2", "--package", "0.1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("module version '6.2'"));
}

#[test]
fn check_versions_package_defaults_to_project() {
    let home = TempDir::new().unwrap();
    let dir = project();

    basalt_build(&home)
        .args(["check-versions", "--module", "6.2.4", "--cwd"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("package 0.1.0"));
}

#[test]
fn check_versions_from_metadata_file() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let good = dir.child("good.json");
    good.write_str(r#"{"module_version": "6.2.4", "package_version": "0.1.0"}"#)
        .unwrap();
    let bad = dir.child("bad.json");
    bad.write_str(r#"{"module_version": [6, 2, 4], "package_version": "0.1.0"}"#)
        .unwrap();

    basalt_build(&home)
        .args(["check-versions", "--metadata"])
        .arg(good.path())
        .assert()
        .success();

    basalt_build(&home)
        .args(["check-versions", "--metadata"])
        .arg(bad.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a string"));
}

#[test]
fn invalid_project_config_reported() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    dir.child("basalt-build.toml")
        .write_str("[package]\nname = \"basalt\"\nversion = \"0.1\"\n")
        .unwrap();

    basalt_build(&home)
        .args(["metadata", "--cwd"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn tool_outside_project_reports_no_extensions() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    basalt_build(&home)
        .args(["tool", "--cmake"])
        .arg(dir.path().join("no-such-cmake"))
        .arg("--cwd")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "following extensions: (none declared)",
        ));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    basalt_build(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("basalt-build"));
}

#[cfg(unix)]
mod fake_cmake {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Write an executable shell script standing in for cmake.
    ///
    /// It answers `--version` and appends `cwd|args|CXXFLAGS` to `$CMAKE_LOG`
    /// for every other call, exiting with `$CMAKE_EXIT` (default 0).
    fn write_fake_cmake(dir: &Path, version: &str) -> PathBuf {
        let path = dir.join("fake-cmake");
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then echo \"cmake version {}\"; exit 0; fi\n\
             echo \"$(pwd)|$*|$CXXFLAGS\" >> \"$CMAKE_LOG\"\n\
             exit ${{CMAKE_EXIT:-0}}\n",
            version
        );
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn plan_shows_both_invocations() {
        let home = TempDir::new().unwrap();
        let dir = project();

        basalt_build(&home)
            .args(["plan", "--python", "/usr/bin/python3", "--cwd"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "--build . --config ON --target _basalt -- -j2",
            ))
            .stdout(predicate::str::contains("-DBasalt_CXX_OPTIMIZE:BOOL=ON"))
            .stdout(predicate::str::contains(
                "-DPYTHON_EXECUTABLE=/usr/bin/python3",
            ));

        // Planning touches nothing
        dir.child("build").assert(predicate::path::missing());
    }

    #[test]
    fn build_runs_configure_then_build() {
        let home = TempDir::new().unwrap();
        let dir = project();
        let cmake = write_fake_cmake(dir.path(), "3.22.1");
        let log = dir.path().join("cmake.log");

        basalt_build(&home)
            .env("CMAKE_LOG", &log)
            .env("CXXFLAGS", "-O2")
            .args(["build", "--python", "/usr/bin/python3", "--cmake"])
            .arg(&cmake)
            .arg("--cwd")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Built basalt"));

        dir.child("build/temp").assert(predicate::path::is_dir());

        let contents = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2, "{contents}");

        assert!(lines[0].contains("build/temp|"));
        assert!(lines[0].contains("-DCMAKE_BUILD_TYPE="));
        assert!(lines[0].contains("-O2 -DVERSION_INFO="));
        assert!(lines[0].contains("0.1.0"));
        assert!(lines[1].contains("--build . --config ON --target _basalt -- -j2"));
    }

    #[test]
    fn failing_configure_stops_build() {
        let home = TempDir::new().unwrap();
        let dir = project();
        let cmake = write_fake_cmake(dir.path(), "3.22.1");
        let log = dir.path().join("cmake.log");

        basalt_build(&home)
            .env("CMAKE_LOG", &log)
            .env("CMAKE_EXIT", "3")
            .args(["build", "--python", "/usr/bin/python3", "--cmake"])
            .arg(&cmake)
            .arg("--cwd")
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "configure step for extension 'basalt' failed: exit code 3",
            ));

        let contents = fs::read_to_string(&log).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn tool_reports_version() {
        let home = TempDir::new().unwrap();
        let dir = project();
        let cmake = write_fake_cmake(dir.path(), "3.22.1");

        basalt_build(&home)
            .args(["tool", "--cmake"])
            .arg(&cmake)
            .arg("--cwd")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("version:  3.22.1"))
            .stdout(predicate::str::contains("platform: posix"))
            .stdout(predicate::str::contains("basalt-build.toml"));
    }

    #[test]
    fn relative_cwd_and_cmake_resolve_against_invocation_dir() {
        let home = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        root.child("proj/basalt-build.toml")
            .write_str(PROJECT)
            .unwrap();
        write_fake_cmake(root.path(), "3.22.1");
        let log = root.path().join("cmake.log");

        basalt_build(&home)
            .current_dir(root.path())
            .env("CMAKE_LOG", &log)
            .args([
                "build",
                "--python",
                "/usr/bin/python3",
                "--cmake",
                "./fake-cmake",
                "--cwd",
                "proj",
            ])
            .assert()
            .success();

        let proj = root.path().canonicalize().unwrap().join("proj");
        let contents = fs::read_to_string(&log).unwrap();
        let configure = contents.lines().next().unwrap();

        assert!(
            configure.contains(&format!("|{} ", proj.display())),
            "{configure}"
        );
        assert!(
            configure.contains(&format!(
                "-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={}",
                proj.join("build/lib/basalt").display()
            )),
            "{configure}"
        );
        root.child("proj/build/temp").assert(predicate::path::is_dir());
        root.child("proj/build/temp/proj")
            .assert(predicate::path::missing());
    }
}
