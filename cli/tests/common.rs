//! # fileutils CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and pulls these in.
//!

#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// An `assert_cmd::Command` for the compiled `fileutils` binary.
///
/// The command runs with a config file written into `config_dir`, so user and
/// project configuration on the test machine cannot leak into the results.
pub fn fileutils_cmd(config_dir: &Path) -> Command {
    let config = config_dir.join("fileutils-test.toml");
    if !config.exists() {
        fs::write(&config, "").expect("Failed to write empty test config");
    }
    let mut cmd = Command::cargo_bin("fileutils").expect("Failed to find fileutils binary for testing");
    cmd.env("FILEUTILS_CONFIG", &config).env_remove("RUST_LOG");
    cmd
}

/// Writes `contents` as the test config inside `config_dir`.
pub fn write_config(config_dir: &Path, contents: &str) -> PathBuf {
    let config = config_dir.join("fileutils-test.toml");
    fs::write(&config, contents).expect("Failed to write test config");
    config
}
