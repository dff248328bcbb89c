//! # fileutils CLI cp / mv Integration Tests
//!
//! File: cli/tests/copy.rs
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_cp_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    let dst = dir.path().join("out/deep/a.txt");
    fs::write(&src, "hello").unwrap();

    fileutils_cmd(dir.path())
        .arg("cp")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
    assert!(src.exists());
}

#[test]
fn test_cp_missing_source_fails() {
    let dir = tempdir().unwrap();
    fileutils_cmd(dir.path())
        .arg("cp")
        .arg(dir.path().join("missing.txt"))
        .arg(dir.path().join("out.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to copy"));
}

#[test]
fn test_cp_batch_reports_partial_failure() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("one.txt"), "1").unwrap();
    fs::write(root.join("two.txt"), "2").unwrap();
    let pairs = format!(
        "{}\t{}\n{}\t{}\n{}\t{}\n",
        root.join("one.txt").display(),
        root.join("out/one.txt").display(),
        root.join("gone.txt").display(),
        root.join("out/gone.txt").display(),
        root.join("two.txt").display(),
        root.join("out/two.txt").display(),
    );
    let batch = root.join("pairs.tsv");
    fs::write(&batch, pairs).unwrap();

    fileutils_cmd(root)
        .args(["cp", "--batch"])
        .arg(&batch)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Copied 2/3 files"));

    assert!(root.join("out/one.txt").exists());
    assert!(root.join("out/two.txt").exists());
    assert!(!root.join("out/gone.txt").exists());
}

#[test]
fn test_cp_batch_logs_progress_at_info() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_config(root, "[copy]\nprogress_interval = 1\n");
    fs::write(root.join("one.txt"), "1").unwrap();
    let batch = root.join("pairs.tsv");
    fs::write(
        &batch,
        format!(
            "{}\t{}\n",
            root.join("one.txt").display(),
            root.join("copy.txt").display()
        ),
    )
    .unwrap();

    fileutils_cmd(root)
        .args(["-v", "cp", "--batch"])
        .arg(&batch)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1/1 files"))
        .stderr(predicate::str::contains("Copying 1/1"));
}

#[test]
fn test_mv_moves_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    let dst = dir.path().join("moved/a.txt");
    fs::write(&src, "data").unwrap();

    fileutils_cmd(dir.path())
        .arg("mv")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "data");
}

#[test]
fn test_cp_batch_accepts_crlf_pairs_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("one.txt"), "1").unwrap();
    let batch = root.join("pairs.tsv");
    fs::write(
        &batch,
        format!(
            "{}\t{}\r\n",
            root.join("one.txt").display(),
            root.join("out/one.txt").display()
        ),
    )
    .unwrap();

    fileutils_cmd(root)
        .args(["cp", "--batch"])
        .arg(&batch)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1/1 files"));

    assert!(root.join("out/one.txt").is_file());
}
