//! # fileutils Copy and Move Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! This module copies and moves single files, creating the destination's parent
//! directory on the way, and copies batches of `(src, dst)` pairs.
//!
//! ## Architecture
//!
//! The byte-level work is delegated to `fs_extra::file`:
//! - `copy_file` uses `fs_extra::file::copy` with `overwrite = true`.
//! - `move_file` uses `fs_extra::file::move_file`, which tries a rename first and
//!   falls back to copy + remove when the rename fails (e.g. across devices).
//!
//! All three operations are *guarded*: a failure is logged and reported through
//! the return value (`false`, or a lower success count), never as an `Err`.
//! Batches run sequentially and keep going past individual failures.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fileutils::common::fs::copy;
//!
//! let pairs = vec![
//!     ("raw/a.jpg", "train/cat/a.jpg"),
//!     ("raw/b.jpg", "val/dog/b.jpg"),
//! ];
//! let copied = copy::copy_files(&pairs);
//! println!("{copied}/{} copied", pairs.len());
//! ```
//!
use crate::common::fs::io::ensure_parent_dir;
use crate::core::error::{FileUtilsError, Result};
use std::path::Path;
use tracing::{debug, error, info};

/// Default number of pairs between two progress lines in `copy_files`.
pub const PROGRESS_INTERVAL: usize = 10;

fn overwrite_options() -> fs_extra::file::CopyOptions {
    let mut options = fs_extra::file::CopyOptions::new();
    // Replace existing destination files, like a plain byte copy would.
    options.overwrite = true;
    options
}

fn same_file(src: &Path, dst: &Path) -> bool {
    matches!((src.canonicalize(), dst.canonicalize()), (Ok(a), Ok(b)) if a == b)
}

/// Fails when `src` and `dst` already name the same file, since copying a file
/// onto itself would truncate it.
fn reject_same_file(src: &Path, dst: &Path) -> Result<()> {
    if same_file(src, dst) {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "{:?} and {:?} are the same file",
            src, dst
        )));
    }
    Ok(())
}

fn try_copy(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    reject_same_file(src, dst)?;
    fs_extra::file::copy(src, dst, &overwrite_options())
        .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to copy {:?} to {:?}", src, dst)))?;
    Ok(())
}

fn try_move(src: &Path, dst: &Path) -> Result<()> {
    if same_file(src, dst) {
        // Renaming a file onto itself leaves it in place.
        debug!("{:?} is already at {:?}", src, dst);
        return Ok(());
    }
    ensure_parent_dir(dst)?;
    fs_extra::file::move_file(src, dst, &overwrite_options())
        .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to move {:?} to {:?}", src, dst)))?;
    Ok(())
}

/// Copies `src` to `dst` byte for byte, overwriting `dst` if it exists.
///
/// Returns `true` on success and `false` (after logging) on any failure.
pub fn copy_file(src: &Path, dst: &Path) -> bool {
    match try_copy(src, dst) {
        Ok(()) => {
            debug!("Copy file from {:?} to {:?} done", src, dst);
            true
        }
        Err(e) => {
            error!("Error: when copy file from {:?} to {:?}: {:#}", src, dst, e);
            false
        }
    }
}

/// Copies every `(src, dst)` pair in order and returns how many succeeded.
///
/// Logs a progress line every [`PROGRESS_INTERVAL`] pairs.
pub fn copy_files<S, D>(pairs: &[(S, D)]) -> usize
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    copy_files_with_progress(pairs, PROGRESS_INTERVAL)
}

/// Same as [`copy_files`], logging progress every `interval` pairs
/// (an interval of 0 disables progress lines).
pub fn copy_files_with_progress<S, D>(pairs: &[(S, D)], interval: usize) -> usize
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    let total_paths = pairs.len();
    let mut num_success = 0;
    for (i, (src, dst)) in pairs.iter().enumerate() {
        if interval > 0 && (i + 1) % interval == 0 {
            info!("Copying {}/{} ...", i + 1, total_paths);
        }
        if copy_file(src.as_ref(), dst.as_ref()) {
            num_success += 1;
        }
    }
    info!("Copy {}/{} files done", num_success, total_paths);
    num_success
}

/// Moves `src` to `dst`, overwriting `dst` if it exists.
///
/// Returns `true` on success and `false` (after logging) on any failure. The
/// source is only removed once the destination is complete. Moving a file onto
/// itself succeeds and changes nothing.
pub fn move_file(src: &Path, dst: &Path) -> bool {
    match try_move(src, dst) {
        Ok(()) => {
            debug!("Move file from {:?} to {:?} done", src, dst);
            true
        }
        Err(e) => {
            error!("Error: when move file from {:?} to {:?}: {:#}", src, dst, e);
            false
        }
    }
}
