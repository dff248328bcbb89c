//! # fileutils Path Enumeration
//!
//! File: cli/src/common/fs/paths.rs
//!
//! ## Overview
//!
//! Helpers for listing what is inside a directory and for slicing path strings:
//!
//! - **Immediate children**: `list_subdirectory_paths`, `list_subdirectory_names`,
//!   `list_file_paths`, `list_file_names`. Results follow the order the OS
//!   returns directory entries in, which is not sorted. Symlinks are followed
//!   when deciding whether an entry is a file or a directory.
//! - **Recursive**: `list_all_file_paths` walks the whole subtree with `walkdir`.
//! - **String helpers**: `parent_directory` and `directory_name_of_path` work on
//!   the text of the path and never touch the filesystem.
//! - **Filtering**: `filter_by_extension` does a plain suffix match.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::{debug, warn};
use walkdir::WalkDir;

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Names of the immediate entries of `parent_dir`, with their joined paths.
fn read_entries(parent_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(parent_dir)
        .with_context(|| format!("Failed to list directory {:?}", parent_dir))?;
    let mut result = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {:?}", parent_dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        result.push((name, parent_dir.join(entry.file_name())));
    }
    Ok(result)
}

/// Paths (`parent_dir` joined with the name) of the immediate subdirectories.
///
/// # Errors
///
/// Returns an `Err` if `parent_dir` cannot be listed.
pub fn list_subdirectory_paths(parent_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(read_entries(parent_dir)?
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .map(|(_, path)| path)
        .collect())
}

/// Bare names of the immediate subdirectories.
pub fn list_subdirectory_names(parent_dir: &Path) -> Result<Vec<String>> {
    Ok(read_entries(parent_dir)?
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .map(|(name, _)| name)
        .collect())
}

/// Bare names of the immediate regular files.
pub fn list_file_names(parent_dir: &Path) -> Result<Vec<String>> {
    Ok(read_entries(parent_dir)?
        .into_iter()
        .filter(|(_, path)| path.is_file())
        .map(|(name, _)| name)
        .collect())
}

/// Paths of the immediate regular files.
pub fn list_file_paths(parent_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(read_entries(parent_dir)?
        .into_iter()
        .filter(|(_, path)| path.is_file())
        .map(|(_, path)| path)
        .collect())
}

/// Name of the directory containing `path`, computed on the string:
/// `basename(dirname(path))`.
///
/// `"data/cats/001.jpg"` gives `"cats"`, `"data/cats/"` gives `"cats"`, and a
/// path without any separator gives `""`.
pub fn directory_name_of_path(path: &str) -> &str {
    // dirname: everything up to and including the last separator...
    let head = match path.rfind(is_separator) {
        Some(idx) => &path[..=idx],
        None => "",
    };
    // ...minus trailing separators, unless the head is only separators (root).
    let head = if head.chars().all(is_separator) {
        head
    } else {
        head.trim_end_matches(is_separator)
    };
    match head.rfind(is_separator) {
        Some(idx) => &head[idx + 1..],
        None => head,
    }
}

/// Text of `path` up to (not including) its last separator.
///
/// A pure string operation: `"a/b/c.txt"` gives `"a/b"`, `"/c.txt"` gives `""`
/// and `"c.txt"` (no separator) gives `""`.
pub fn parent_directory(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Every file below `dir`, recursively, in walk order.
///
/// Anything that is not a directory counts as a file; symlinks to directories
/// count as directories and are not descended into. Entries that cannot be
/// read are logged and skipped. With `absolute` set, each path is made
/// absolute against the current directory.
pub fn list_all_file_paths(dir: &Path, absolute: bool) -> Vec<PathBuf> {
    let mut file_paths = Vec::new();
    for entry_result in WalkDir::new(dir).min_depth(1) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to access entry during walk in '{}': {}", dir.display(), e);
                continue;
            }
        };
        if entry.path().is_dir() {
            continue;
        }
        let path = entry.into_path();
        if absolute {
            match std::path::absolute(&path) {
                Ok(abs) => file_paths.push(abs),
                Err(e) => {
                    warn!("Could not make '{}' absolute: {}", path.display(), e);
                    file_paths.push(path);
                }
            }
        } else {
            file_paths.push(path);
        }
    }
    debug!("Found {} files under {}", file_paths.len(), dir.display());
    file_paths
}

/// Keeps the paths whose text ends with any of `extensions`, in input order.
///
/// This is a plain suffix test, so `"photo.jpeg"` matches `"g"` as well as
/// `".jpeg"`. A path matching several extensions is kept once.
pub fn filter_by_extension<P>(paths: &[P], extensions: &[&str]) -> Vec<P>
where
    P: AsRef<Path> + Clone,
{
    paths
        .iter()
        .filter(|path| {
            let text = path.as_ref().to_string_lossy();
            extensions.iter().any(|ext| text.ends_with(ext))
        })
        .cloned()
        .collect()
}
