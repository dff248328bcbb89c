//! # fileutils Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the plain-text input/output helpers: ensuring a
//! directory (or a file's parent directory) exists, loading and saving text
//! blobs, and loading and saving newline-separated lists.
//!
//! ## Architecture
//!
//! - **`ensure_dir`**: Creates a directory and its missing ancestors (`fs::create_dir_all`). No-op if it already exists.
//! - **`ensure_parent_dir`**: Creates the parent of a file path, where "parent" is the pure string truncation done by `paths::parent_directory`. A bare file name has no parent and is a no-op.
//! - **`load_text` / `save_text`**: *Guarded.* Failures are logged and swallowed; `load_text` returns `""`.
//! - **`save_list` / `load_list`**: *Unguarded.* Failures propagate to the caller with the path attached as context.
//!
//! Every save ensures the parent directory first. Loads read text the way a
//! text-mode reader does: `\r\n` and lone `\r` line endings become `\n`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fileutils::common::fs::io;
//! use std::path::Path;
//!
//! # fn run_example() -> fileutils::core::error::Result<()> {
//! io::save_list(&["a.jpg", "b.jpg"], Path::new("out/splits/train.txt"))?;
//! let names = io::load_list(Path::new("out/splits/train.txt"))?;
//! assert_eq!(names, vec!["a.jpg", "b.jpg"]);
//!
//! io::save_text("  notes  ", Path::new("out/notes.txt"));
//! assert_eq!(io::load_text(Path::new("out/notes.txt")), "notes");
//! # Ok(())
//! # }
//! ```
//!
use crate::common::formats::size_label;
use crate::common::fs::paths::parent_directory;
use crate::core::error::{FileUtilsError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, the directory is created together with any
/// missing parents (like `mkdir -p`). An empty path is treated as "nothing to
/// create". Concurrent creation of the same directory is not an error.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        // Bare file names have an empty parent; nothing to do.
        return Ok(());
    }
    if !path.exists() {
        // create_dir_all tolerates another process creating it in between.
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Ensures the parent directory of `path` exists.
///
/// The parent is computed by string truncation at the last separator (see
/// [`parent_directory`]), so `"out/a.txt"` creates `out` and `"a.txt"` creates
/// nothing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let text = path.to_string_lossy();
    ensure_dir(Path::new(parent_directory(&text)))
}

fn read_normalized(path: &Path) -> std::io::Result<String> {
    let content = fs::read_to_string(path)?;
    if content.contains('\r') {
        Ok(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Ok(content)
    }
}

/// Reads a whole file, normalizes line endings and trims leading/trailing
/// whitespace.
///
/// Guarded: any failure (missing file, permissions, invalid UTF-8) is logged
/// and an empty string is returned.
pub fn load_text(path: &Path) -> String {
    match read_normalized(path) {
        Ok(content) => content.trim().to_string(),
        Err(e) => {
            error!("Error when load str from {}: {}", display_abs(path), e);
            String::new()
        }
    }
}

/// Writes `data` verbatim to `path`, creating the parent directory first.
///
/// Guarded: failures are logged, never returned.
pub fn save_text(data: &str, path: &Path) {
    let result = ensure_parent_dir(path).and_then(|_| {
        fs::write(path, data).with_context(|| format!("Failed to write to file {:?}", path))
    });
    match result {
        Ok(()) => info!("Save str data to {} done", path.display()),
        Err(e) => error!("Error when save str to {}: {:#}", display_abs(path), e),
    }
}

/// Writes `items` joined by `\n` (no trailing newline) to `path`.
///
/// # Errors
///
/// Unguarded: directory creation and write failures propagate.
pub fn save_list<S: AsRef<str>>(items: &[S], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let joined = items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    fs::write(path, joined).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!(
        "Save data (size = {}) to {} done",
        size_label(items),
        path.display()
    );
    Ok(())
}

/// Reads `path`, normalizes line endings, trims overall whitespace and splits
/// on `\n`.
///
/// An empty (or whitespace-only) file yields a single empty entry, `[""]`.
///
/// # Errors
///
/// Unguarded: read failures propagate.
pub fn load_list(path: &Path) -> Result<Vec<String>> {
    let content =
        read_normalized(path).with_context(|| format!("Failed to read file {:?}", path))?;
    let data: Vec<String> = content.trim().split('\n').map(str::to_string).collect();
    info!(
        "Load list data (size = {}) from {} done",
        size_label(&data),
        path.display()
    );
    Ok(data)
}

/// Absolute form of `path` for error messages, falling back to the path as given.
fn display_abs(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
