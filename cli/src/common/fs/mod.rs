//! # fileutils Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module groups the helpers that deal with paths, directories and raw
//! file contents. Structured payloads (CSV, JSON, images) live in
//! `common::formats` and build on the directory helpers defined here.
//!
//! ## Architecture
//!
//! - **`paths`**: Listing subdirectories and files (flat or recursive), string-level path slicing (`parent_directory`, `directory_name_of_path`) and suffix filtering.
//! - **`io`**: Directory creation (`ensure_dir`, `ensure_parent_dir`) plus text and newline-separated list load/save.
//! - **`copy`**: Single-file copy/move and sequential batch copy, all reporting failure through their return values.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fileutils::common::fs::{copy, io, paths};
//! use std::path::Path;
//!
//! # fn run_example() -> fileutils::core::error::Result<()> {
//! let images = paths::filter_by_extension(
//!     &paths::list_all_file_paths(Path::new("raw"), false),
//!     &[".jpg", ".png"],
//! );
//! let names: Vec<String> = images.iter().map(|p| p.display().to_string()).collect();
//! io::save_list(&names, Path::new("out/images.txt"))?;
//! copy::copy_file(Path::new("raw/labels.csv"), Path::new("out/labels.csv"));
//! # Ok(())
//! # }
//! ```
//!

/// Single-file copy/move and batch copy (`copy_file`, `copy_files`, `move_file`).
pub mod copy;
/// Directory creation plus text and list I/O (`ensure_dir`, `load_text`, `save_list`, ...).
pub mod io;
/// Directory listing, recursive walks and path-string helpers.
pub mod paths;
