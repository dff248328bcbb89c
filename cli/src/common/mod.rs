//! # fileutils Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the root of the helper library used by data-processing
//! scripts. Each submodule is a set of independent, stateless functions:
//!
//! - **`fs`**: Paths, directories, text and list files, copy and move.
//! - **`formats`**: Structured payloads: CSV tables, JSON, JSON-lines (via a literal parser) and images.
//! - **`time`**: Timestamp strings for naming outputs.
//!
//! Two failure policies coexist and are visible in the signatures: *guarded*
//! helpers log and return a sentinel (`String`, `Option`, `bool`, `()`), while
//! *unguarded* helpers return `Result` and let the caller decide.
//!

/// Structured payload I/O (CSV, JSON, JSON-lines, images).
pub mod formats;
/// Filesystem utilities (paths, directories, text/list I/O, copy/move).
pub mod fs;
/// Timestamp formatting.
pub mod time;
