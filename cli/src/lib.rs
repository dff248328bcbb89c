//! # fileutils Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Small, dependable file helpers for data-processing scripts: directory
//! listing, text/list/CSV/JSON/JSON-lines/image load and save, and file
//! copy/move with automatic parent-directory creation. The `fileutils` binary
//! is a thin CLI over the same functions.
//!
//! ## Architecture
//!
//! - **`core`**: error type (`core::error`) and layered TOML configuration (`core::config`).
//! - **`common::fs`**: directory listing and path strings (`paths`), text and list files (`io`), copy and move (`copy`).
//! - **`common::formats`**: JSON, JSON-lines, CSV and image payloads.
//! - **`common::time`**: formatted timestamps.
//!
//! ## Guarded and unguarded operations
//!
//! Some helpers are *guarded*: they never return an error, and instead log it
//! through `tracing` and hand back a fallback (`""`, `{}`, `None`, `false`).
//! The rest return [`core::error::Result`] and leave handling to the caller.
//! Each function's documentation says which kind it is.
//!
//! ```rust,no_run
//! use fileutils::common::formats::json::{load_json, save_json};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! save_json(&serde_json::json!({"epoch": 3}), Path::new("out/run/meta.json"))?;
//! let meta = load_json(Path::new("out/run/meta.json"));
//! assert_eq!(meta["epoch"], 3);
//! # Ok(())
//! # }
//! ```
//!

pub mod common;
pub mod core;
