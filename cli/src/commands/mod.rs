//! # fileutils Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the command front ends used by `main.rs`. Each module defines a
//! Clap arguments struct and a `handle_*` function; the real work lives in the
//! `fileutils` library (`common::fs`, `common::formats`, `common::time`).
//!
//! ## Commands
//!
//! - `ls`: list files or subdirectories, optionally recursive and filtered by extension
//! - `cp` / `mv`: copy or move files, including batch copies from a pairs file
//! - `convert`: command group converting between JSON-lines, JSON, CSV and image formats
//! - `time`: print the current time with a configurable format
//!

/// Command group for format conversions (`jsonl`, `csv`, `image`).
pub mod convert;
/// `cp` and `mv`.
pub mod copy;
pub mod ls;
pub mod time;
