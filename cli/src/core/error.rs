//! # fileutils Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types shared by the fileutils helpers. Only the
//! *unguarded* operations (`save_list`, `load_list`, `save_csv`, `save_json`,
//! `load_json_lines`, directory creation and listing) ever hand an error back to
//! the caller. The guarded ones (`load_text`, `load_json`, `copy_file`, ...) log
//! the failure and return a sentinel value instead, so they never construct
//! these types for the caller to see.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `FileUtilsError`: A custom error enum using `thiserror` for specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so I/O failures can carry
//!   the path that failed via `anyhow::Context`
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error kind
//! if table.column_index(name).is_none() {
//!     return Err(FileUtilsError::MissingColumn { name: name.to_string() })?;
//! }
//!
//! // Pattern matching on error kinds
//! match fileutils::common::formats::json::load_json_lines(path) {
//!     Ok(values) => println!("{} values", values.len()),
//!     Err(e) if e.downcast_ref::<FileUtilsError>().is_some_and(|fe| matches!(fe, FileUtilsError::Literal { .. })) => {
//!         println!("malformed line");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use crate::common::formats::literal::LiteralError;
use thiserror::Error;

/// Custom error type for fileutils.
#[derive(Error, Debug)]
pub enum FileUtilsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Column '{name}' not found in table.")]
    MissingColumn { name: String },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Malformed literal on line {line}: {source}")]
    Literal {
        line: usize,
        #[source]
        source: LiteralError,
    },

    #[error("Image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
