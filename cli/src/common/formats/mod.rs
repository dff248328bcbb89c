//! # fileutils Payload Formats (`common::formats`)
//!
//! File: cli/src/common/formats/mod.rs
//!
//! ## Overview
//!
//! Load/save helpers for structured payloads. Every save creates the parent
//! directory first (`fs::io::ensure_parent_dir`).
//!
//! ## Architecture
//!
//! - **`tabular`**: `Table` plus `load_csv` (guarded) and `save_csv` (unguarded), built on the `csv` crate.
//! - **`json`**: `save_json` (unguarded), `load_json` (guarded, falls back to `{}`), `load_json_lines` (unguarded), and the `ndarray` encoding hook.
//! - **`literal`**: The literal-expression parser behind `load_json_lines`.
//! - **`imaging`**: `load_image` / `save_image` (both guarded), built on the `image` crate.
//!
//! Log lines report payload sizes through [`DescribeSize`], implemented per
//! payload type rather than guessed at run time.
//!
use serde_json::Value;

/// Color image I/O.
pub mod imaging;
/// JSON and JSON-lines I/O.
pub mod json;
/// Literal-expression parser for JSON-lines files.
pub mod literal;
/// CSV tables.
pub mod tabular;

/// Size of a payload as reported in log lines.
pub trait DescribeSize {
    /// Number of entries, or `None` when the payload has no meaningful size.
    fn describe_size(&self) -> Option<usize>;
}

impl DescribeSize for Value {
    /// Object key count, array length, or string length in characters.
    /// Numbers, booleans and null have no size.
    fn describe_size(&self) -> Option<usize> {
        match self {
            Value::Object(map) => Some(map.len()),
            Value::Array(items) => Some(items.len()),
            Value::String(s) => Some(s.chars().count()),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }
}

impl<T> DescribeSize for [T] {
    fn describe_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> DescribeSize for Vec<T> {
    fn describe_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Renders a size for log lines: the number, or `n/a`.
pub(crate) fn size_label<T: DescribeSize + ?Sized>(payload: &T) -> String {
    payload
        .describe_size()
        .map_or_else(|| "n/a".to_string(), |n| n.to_string())
}
