//! # fileutils JSON and JSON-lines I/O
//!
//! File: cli/src/common/formats/json.rs
//!
//! ## Overview
//!
//! - **`save_json`** (*unguarded*): serializes any `serde::Serialize` value as
//!   compact UTF-8 JSON (non-ASCII characters are written as-is), creating the
//!   parent directory first.
//! - **`load_json`** (*guarded*): parses a JSON file; on any failure it logs
//!   and returns an **empty object** `{}`, even if the file was meant to hold
//!   an array. Callers rely on being able to index the fallback like a mapping.
//! - **`load_json_lines`** (*unguarded*): reads the file with
//!   `fs::io::load_list` and parses every line with the literal parser
//!   (`formats::literal`), failing on the first malformed line.
//!
//! ## Numeric arrays
//!
//! `ndarray` arrays serialize (with ndarray's own serde support) as an object
//! carrying `v`/`dim`/`data`. Scripts expect nested lists instead, so this
//! module provides the coercion hook:
//!
//! - [`nested`] wraps an array so it serializes as nested sequences (a 0-d
//!   array becomes its scalar);
//! - [`serialize_array`] does the same for `#[serde(serialize_with = ...)]`
//!   fields;
//! - [`array_to_value`] builds a `serde_json::Value` directly.
//!
//! ```rust,ignore
//! use fileutils::common::formats::json;
//! use ndarray::array;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Detection {
//!     label: String,
//!     #[serde(serialize_with = "json::serialize_array")]
//!     boxes: ndarray::Array2<f32>,
//! }
//!
//! let det = Detection { label: "person".into(), boxes: array![[0.0, 0.0, 10.0, 20.0]] };
//! json::save_json(&det, std::path::Path::new("out/det.json"))?;
//! // {"label":"person","boxes":[[0.0,0.0,10.0,20.0]]}
//! ```
//!
use crate::common::formats::literal::parse_literal;
use crate::common::formats::size_label;
use crate::common::fs::io::{ensure_parent_dir, load_list};
use crate::core::error::{FileUtilsError, Result};
use anyhow::Context;
use ndarray::{ArrayBase, ArrayViewD, Axis, Data, Dimension};
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{error, info};

/// Serializes an n-dimensional array as nested sequences. Built with [`nested`].
pub struct Nested<'a, A>(ArrayViewD<'a, A>);

/// Wraps `array` so it serializes as nested lists (`[[1, 2], [3, 4]]`).
pub fn nested<A, S, D>(array: &ArrayBase<S, D>) -> Nested<'_, A>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    Nested(array.view().into_dyn())
}

impl<A: Serialize> Serialize for Nested<'_, A> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        if self.0.ndim() == 0 {
            return match self.0.first() {
                Some(scalar) => scalar.serialize(serializer),
                None => serializer.serialize_unit(),
            };
        }
        let mut seq = serializer.serialize_seq(Some(self.0.len_of(Axis(0))))?;
        for sub in self.0.outer_iter() {
            seq.serialize_element(&Nested(sub))?;
        }
        seq.end()
    }
}

/// `serialize_with` adapter writing an array field as nested lists.
pub fn serialize_array<A, S, D, Ser>(
    array: &ArrayBase<S, D>,
    serializer: Ser,
) -> std::result::Result<Ser::Ok, Ser::Error>
where
    A: Serialize,
    S: Data<Elem = A>,
    D: Dimension,
    Ser: Serializer,
{
    nested(array).serialize(serializer)
}

/// Converts an array into nested JSON arrays of native numbers.
pub fn array_to_value<A, S, D>(array: &ArrayBase<S, D>) -> Result<Value>
where
    A: Serialize,
    S: Data<Elem = A>,
    D: Dimension,
{
    Ok(serde_json::to_value(nested(array)).map_err(FileUtilsError::from)?)
}

/// Writes `value` as JSON to `path`, creating the parent directory first.
///
/// JSON has no spelling for `NaN` or the infinities, so non-finite floats are
/// written as `null`.
///
/// # Errors
///
/// Unguarded: serialization, directory creation and write failures propagate.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_value(value).map_err(FileUtilsError::from)?;
    let file =
        File::create(path).with_context(|| format!("Failed to create file {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &json).map_err(FileUtilsError::from)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    info!(
        "Save json data (size = {}) to {} done",
        size_label(&json),
        path.display()
    );
    Ok(())
}

/// Parses the JSON file at `path`.
///
/// Guarded: on any failure the error is logged and an empty object is returned.
pub fn load_json(path: &Path) -> Value {
    let parsed: Result<Value> = File::open(path)
        .with_context(|| format!("Failed to open file {:?}", path))
        .and_then(|file| {
            serde_json::from_reader(BufReader::new(file))
                .map_err(|e| anyhow::anyhow!(FileUtilsError::from(e)))
        });
    match parsed {
        Ok(value) => value,
        Err(e) => {
            error!("Error when load json from {}: {:#}", path.display(), e);
            Value::Object(Map::new())
        }
    }
}

/// Reads `path` as a list of lines and parses each line as a literal.
///
/// # Errors
///
/// Unguarded: read failures propagate, and the first malformed line fails the
/// whole call with [`FileUtilsError::Literal`] (line numbers start at 1). Note
/// that an empty file holds one empty line, which is malformed.
pub fn load_json_lines(path: &Path) -> Result<Vec<Value>> {
    load_list(path)?
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            parse_literal(&line).map_err(|source| {
                anyhow::anyhow!(FileUtilsError::Literal {
                    line: idx + 1,
                    source,
                })
                .context(format!("Failed to parse JSON-lines file {:?}", path))
            })
        })
        .collect()
}
