//! # fileutils CSV Tables
//!
//! File: cli/src/common/formats/tabular.rs
//!
//! ## Overview
//!
//! A small in-memory table (`Table`: named ordered columns, rows of string
//! cells) with CSV load/save on top of the `csv` crate.
//!
//! - **`load_csv`** (*guarded*): returns `None` (after logging) on any I/O or
//!   parse failure, and for a file with no data at all.
//! - **`save_csv`** (*unguarded*): optionally projects to an ordered subset of
//!   columns, writes a header row (unless disabled) and no index column.
//!
//! Cells stay strings; callers pick types per column with
//! [`Table::parse_column`].
//!
use crate::common::formats::{size_label, DescribeSize};
use crate::common::fs::io::ensure_parent_dir;
use crate::core::error::{FileUtilsError, Result};
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;
use tracing::{error, info};

/// Dialect options passed through to the CSV reader and writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator.
    pub delimiter: u8,
    /// Whether the first record holds the column names. Without one, columns
    /// are named `"0"`, `"1"`, ...
    pub has_headers: bool,
    /// Quote character.
    pub quote: u8,
    /// Lines starting with this byte are skipped when reading.
    pub comment: Option<u8>,
    /// Accept records with differing field counts when reading; short rows are
    /// padded with empty cells and long rows truncated.
    pub flexible: bool,
    /// Trim surrounding whitespace from headers and fields when reading.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            quote: b'"',
            comment: None,
            flexible: false,
            trim: false,
        }
    }
}

/// Rows of string cells under named, ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Fails if the row width does not match the number of columns.
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) -> Result<()> {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            anyhow::bail!(
                "Row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Parses every cell of the named column as `T`.
    ///
    /// # Errors
    ///
    /// Fails if the column is missing or a cell does not parse.
    pub fn parse_column<T>(&self, name: &str) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let cells = self.column(name).ok_or_else(|| FileUtilsError::MissingColumn {
            name: name.to_string(),
        })?;
        cells
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.parse::<T>().map_err(|e| {
                    anyhow::anyhow!("Column '{}', row {}: cannot parse {:?}: {}", name, row, cell, e)
                })
            })
            .collect()
    }

    /// A new table with only `fields`, in the given order.
    ///
    /// # Errors
    ///
    /// Fails with [`FileUtilsError::MissingColumn`] for an unknown field.
    pub fn select(&self, fields: &[&str]) -> Result<Table> {
        let indices = fields
            .iter()
            .map(|field| {
                self.column_index(field)
                    .ok_or_else(|| FileUtilsError::MissingColumn {
                        name: field.to_string(),
                    })
            })
            .collect::<std::result::Result<Vec<usize>, FileUtilsError>>()?;
        Ok(Table {
            columns: fields.iter().map(|f| f.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }
}

impl DescribeSize for Table {
    fn describe_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

fn read_table(path: &Path, options: &CsvOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .quote(options.quote)
        .comment(options.comment)
        .flexible(options.flexible)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file {:?}", path))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(FileUtilsError::from)?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }

    let columns: Vec<String> = if options.has_headers {
        reader
            .headers()
            .map_err(FileUtilsError::from)?
            .iter()
            .map(str::to_string)
            .collect()
    } else {
        let width = records.first().map_or(0, Vec::len);
        (0..width).map(|i| i.to_string()).collect()
    };
    if columns.is_empty() {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "No columns to parse from file {:?}",
            path
        )));
    }

    for row in &mut records {
        // Only reachable with `flexible`; strict readers reject ragged rows.
        row.resize(columns.len(), String::new());
    }
    Ok(Table {
        columns,
        rows: records,
    })
}

/// Loads a CSV file into a [`Table`].
///
/// Guarded: returns `None` after logging on any failure, including a file with
/// no columns.
pub fn load_csv(path: &Path, options: &CsvOptions) -> Option<Table> {
    match read_table(path, options) {
        Ok(table) => {
            info!(
                "Read csv data (size = {}) from {} done",
                size_label(&table),
                path.display()
            );
            Some(table)
        }
        Err(e) => {
            error!("Error {:#} when load csv data from {}", e, path.display());
            None
        }
    }
}

/// Writes `table` (or its projection onto `fields`) to `path`.
///
/// # Errors
///
/// Unguarded: unknown fields, directory creation and write failures propagate.
pub fn save_csv(
    table: &Table,
    path: &Path,
    fields: Option<&[&str]>,
    options: &CsvOptions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    let projected;
    let table = match fields {
        Some(fields) => {
            projected = table.select(fields)?;
            &projected
        }
        None => table,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote(options.quote)
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file {:?}", path))?;
    if options.has_headers {
        writer
            .write_record(table.columns())
            .map_err(FileUtilsError::from)?;
    }
    for row in table.rows() {
        writer.write_record(row).map_err(FileUtilsError::from)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    info!(
        "Save csv data (size = {}) to {} done",
        size_label(table),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn log_table() -> Table {
        let mut table = Table::new(["Epoch", "Loss", "Note"]);
        table.push_row(["2", "0.5", "warm, up"]).unwrap();
        table.push_row(["1", "0.9", ""]).unwrap();
        table
    }

    #[test]
    fn test_csv_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs/run/log.csv");
        let table = log_table();

        save_csv(&table, &path, None, &CsvOptions::default())?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "Epoch,Loss,Note\n2,0.5,\"warm, up\"\n1,0.9,\n"
        );
        assert_eq!(load_csv(&path, &CsvOptions::default()), Some(table));
        Ok(())
    }

    #[test]
    fn test_save_csv_projects_fields_in_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("subset.csv");
        save_csv(&log_table(), &path, Some(&["Loss", "Epoch"]), &CsvOptions::default())?;
        assert_eq!(fs::read_to_string(&path)?, "Loss,Epoch\n0.5,2\n0.9,1\n");
        Ok(())
    }

    #[test]
    fn test_save_csv_unknown_field_propagates() -> Result<()> {
        let dir = tempdir()?;
        let result = save_csv(
            &log_table(),
            &dir.path().join("x.csv"),
            Some(&["Missing"]),
            &CsvOptions::default(),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Column 'Missing' not found"));
        Ok(())
    }

    #[test]
    fn test_load_csv_with_options() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.tsv");
        fs::write(&path, "# comment\na\t1\nb\t2\n")?;
        let options = CsvOptions {
            delimiter: b'\t',
            has_headers: false,
            comment: Some(b'#'),
            ..CsvOptions::default()
        };

        let table = load_csv(&path, &options).expect("table");

        assert_eq!(table.columns(), ["0", "1"]);
        assert_eq!(table.parse_column::<i32>("1")?, vec![1, 2]);
        assert_eq!(table.column("0"), Some(vec!["a", "b"]));
        Ok(())
    }

    #[test]
    fn test_parse_column_reports_bad_cell() {
        let table = log_table();
        assert_eq!(table.parse_column::<f64>("Loss").unwrap(), vec![0.5, 0.9]);
        assert!(table.parse_column::<i32>("Note").is_err());
        assert!(table.parse_column::<i32>("Nope").is_err());
    }

    #[test]
    fn test_load_csv_failures_return_none() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(load_csv(&dir.path().join("missing.csv"), &CsvOptions::default()), None);

        let empty = dir.path().join("empty.csv");
        fs::write(&empty, "")?;
        assert_eq!(load_csv(&empty, &CsvOptions::default()), None);

        let ragged = dir.path().join("ragged.csv");
        fs::write(&ragged, "a,b\n1,2,3\n")?;
        assert_eq!(load_csv(&ragged, &CsvOptions::default()), None);
        Ok(())
    }

    #[test]
    fn test_flexible_rows_are_padded() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b,c\n1\n1,2,3\n")?;
        let options = CsvOptions {
            flexible: true,
            ..CsvOptions::default()
        };
        let table = load_csv(&path, &options).expect("table");
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        Ok(())
    }

    #[test]
    fn test_size_is_row_count() {
        let table = log_table();
        assert_eq!(table.describe_size(), Some(2));
        assert_eq!(size_label(&Table::new(["only"])), "0");
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut table = Table::new(["a", "b"]);
        assert!(table.push_row(["only one"]).is_err());
        assert!(table.is_empty());
    }
}
