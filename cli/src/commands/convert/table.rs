//! File: cli/src/commands/convert/table.rs
//!
//! `fileutils convert csv <input> <output> [--fields a,b]`. Reading and writing
//! both use the `[csv]` dialect from the configuration.
//!
use clap::Parser;
use fileutils::common::formats::tabular::{load_csv, save_csv};
use fileutils::core::config::Config;
use fileutils::core::error::{FileUtilsError, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CsvArgs {
    /// CSV input file.
    input: PathBuf,
    /// CSV output file.
    output: PathBuf,
    /// Columns to keep, in output order.
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,
}

pub fn handle_csv(args: CsvArgs, config: &Config) -> Result<()> {
    let options = config.csv.to_options();
    let Some(table) = load_csv(&args.input, &options) else {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "Could not read CSV data from {}",
            args.input.display()
        )));
    };
    let fields: Option<Vec<&str>> = args
        .fields
        .as_ref()
        .map(|fields| fields.iter().map(String::as_str).collect());
    save_csv(&table, &args.output, fields.as_deref(), &options)?;
    println!("Wrote {} rows to {}", table.len(), args.output.display());
    Ok(())
}
