//! File: cli/src/commands/convert/jsonl.rs
//!
//! `fileutils convert jsonl <input> <output>`: every line of `input` is parsed
//! as a literal (single quotes, `True`/`None`, tuples and sets are accepted)
//! and the values are written to `output` as one JSON array.
//!
use clap::Parser;
use fileutils::common::formats::json::{load_json_lines, save_json};
use fileutils::core::error::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct JsonlArgs {
    /// JSON-lines input, one value per line.
    input: PathBuf,
    /// JSON output file.
    output: PathBuf,
}

pub fn handle_jsonl(args: JsonlArgs) -> Result<()> {
    let values = load_json_lines(&args.input)?;
    save_json(&values, &args.output)?;
    println!("Converted {} lines to {}", values.len(), args.output.display());
    Ok(())
}
