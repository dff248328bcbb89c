//! # fileutils Convert Command Group
//!
//! File: cli/src/commands/convert/mod.rs
//!
//! ## Overview
//!
//! Routes `fileutils convert <subcommand>` to the format converters. Each
//! subcommand reads with one of the `common::formats` loaders and writes with
//! the matching saver, so the command doubles as a smoke test of the library
//! on real files.
//!
//! ```bash
//! fileutils convert jsonl records.jsonl records.json
//! fileutils convert csv log.csv summary.csv --fields epoch,loss
//! fileutils convert image photo.png photo.jpg
//! ```
//!
use clap::{Parser, Subcommand};
use fileutils::core::config::Config;
use fileutils::core::error::Result;

/// `convert image`: re-encode an image as RGB by output extension.
mod img;
/// `convert jsonl`: literal-syntax lines to one JSON array.
mod jsonl;
/// `convert csv`: rewrite or project a CSV table.
mod table;

/// Arguments for the `fileutils convert` group.
#[derive(Parser, Debug)]
#[command(about = "Convert between the supported file formats")]
pub struct ConvertArgs {
    #[command(subcommand)]
    command: ConvertCommand,
}

#[derive(Subcommand, Debug)]
enum ConvertCommand {
    /// Parse a JSON-lines file (one literal per line) into a JSON array.
    Jsonl(jsonl::JsonlArgs),
    /// Rewrite a CSV file, optionally keeping only some columns.
    Csv(table::CsvArgs),
    /// Decode an image and re-encode it by the output extension.
    Image(img::ImageArgs),
}

pub fn handle_convert(args: ConvertArgs, config: &Config) -> Result<()> {
    match args.command {
        ConvertCommand::Jsonl(sub_args) => jsonl::handle_jsonl(sub_args),
        ConvertCommand::Csv(sub_args) => table::handle_csv(sub_args, config),
        ConvertCommand::Image(sub_args) => img::handle_image(sub_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_subcommands_parse() {
        let args = ConvertArgs::try_parse_from(["convert", "jsonl", "a.jsonl", "a.json"]).unwrap();
        assert!(matches!(args.command, ConvertCommand::Jsonl(_)));

        let args =
            ConvertArgs::try_parse_from(["convert", "csv", "a.csv", "b.csv", "--fields", "x,y"])
                .unwrap();
        assert!(matches!(args.command, ConvertCommand::Csv(_)));

        assert!(ConvertArgs::try_parse_from(["convert", "image", "a.png"]).is_err());
        assert!(ConvertArgs::try_parse_from(["convert"]).is_err());
    }
}
