//! # fileutils time Command
//!
//! File: cli/src/commands/time.rs
//!
//! Prints the current local time, formatted with `--format` or the configured
//! `time.format` (default `%Y-%m-%d %H:%M:%S`). Handy for naming run folders:
//!
//! ```bash
//! mkdir "runs/$(fileutils time -f %Y%m%d-%H%M%S)"
//! ```
//!
use clap::Parser;
use fileutils::common::time::time_string;
use fileutils::core::config::Config;
use fileutils::core::error::{FileUtilsError, Result};

/// Arguments for `fileutils time`.
#[derive(Parser, Debug)]
pub struct TimeArgs {
    /// strftime-style format, e.g. `%Y%m%d`.
    #[arg(short, long)]
    format: Option<String>,
}

pub fn handle_time(args: TimeArgs, config: &Config) -> Result<()> {
    let fmt = args.format.as_deref().unwrap_or(&config.time.format);
    let rendered = time_string(None, Some(fmt));
    if rendered.is_empty() && !fmt.is_empty() {
        anyhow::bail!(FileUtilsError::ArgumentParsing(format!(
            "Invalid time format: {:?}",
            fmt
        )));
    }
    println!("{rendered}");
    Ok(())
}
