//! # fileutils cp / mv Commands
//!
//! File: cli/src/commands/copy.rs
//!
//! ## Overview
//!
//! Front ends for `common::fs::copy`:
//!
//! - `fileutils cp <src> <dst>` copies one file, creating `dst`'s parent.
//! - `fileutils cp --batch pairs.tsv` copies every `src<TAB>dst` line of a
//!   list file in order, logging progress every `copy.progress_interval` pairs.
//!   Failed pairs do not stop the batch, but the command exits with an error
//!   if any pair failed.
//! - `fileutils mv <src> <dst>` moves one file.
//!
use clap::Parser;
use fileutils::common::fs::{copy, io};
use fileutils::core::config::Config;
use fileutils::core::error::{FileUtilsError, Result};
use std::path::{Path, PathBuf};

/// Arguments for `fileutils cp`.
#[derive(Parser, Debug)]
pub struct CpArgs {
    /// Source file.
    #[arg(required_unless_present = "batch")]
    src: Option<PathBuf>,
    /// Destination file (parent directories are created).
    #[arg(required_unless_present = "batch")]
    dst: Option<PathBuf>,
    /// List file with one `src<TAB>dst` pair per line.
    #[arg(long, conflicts_with_all = ["src", "dst"])]
    batch: Option<PathBuf>,
}

/// Arguments for `fileutils mv`.
#[derive(Parser, Debug)]
pub struct MvArgs {
    /// Source file.
    src: PathBuf,
    /// Destination file (parent directories are created).
    dst: PathBuf,
}

pub fn handle_cp(args: CpArgs, config: &Config) -> Result<()> {
    if let Some(batch) = args.batch {
        return copy_batch(&batch, config.copy.progress_interval);
    }
    let (Some(src), Some(dst)) = (args.src, args.dst) else {
        anyhow::bail!(FileUtilsError::ArgumentParsing(
            "cp needs <SRC> <DST> or --batch".to_string()
        ));
    };
    if !copy::copy_file(&src, &dst) {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "Failed to copy {} to {}",
            src.display(),
            dst.display()
        )));
    }
    Ok(())
}

pub fn handle_mv(args: MvArgs) -> Result<()> {
    if !copy::move_file(&args.src, &args.dst) {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "Failed to move {} to {}",
            args.src.display(),
            args.dst.display()
        )));
    }
    Ok(())
}

fn copy_batch(batch: &Path, progress_interval: usize) -> Result<()> {
    let pairs = parse_pairs(&io::load_list(batch)?)?;
    let copied = copy::copy_files_with_progress(&pairs, progress_interval);
    println!("Copied {}/{} files", copied, pairs.len());
    if copied < pairs.len() {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "{} of {} copies failed",
            pairs.len() - copied,
            pairs.len()
        )));
    }
    Ok(())
}

/// Splits `src<TAB>dst` lines; blank lines are skipped.
fn parse_pairs(lines: &[String]) -> Result<Vec<(PathBuf, PathBuf)>> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| match line.split_once('\t') {
            Some((src, dst)) => Ok((PathBuf::from(src), PathBuf::from(dst))),
            None => Err(FileUtilsError::ArgumentParsing(format!(
                "line {} of the batch file has no tab separator",
                idx + 1
            ))
            .into()),
        })
        .collect()
}
