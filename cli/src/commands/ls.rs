//! # fileutils ls Command
//!
//! File: cli/src/commands/ls.rs
//!
//! ## Overview
//!
//! Implements `fileutils ls`, a front end for the listing helpers in
//! `common::fs::paths`. By default it prints the paths of the regular files
//! directly inside a directory, one per line.
//!
//! ```bash
//! fileutils ls data/                      # immediate files, as paths
//! fileutils ls data/ --dirs --names       # immediate subdirectory names
//! fileutils ls data/ -r --absolute -e .jpg -e .png
//! ```
//!
use clap::Parser;
use fileutils::common::fs::paths;
use fileutils::core::error::Result;
use std::path::PathBuf;
use tracing::debug;

/// Arguments for `fileutils ls`.
#[derive(Parser, Debug)]
pub struct LsArgs {
    /// Directory to list.
    dir: PathBuf,
    /// List subdirectories instead of files.
    #[arg(long, conflicts_with = "recursive")]
    dirs: bool,
    /// Print bare names instead of paths.
    #[arg(long, conflicts_with = "recursive")]
    names: bool,
    /// Walk the whole subtree and list every file.
    #[arg(short, long)]
    recursive: bool,
    /// Print absolute paths (with --recursive).
    #[arg(long, requires = "recursive")]
    absolute: bool,
    /// Keep only entries ending with this suffix. Repeatable.
    #[arg(short = 'e', long = "ext")]
    extensions: Vec<String>,
}

/// Prints the selected entries of `args.dir`.
pub fn handle_ls(args: LsArgs) -> Result<()> {
    for entry in collect_entries(&args)? {
        println!("{entry}");
    }
    Ok(())
}

fn collect_entries(args: &LsArgs) -> Result<Vec<String>> {
    let to_strings =
        |found: Vec<PathBuf>| found.iter().map(|p| p.display().to_string()).collect::<Vec<_>>();
    let listed = if args.recursive {
        to_strings(paths::list_all_file_paths(&args.dir, args.absolute))
    } else {
        match (args.dirs, args.names) {
            (true, true) => paths::list_subdirectory_names(&args.dir)?,
            (true, false) => to_strings(paths::list_subdirectory_paths(&args.dir)?),
            (false, true) => paths::list_file_names(&args.dir)?,
            (false, false) => to_strings(paths::list_file_paths(&args.dir)?),
        }
    };
    debug!("Listed {} entries in {}", listed.len(), args.dir.display());
    if args.extensions.is_empty() {
        return Ok(listed);
    }
    let extensions: Vec<&str> = args.extensions.iter().map(String::as_str).collect();
    Ok(paths::filter_by_extension(&listed, &extensions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parses_flags() {
        let args = LsArgs::try_parse_from(["ls", "data", "-r", "--absolute", "-e", ".png"]).unwrap();
        assert!(args.recursive);
        assert!(args.absolute);
        assert_eq!(args.extensions, vec![".png"]);
    }

    #[test]
    fn test_absolute_requires_recursive() {
        assert!(LsArgs::try_parse_from(["ls", "data", "--absolute"]).is_err());
        assert!(LsArgs::try_parse_from(["ls", "data", "--dirs", "-r"]).is_err());
    }

    #[test]
    fn test_collect_filters_by_extension() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.png"), "")?;
        fs::write(dir.path().join("b.txt"), "")?;
        fs::create_dir(dir.path().join("sub.png"))?;
        let root = dir.path().to_str().unwrap();

        let args = LsArgs::try_parse_from(["ls", root, "--names", "-e", ".png"]).unwrap();
        assert_eq!(collect_entries(&args)?, vec!["a.png"]);

        let args = LsArgs::try_parse_from(["ls", root, "--dirs", "--names"]).unwrap();
        assert_eq!(collect_entries(&args)?, vec!["sub.png"]);
        Ok(())
    }
}
