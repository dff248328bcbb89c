//! File: cli/src/commands/convert/img.rs
//!
//! `fileutils convert image <input> <output>`. The output format follows the
//! output extension; the pixels are always written as 8-bit RGB.
//!
use clap::Parser;
use fileutils::common::formats::imaging::{load_image, save_image};
use fileutils::core::error::{FileUtilsError, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ImageArgs {
    /// Image to decode.
    input: PathBuf,
    /// Output image; the extension selects the encoder.
    output: PathBuf,
}

pub fn handle_image(args: ImageArgs) -> Result<()> {
    let Some(img) = load_image(&args.input) else {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "Could not decode image {}",
            args.input.display()
        )));
    };
    // save_image only logs failures, so check for the output ourselves.
    save_image(&img, &args.output);
    if !args.output.is_file() {
        anyhow::bail!(FileUtilsError::FileSystem(format!(
            "Could not write image {}",
            args.output.display()
        )));
    }
    println!(
        "Wrote {}x{} image to {}",
        img.width(),
        img.height(),
        args.output.display()
    );
    Ok(())
}
