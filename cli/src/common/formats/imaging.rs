//! # fileutils Image I/O
//!
//! File: cli/src/common/formats/imaging.rs
//!
//! Color image load/save on top of the `image` crate. Both helpers are guarded:
//! failures are logged, `load_image` returns `None`, `save_image` returns
//! nothing.
//!
//! Images are always decoded to 8-bit, 3-channel RGB (`RgbImage`), whatever the
//! source has (grayscale, alpha, 16-bit). The crate is built without its `rayon`
//! feature, so decoding runs on the calling thread and scripts that spread
//! images across their own workers are not oversubscribed.
//!
use crate::common::fs::io::ensure_parent_dir;
use crate::core::error::{FileUtilsError, Result};
use anyhow::Context;
use image::{ImageReader, RgbImage};
use std::path::Path;
use tracing::{debug, error};

fn decode(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image header {:?}", path))?;
    let decoded = reader.decode().map_err(FileUtilsError::from)?;
    Ok(decoded.into_rgb8())
}

/// Decodes the image at `path` as 3-channel RGB.
///
/// Returns `None` (after logging) if the file is missing, unreadable or not a
/// decodable image.
pub fn load_image(path: &Path) -> Option<RgbImage> {
    match decode(path) {
        Ok(img) => {
            debug!(
                "Loaded image {}x{} from {}",
                img.width(),
                img.height(),
                path.display()
            );
            Some(img)
        }
        Err(e) => {
            error!("Error when load image from {}: {:#}", path.display(), e);
            None
        }
    }
}

/// Encodes `img` to `path`, picking the format from the file extension.
///
/// Failures (including an unknown extension) are logged, never returned.
pub fn save_image(img: &RgbImage, path: &Path) {
    let result = ensure_parent_dir(path)
        .and_then(|_| img.save(path).map_err(|e| FileUtilsError::from(e).into()));
    if let Err(e) = result {
        error!("Error when save img to {}: {:#}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};
    use std::fs;
    use tempfile::tempdir;

    fn gradient() -> RgbImage {
        RgbImage::from_fn(4, 3, |x, y| Rgb([(x * 60) as u8, (y * 80) as u8, 200]))
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let img = gradient();

        save_image(&img, &path);

        assert_eq!(load_image(&path), Some(img));
    }

    #[test]
    fn test_grayscale_is_loaded_as_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(2, 2, Luma([90])).save(&path).unwrap();

        let img = load_image(&path).expect("decodable image");

        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 1), &Rgb([90, 90, 90]));
    }

    #[test]
    fn test_jpeg_is_encoded_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        save_image(&gradient(), &path);
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(load_image(&path).map(|img| img.dimensions()), Some((4, 3)));
    }

    #[test]
    fn test_missing_or_corrupt_returns_none() {
        let dir = tempdir().unwrap();
        assert_eq!(load_image(&dir.path().join("missing.png")), None);

        let corrupt = dir.path().join("corrupt.png");
        fs::write(&corrupt, b"\x89PNG\r\n\x1a\nnot really").unwrap();
        assert_eq!(load_image(&corrupt), None);
    }

    #[test]
    fn test_unknown_extension_is_logged_not_raised() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.unknownext");
        save_image(&gradient(), &path);
        assert!(!path.exists());
    }
}
