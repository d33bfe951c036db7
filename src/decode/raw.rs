//! RAW camera format decoding
//!
//! This module loads actual sensor data from RAW byte streams (not embedded
//! JPEGs) via rawloader and develops it into display-ready pixels with
//! imagepipe: demosaic, camera white balance, sRGB-encoded 8-bit output.

use std::io::Cursor;

use image::{DynamicImage, RgbImage};
use log::debug;

use super::source::{ColorSpace, SourceImage};
use crate::error::DecodeError;

/// RAW camera formats supported by extension hint.
///
/// Each of these needs the develop step (white balance + sRGB output) to
/// avoid the strong color casts undeveloped sensor data shows.
pub const RAW_EXTENSIONS: [&str; 7] = ["nef", "cr2", "dng", "arw", "raf", "orf", "rw2"];

/// Check whether a format hint names a supported RAW camera format.
///
/// Hints are matched case-insensitively and may carry a leading dot
/// (".NEF" and "nef" both match).
pub fn is_raw_extension(hint: &str) -> bool {
    let ext = hint.trim_start_matches('.').to_ascii_lowercase();
    RAW_EXTENSIONS.contains(&ext.as_str())
}

/// Decode and develop a RAW byte stream into an sRGB 8-bit source image.
///
/// The develop pipeline applies the camera's as-shot white balance and any
/// orientation stored in the RAW metadata, so the result needs no further
/// orientation handling. The output is plain RGB; RAW sensor data has no
/// real transparency.
pub fn decode_raw(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let raw = rawloader::decode(&mut Cursor::new(bytes))
        .map_err(|e| DecodeError::Raw(e.to_string()))?;

    debug!(
        "decoded RAW sensor data: {}x{} ({})",
        raw.width, raw.height, raw.clean_make
    );

    let mut pipeline = imagepipe::Pipeline::new_from_source(imagepipe::ImageSource::Raw(raw))
        .map_err(DecodeError::Develop)?;
    let developed = pipeline.output_8bit(None).map_err(DecodeError::Develop)?;

    let width = developed.width as u32;
    let height = developed.height as u32;
    let rgb = RgbImage::from_raw(width, height, developed.data).ok_or_else(|| {
        DecodeError::Develop(format!(
            "develop output does not match {}x{} RGB",
            width, height
        ))
    })?;

    Ok(SourceImage::from_pixels(
        DynamicImage::ImageRgb8(rgb),
        ColorSpace::Srgb,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_extension_matching() {
        assert!(is_raw_extension("nef"));
        assert!(is_raw_extension("NEF"));
        assert!(is_raw_extension(".cr2"));
        assert!(is_raw_extension(".RW2"));
        assert!(is_raw_extension("dng"));
    }

    #[test]
    fn test_non_raw_extensions_rejected() {
        assert!(!is_raw_extension("jpg"));
        assert!(!is_raw_extension("png"));
        assert!(!is_raw_extension("tiff"));
        assert!(!is_raw_extension(""));
        assert!(!is_raw_extension("."));
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let result = decode_raw(b"definitely not sensor data");
        assert!(matches!(result, Err(DecodeError::Raw(_))));
    }
}
