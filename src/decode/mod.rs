//! Image ingestion
//!
//! This module handles:
//! - Decoding common raster formats with orientation normalization
//! - Decoding and developing camera RAW formats
//! - One-shot loading straight to sRGB RGBA8 bytes

pub mod raw;
pub mod source;

pub use raw::{is_raw_extension, RAW_EXTENSIONS};
pub use source::{ColorSpace, SourceImage};

use crate::error::DecodeError;

/// A fully normalized image: sRGB, 8-bit, interleaved RGBA.
#[derive(Debug, Clone)]
pub struct RgbaImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Decode a byte stream straight to display-ready RGBA8 bytes.
///
/// Convenience entry for hosts that want normalized pixels without keeping
/// an editable source around: decode with format guessing, apply embedded
/// orientation, force sRGB and serialize.
pub fn load_rgba8(bytes: &[u8]) -> Result<RgbaImageData, DecodeError> {
    let mut image = SourceImage::decode(bytes, None)?;
    image.convert_to_srgb();
    Ok(RgbaImageData {
        width: image.width(),
        height: image.height(),
        data: image.to_rgba8_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn test_load_rgba8_normalizes() {
        let green = RgbaImage::from_pixel(5, 4, Rgba([0, 255, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(green)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();

        let loaded = load_rgba8(&bytes.into_inner()).unwrap();
        assert_eq!((loaded.width, loaded.height), (5, 4));
        assert_eq!(loaded.data.len(), 5 * 4 * 4);
        assert!(loaded
            .data
            .chunks_exact(4)
            .all(|c| c == [0, 255, 0, 255]));
    }

    #[test]
    fn test_load_rgba8_rejects_garbage() {
        assert!(load_rgba8(b"\x00\x01\x02").is_err());
    }
}
