//! Color transfer utilities
//!
//! This module handles conversion between linear-light pixel values
//! (as produced by HDR/EXR decoders) and the sRGB-encoded values the
//! preview texture expects.

use image::DynamicImage;

/// Threshold below which the sRGB transfer function is linear
/// Source: IEC 61966-2-1:1999 (sRGB standard)
const SRGB_LINEAR_CUTOFF: f32 = 0.003_130_8;

/// Encode a single linear-light channel value into sRGB.
///
/// Input is clamped to [0.0, 1.0] first; HDR sources can exceed that range
/// and the 8-bit preview cannot represent it anyway.
pub fn srgb_encode(linear: f32) -> f32 {
    let c = linear.clamp(0.0, 1.0);
    if c <= SRGB_LINEAR_CUTOFF {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Decode a single sRGB-encoded channel value back to linear light.
pub fn srgb_decode(encoded: f32) -> f32 {
    let c = encoded.clamp(0.0, 1.0);
    if c <= 12.92 * SRGB_LINEAR_CUTOFF {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Apply the sRGB transfer function in place to a linear-light image.
///
/// Only the floating-point variants carry linear data; integer variants are
/// already sRGB-encoded by their container formats and are left untouched.
/// Alpha is coverage, not light, and is never transformed.
pub fn linear_to_srgb_in_place(image: &mut DynamicImage) {
    match image {
        DynamicImage::ImageRgb32F(buf) => {
            for pixel in buf.pixels_mut() {
                for channel in &mut pixel.0 {
                    *channel = srgb_encode(*channel);
                }
            }
        }
        DynamicImage::ImageRgba32F(buf) => {
            for pixel in buf.pixels_mut() {
                for channel in &mut pixel.0[..3] {
                    *channel = srgb_encode(*channel);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgb32FImage};

    #[test]
    fn test_encode_endpoints() {
        assert_eq!(srgb_encode(0.0), 0.0);
        assert!((srgb_encode(1.0) - 1.0).abs() < 1e-6);
        // Out-of-range HDR values clamp instead of overshooting
        assert!((srgb_encode(4.2) - 1.0).abs() < 1e-6);
        assert_eq!(srgb_encode(-0.5), 0.0);
    }

    #[test]
    fn test_encode_is_monotonic() {
        let mut last = -1.0;
        for i in 0..=100 {
            let encoded = srgb_encode(i as f32 / 100.0);
            assert!(encoded > last);
            last = encoded;
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        for i in 0..=20 {
            let linear = i as f32 / 20.0;
            let roundtrip = srgb_decode(srgb_encode(linear));
            assert!((roundtrip - linear).abs() < 1e-5);
        }
    }

    #[test]
    fn test_in_place_conversion() {
        let mut buf = Rgb32FImage::from_pixel(2, 2, Rgb([0.5, 0.5, 0.5]));
        buf.put_pixel(0, 0, Rgb([0.0, 0.25, 1.0]));
        let mut image = DynamicImage::ImageRgb32F(buf);
        linear_to_srgb_in_place(&mut image);

        let converted = match &image {
            DynamicImage::ImageRgb32F(buf) => buf.get_pixel(0, 0).0,
            _ => unreachable!(),
        };
        assert_eq!(converted[0], 0.0);
        assert!((converted[1] - srgb_encode(0.25)).abs() < 1e-6);
        assert!((converted[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_integer_images_left_untouched() {
        // Integer images are already sRGB-encoded and must not change
        let mut rgb8 = DynamicImage::new_rgb8(2, 2);
        let before = rgb8.clone().into_bytes();
        linear_to_srgb_in_place(&mut rgb8);
        assert_eq!(rgb8.into_bytes(), before);
    }
}
