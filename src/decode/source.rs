//! The authoritative in-memory source image
//!
//! [`SourceImage`] wraps the decoded pixel data together with a color-space
//! tag and exposes the narrow set of operations the preview adapter needs:
//! duplicate, convert to sRGB, force opaque alpha, serialize to RGBA8, plus
//! a handful of in-place edits.

use std::io::Cursor;

use image::{DynamicImage, ImageDecoder, ImageReader};
use log::debug;

use super::raw;
use crate::color;
use crate::error::DecodeError;

/// Color space of the decoded pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// sRGB-encoded values, ready for an 8-bit display buffer.
    Srgb,
    /// Linear-light values, as decoded from HDR/EXR sources.
    Linear,
}

/// A decoded, possibly high-bit-depth image owned by the adapter.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: DynamicImage,
    color_space: ColorSpace,
}

impl SourceImage {
    /// Decode a byte stream into a source image.
    ///
    /// A format hint naming a RAW camera extension routes the bytes through
    /// the RAW develop pipeline and forces the alpha channel opaque. If the
    /// RAW decoder rejects the stream the general decoder gets a try, but a
    /// failure there still reports the RAW error since the hint promised
    /// sensor data. All other hints are ignored; the general decoder guesses
    /// the format from magic bytes.
    pub fn decode(bytes: &[u8], format_hint: Option<&str>) -> Result<Self, DecodeError> {
        if let Some(hint) = format_hint.filter(|h| raw::is_raw_extension(h)) {
            let mut image = match raw::decode_raw(bytes) {
                Ok(image) => image,
                Err(raw_err) => {
                    debug!("RAW decode of `{hint}` hint failed ({raw_err}), trying general decoder");
                    Self::decode_general(bytes).map_err(|_| raw_err)?
                }
            };
            // RAW sensor data has no real transparency; an alpha channel a
            // decoder attaches must not affect later blending.
            image.strip_alpha();
            return Ok(image);
        }
        Self::decode_general(bytes)
    }

    fn decode_general(bytes: &[u8]) -> Result<Self, DecodeError> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let format = reader.format();
        let mut decoder = reader.into_decoder()?;
        // Orientation must be read before the decoder is consumed
        let orientation = decoder.orientation()?;
        let mut pixels = DynamicImage::from_decoder(decoder)?;
        pixels.apply_orientation(orientation);

        let color_space = match pixels {
            DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => ColorSpace::Linear,
            _ => ColorSpace::Srgb,
        };

        debug!("decoded image format: {:?}", format);
        debug!("decoded image color space: {:?}", color_space);

        Ok(Self {
            pixels,
            color_space,
        })
    }

    /// Wrap already-decoded pixels. This is also the seam tests use to build
    /// sources without a codec.
    pub fn from_pixels(pixels: DynamicImage, color_space: ColorSpace) -> Self {
        Self {
            pixels,
            color_space,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Bits per channel of the backing pixel buffer.
    pub fn bit_depth(&self) -> u8 {
        let color = self.pixels.color();
        (color.bits_per_pixel() / color.channel_count() as u16) as u8
    }

    /// Deep copy. The duplicate never shares mutable storage with `self`,
    /// so edits to one can never retroactively alter the other.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Convert the pixel values to sRGB. A no-op when the image is already
    /// tagged sRGB, so repeated conversion is byte-identical.
    pub fn convert_to_srgb(&mut self) {
        if self.color_space == ColorSpace::Srgb {
            return;
        }
        color::linear_to_srgb_in_place(&mut self.pixels);
        self.color_space = ColorSpace::Srgb;
    }

    /// Force the alpha channel fully opaque, in place. Images without an
    /// alpha channel are left as they are.
    pub fn strip_alpha(&mut self) {
        match &mut self.pixels {
            DynamicImage::ImageRgba8(buf) => {
                for pixel in buf.pixels_mut() {
                    pixel.0[3] = u8::MAX;
                }
            }
            DynamicImage::ImageRgba16(buf) => {
                for pixel in buf.pixels_mut() {
                    pixel.0[3] = u16::MAX;
                }
            }
            DynamicImage::ImageRgba32F(buf) => {
                for pixel in buf.pixels_mut() {
                    pixel.0[3] = 1.0;
                }
            }
            DynamicImage::ImageLumaA8(buf) => {
                for pixel in buf.pixels_mut() {
                    pixel.0[1] = u8::MAX;
                }
            }
            DynamicImage::ImageLumaA16(buf) => {
                for pixel in buf.pixels_mut() {
                    pixel.0[1] = u16::MAX;
                }
            }
            _ => {}
        }
    }

    /// Serialize to an interleaved 8-bit RGBA buffer of exactly
    /// `width * height * 4` bytes. Higher-precision sources are downsampled;
    /// the preview does not need master precision.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        self.pixels.to_rgba8().into_raw()
    }

    /// Borrow the backing pixel data.
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Mutably borrow the backing pixel data for arbitrary edits.
    pub fn pixels_mut(&mut self) -> &mut DynamicImage {
        &mut self.pixels
    }

    // ===== In-place edit helpers =====

    /// Brighten (positive) or darken (negative) every channel.
    pub fn brighten(&mut self, value: i32) {
        self.pixels = self.pixels.brighten(value);
    }

    /// Adjust contrast; positive increases, negative decreases.
    pub fn adjust_contrast(&mut self, contrast: f32) {
        self.pixels = self.pixels.adjust_contrast(contrast);
    }

    /// Drop color information.
    pub fn grayscale(&mut self) {
        self.pixels = self.pixels.grayscale();
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotate90(&mut self) {
        self.pixels = self.pixels.rotate90();
    }

    /// Rotate 180 degrees.
    pub fn rotate180(&mut self) {
        self.pixels = self.pixels.rotate180();
    }

    /// Rotate 270 degrees clockwise.
    pub fn rotate270(&mut self) {
        self.pixels = self.pixels.rotate270();
    }

    /// Mirror along the vertical axis.
    pub fn flip_horizontal(&mut self) {
        self.pixels = self.pixels.fliph();
    }

    /// Mirror along the horizontal axis.
    pub fn flip_vertical(&mut self) {
        self.pixels = self.pixels.flipv();
    }
}
