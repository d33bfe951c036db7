//! Error types for decoding and preview upload
//!
//! Decode failures never disturb the adapter's current state; upload
//! failures propagate after the previous texture has already been released.

use thiserror::Error;

/// Failure to turn a byte stream into a [`SourceImage`](crate::SourceImage).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream could not be read (path-based loads).
    #[error("failed to read image data: {0}")]
    Io(#[from] std::io::Error),

    /// The general-purpose decoder rejected the stream.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// The RAW decoder rejected the stream.
    #[error("failed to decode RAW data: {0}")]
    Raw(String),

    /// The RAW develop pipeline could not produce sRGB output.
    #[error("RAW processing failed: {0}")]
    Develop(String),
}

/// Failure to create a GPU texture from an RGBA8 buffer.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No suitable GPU adapter was found on this system.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// The adapter refused to hand out a device.
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The pixel buffer does not match the advertised dimensions.
    #[error("pixel buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Top-level error for [`EditablePreview`](crate::EditablePreview) operations.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
