//! raw-preview
//!
//! A thin adapter between image decoding and GPU display: load raster images
//! (including camera RAW formats), normalize them to 8-bit sRGB RGBA, and
//! keep an uploaded preview texture synchronized with the source across
//! edits.
//!
//! Decoding is delegated to the `image` crate, RAW developing to
//! `rawloader` + `imagepipe`, texture allocation to `wgpu`. The crate's own
//! job is the synchronization contract: after every successful
//! [`EditablePreview::load`] or [`EditablePreview::apply`] the preview
//! reflects the current source exactly, and the previous texture has been
//! released exactly once.
//!
//! ```no_run
//! use raw_preview::{EditablePreview, WgpuTextureManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut preview = EditablePreview::new(WgpuTextureManager::new()?);
//! preview.load_path("shot.nef")?;
//! preview.apply(|image| image.brighten(25))?;
//! let texture = preview.preview().expect("fresh after load");
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod decode;
pub mod error;
pub mod gpu;
pub mod preview;

pub use decode::{load_rgba8, ColorSpace, RgbaImageData, SourceImage, RAW_EXTENSIONS};
pub use error::{DecodeError, PreviewError, UploadError};
pub use gpu::{GpuTexture, TextureManager, WgpuTexture, WgpuTextureManager};
pub use preview::EditablePreview;
