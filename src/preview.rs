//! Editable image with a GPU-synchronized preview
//!
//! [`EditablePreview`] owns a high-precision source image and keeps a derived
//! low-precision GPU texture in step with it: every successful load or edit
//! re-normalizes the pixels to sRGB RGBA8 and re-uploads them, releasing the
//! previous texture first so nothing leaks.

use crate::decode::SourceImage;
use crate::error::PreviewError;
use crate::gpu::{GpuTexture, TextureManager};

/// An image that can be loaded, edited and rendered from an always-fresh
/// GPU preview texture.
///
/// The adapter keeps two copies of the source: the pristine `original` as
/// decoded, and the `working` copy the preview is derived from. Edits are
/// non-destructive; every [`apply`](Self::apply) starts from a fresh clone
/// of the original.
pub struct EditablePreview<M: TextureManager> {
    textures: M,
    original: Option<SourceImage>,
    working: Option<SourceImage>,
    preview: Option<Box<dyn GpuTexture>>,
}

impl<M: TextureManager> EditablePreview<M> {
    pub fn new(textures: M) -> Self {
        Self {
            textures,
            original: None,
            working: None,
            preview: None,
        }
    }

    /// Decode `bytes` into a new source image, replacing any previous one,
    /// and upload a fresh preview.
    ///
    /// A RAW format hint routes through the RAW develop pipeline (camera
    /// white balance, sRGB output, alpha forced opaque); see
    /// [`SourceImage::decode`]. On decode failure the previous source and
    /// preview stay exactly as they were.
    pub fn load(&mut self, bytes: &[u8], format_hint: Option<&str>) -> Result<(), PreviewError> {
        let decoded = SourceImage::decode(bytes, format_hint)?;
        self.working = Some(decoded.duplicate());
        self.original = Some(decoded);
        self.sync_to_gpu()
    }

    /// Load from a file, using the extension as the format hint.
    pub fn load_path(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), PreviewError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(crate::error::DecodeError::Io)?;
        let hint = path.extension().and_then(|ext| ext.to_str());
        self.load(&bytes, hint)
    }

    /// Run an edit against a fresh clone of the original image and make the
    /// result the new working copy, then upload a fresh preview.
    ///
    /// A silent no-op when nothing is loaded yet; there is nothing to edit.
    pub fn apply<F>(&mut self, edit: F) -> Result<(), PreviewError>
    where
        F: FnOnce(&mut SourceImage),
    {
        let Some(original) = &self.original else {
            return Ok(());
        };
        let mut working = original.duplicate();
        edit(&mut working);
        self.working = Some(working);
        self.sync_to_gpu()
    }

    /// The current working image, if one is loaded.
    pub fn image(&self) -> Option<&SourceImage> {
        self.working.as_ref()
    }

    /// The current preview texture, if one is loaded. Never stale: it always
    /// reflects the working image as of the last successful load or apply.
    pub fn preview(&self) -> Option<&dyn GpuTexture> {
        self.preview.as_deref()
    }

    /// Release the source images and any live preview texture. Safe to call
    /// repeatedly and before anything was ever loaded.
    pub fn dispose(&mut self) {
        self.original = None;
        self.working = None;
        if let Some(mut texture) = self.preview.take() {
            texture.release();
        }
    }

    /// Re-derive the preview from the working image.
    ///
    /// The working image is cloned before normalization so future edits can
    /// never alter an already-uploaded preview. The old texture is released
    /// before the upload is attempted; an upload failure propagates with the
    /// old texture already gone rather than leaking it.
    fn sync_to_gpu(&mut self) -> Result<(), PreviewError> {
        let Some(image) = &self.working else {
            return Ok(());
        };
        let mut scratch = image.duplicate();
        scratch.convert_to_srgb();
        let (width, height) = (scratch.width(), scratch.height());
        let bytes = scratch.to_rgba8_bytes();

        if let Some(mut previous) = self.preview.take() {
            previous.release();
        }
        self.preview = Some(self.textures.from_pixel_data(width, height, &bytes)?);
        Ok(())
    }
}

impl<M: TextureManager> Drop for EditablePreview<M> {
    fn drop(&mut self) {
        self.dispose();
    }
}
