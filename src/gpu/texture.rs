//! Preview texture creation and release
//!
//! The adapter talks to the GPU through two narrow traits so its sync logic
//! is testable without a device. The real implementation wraps wgpu: one
//! `Rgba8UnormSrgb` texture per preview, uploaded with `Queue::write_texture`
//! and torn down with `Texture::destroy`.

use log::debug;

use crate::error::UploadError;

/// An opaque GPU texture holding one uploaded preview.
pub trait GpuTexture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Release the GPU resource. Must be idempotent; the texture must not
    /// be sampled afterwards.
    fn release(&mut self);
}

/// Allocates GPU textures from RGBA8 pixel buffers.
pub trait TextureManager {
    /// Upload `pixels` (exactly `width * height * 4` bytes, interleaved
    /// RGBA8) into a new texture.
    fn from_pixel_data(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Box<dyn GpuTexture>, UploadError>;
}

/// Reject pixel buffers that do not match the advertised dimensions before
/// anything reaches the driver.
pub fn validate_buffer(width: u32, height: u32, len: usize) -> Result<(), UploadError> {
    let expected = width as usize * height as usize * 4;
    if len != expected {
        return Err(UploadError::BufferSize {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// wgpu-backed texture manager.
pub struct WgpuTextureManager {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl WgpuTextureManager {
    /// Stand up a dedicated device and queue.
    pub fn new() -> Result<Self, UploadError> {
        pollster::block_on(Self::new_async())
    }

    async fn new_async() -> Result<Self, UploadError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(UploadError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Preview Texture Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        Ok(Self { device, queue })
    }

    /// Adopt a device and queue owned by the host application.
    pub fn from_device(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl TextureManager for WgpuTextureManager {
    fn from_pixel_data(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Box<dyn GpuTexture>, UploadError> {
        validate_buffer(width, height, pixels.len())?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        // Pixel bytes are sRGB-encoded, so the texture is tagged sRGB and
        // sampling returns linear values
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Preview Texture (Rgba8UnormSrgb)"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        debug!("uploading {} bytes of RGBA8 preview data to GPU", pixels.len());
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Box::new(WgpuTexture {
            texture,
            view,
            width,
            height,
            released: false,
        }))
    }
}

/// One uploaded preview living on a wgpu device.
pub struct WgpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
    released: bool,
}

impl WgpuTexture {
    /// The underlying texture, for hosts that build their own bind groups.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// A default view over the whole texture.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl GpuTexture for WgpuTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn release(&mut self) {
        if !self.released {
            self.texture.destroy();
            self.released = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_buffer_accepts_exact_size() {
        assert!(validate_buffer(100, 50, 100 * 50 * 4).is_ok());
        assert!(validate_buffer(0, 0, 0).is_ok());
    }

    #[test]
    fn test_validate_buffer_rejects_mismatch() {
        let err = validate_buffer(10, 10, 399).unwrap_err();
        match err {
            UploadError::BufferSize {
                expected, actual, ..
            } => {
                assert_eq!(expected, 400);
                assert_eq!(actual, 399);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
