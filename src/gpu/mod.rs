//! GPU texture plumbing
//!
//! This module handles:
//! - The narrow texture-manager seam the preview adapter uploads through
//! - A wgpu-backed implementation of that seam

pub mod texture;

pub use texture::{GpuTexture, TextureManager, WgpuTexture, WgpuTextureManager};
