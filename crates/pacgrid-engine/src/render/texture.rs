use std::path::Path;

use anyhow::{Context, Result};

use super::scope::checked;
use super::RenderCtx;

/// Decoded image, tightly packed RGBA8 (`stride == width * 4`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextureImage {
    /// Reads and decodes an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("texture {} not found on disk", path.display()))?;
        Self::decode(&bytes).with_context(|| format!("failed to load texture {}", path.display()))
    }

    /// Decodes an in-memory image (any format enabled on the `image` crate) to RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).context("undecodable image data")?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Wraps raw RGBA8 pixels; rejects buffers that are not exactly `width * 4` per row.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "texture has zero size ({width}x{height})");

        let stride = width as usize * 4;
        anyhow::ensure!(
            rgba.len() == stride * height as usize,
            "unsupported stride: {} bytes for {width}x{height} RGBA (expected {})",
            rgba.len(),
            stride * height as usize
        );

        Ok(Self { width, height, rgba })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.width * 4
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

/// Sampled 2D texture with linear filtering and clamp-to-edge addressing.
pub struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Uploads `image` as a single-mip sRGB texture.
    ///
    /// `label` should name the source (usually the file path); errors mention it.
    pub fn upload(ctx: &RenderCtx<'_>, image: &TextureImage, label: &str) -> Result<Self> {
        let max = ctx.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            image.width() <= max && image.height() <= max,
            "texture {label} is {}x{}, larger than the device limit of {max}",
            image.width(),
            image.height()
        );

        let size = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };

        let texture = checked(ctx.device, || {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                image.pixels(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(image.stride()),
                    rows_per_image: Some(image.height()),
                },
                size,
            );

            texture
        })
        .with_context(|| format!("failed to upload texture {label}"))?;

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pacgrid texture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("uploaded texture {label} ({}x{})", image.width(), image.height());

        Ok(Self { texture, view, sampler })
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

impl Drop for GpuTexture {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}
