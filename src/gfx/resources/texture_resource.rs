//! Render target textures
//!
//! Depth buffers, multisampled color targets and the reduced-resolution
//! scene target, all sized to the render extent.

/// GPU texture with its default view
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl TextureResource {
    /// Standard depth buffer format used throughout the viewer
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    fn sized(
        device: &wgpu::Device,
        (width, height): (u32, u32),
        format: wgpu::TextureFormat,
        sample_count: u32,
        usage: wgpu::TextureUsages,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// Creates a depth texture
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    /// * `extent` - Width and height of the color target it pairs with
    /// * `sample_count` - Must equal the color target's sample count
    /// * `label` - Debug label for the texture
    pub fn create_depth_texture(
        device: &wgpu::Device,
        extent: (u32, u32),
        sample_count: u32,
        label: &str,
    ) -> Self {
        Self::sized(
            device,
            extent,
            Self::DEPTH_FORMAT,
            sample_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
            label,
        )
    }

    /// Creates the multisampled color target resolved into the frame
    ///
    /// Returns `None` when `sample_count` is 1 and the frame is drawn to
    /// directly.
    pub fn create_msaa_target(
        device: &wgpu::Device,
        extent: (u32, u32),
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Option<Self> {
        (sample_count > 1).then(|| {
            Self::sized(
                device,
                extent,
                format,
                sample_count,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
                "msaa_color_target",
            )
        })
    }

    /// Creates a single-sampled color target that a later pass can sample
    pub fn create_color_target(
        device: &wgpu::Device,
        extent: (u32, u32),
        format: wgpu::TextureFormat,
        label: &str,
    ) -> Self {
        Self::sized(
            device,
            extent,
            format,
            1,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            label,
        )
    }
}
