//! WGPU-based render engine
//!
//! Owns the device, the window surface and every GPU resource the viewer
//! draws with. Implements [`RenderSurface`] so a viewport can drive it.

use std::sync::Arc;

use cgmath::Matrix4;
use log::{debug, info, warn};
use wgpu::TextureFormat;

use super::buffer_pool::GpuBufferPool;
use super::pipeline_manager::{PipelineConfig, PipelineManager};
use super::render_pass_ext::DrawGeometry;
use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::gfx::{
    camera::PerspectiveCamera,
    resources::{GlobalBindings, GlobalUniformContent, TextureResource},
    scene::{Drawable, Material, Scene},
};
use crate::ui::UiManager;
use crate::viewport::RenderSurface;

const SURFACE_PIPELINE: &str = "Surface";
const DOUBLE_SIDED_PIPELINE: &str = "SurfaceDoubleSided";
const LINES_PIPELINE: &str = "Lines";
const UPSCALE_PIPELINE: &str = "Upscale";

/// Highest ratio of rendered pixels to logical pixels
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Size the scene is rendered at for a surface of `width` x `height`
///
/// Displays denser than [`MAX_PIXEL_RATIO`] render at the capped ratio and
/// the result is stretched over the surface.
pub fn render_extent(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    if scale_factor.is_nan() || scale_factor <= MAX_PIXEL_RATIO {
        return (width, height);
    }
    let ratio = MAX_PIXEL_RATIO / scale_factor;
    let scale = |v: u32| ((v as f64 * ratio).round() as u32).clamp(1, v.max(1));
    (scale(width), scale(height))
}

/// Pipelines drawing scene geometry, derived from a shared base
///
/// Outlines sit exactly on their surfaces, so equal depth must pass.
pub fn scene_pipelines(base: PipelineConfig) -> [(&'static str, PipelineConfig); 3] {
    let base = base.with_depth_compare(wgpu::CompareFunction::LessEqual);
    [
        (SURFACE_PIPELINE, base.clone().with_label("SURFACE")),
        (
            DOUBLE_SIDED_PIPELINE,
            base.clone()
                .with_label("SURFACE_DOUBLE_SIDED")
                .with_cull_mode(None),
        ),
        (
            LINES_PIPELINE,
            base.with_label("LINES")
                .with_cull_mode(None)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList),
        ),
    ]
}

/// Pipeline a material is drawn with
pub fn pipeline_for(material: &Material) -> &'static str {
    match material {
        Material::Phong {
            double_sided: true, ..
        } => DOUBLE_SIDED_PIPELINE,
        Material::Phong { .. } => SURFACE_PIPELINE,
        Material::LineBasic { .. } => LINES_PIPELINE,
    }
}

/// Visible drawables with their model matrices, opaque ones first
///
/// Order within each pass follows scene order, and a group's surface comes
/// before its outline.
pub fn draw_list(scene: &Scene) -> Vec<(Matrix4<f32>, &Drawable)> {
    let (mut opaque, transparent): (Vec<_>, Vec<_>) = scene
        .nodes()
        .iter()
        .filter(|node| node.visible)
        .flat_map(|node| {
            let model = node.transform.matrix();
            node.drawables().into_iter().map(move |drawable| (model, drawable))
        })
        .partition(|(_, drawable)| !drawable.material.is_transparent());

    opaque.extend(transparent);
    opaque
}

/// Reduced-resolution scene target and the bind group sampling it
struct UpscaleTarget {
    color: TextureResource,
    bind_group: wgpu::BindGroup,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    sample_count: u32,
    scale_factor: f64,
    depth_texture: TextureResource,
    msaa_target: Option<TextureResource>,
    upscale_layout: wgpu::BindGroupLayout,
    upscale_sampler: wgpu::Sampler,
    upscale: Option<UpscaleTarget>,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    buffers: GpuBufferPool,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    ///
    /// # Arguments
    /// * `window` - Surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `scale_factor` - Physical pixels per logical pixel of the window
    /// * `settings` - Present mode, MSAA and clear color
    ///
    /// # Errors
    /// Fails if no surface, adapter or device can be created, or if a
    /// render pipeline does not build.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        scale_factor: f64,
        settings: &ViewerConfig,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let adapter_info = adapter.get_info();
        info!("using {} ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        // sRGB encoding happens in the shader so ImGui colors stay untouched
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let mut present_mode = settings.present_mode();
        if !surface_capabilities.present_modes.contains(&present_mode) {
            warn!("{:?} presentation unsupported, falling back to Fifo", present_mode);
            present_mode = wgpu::PresentMode::Fifo;
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let supports = |format: TextureFormat, count: u32| {
            adapter
                .get_texture_format_features(format)
                .flags
                .sample_count_supported(count)
        };
        let sample_count = if settings.msaa_samples > 1
            && supports(format, settings.msaa_samples)
            && supports(TextureResource::DEPTH_FORMAT, settings.msaa_samples)
        {
            settings.msaa_samples
        } else {
            if settings.msaa_samples > 1 {
                warn!("{}x MSAA unsupported for {:?}, rendering without it", settings.msaa_samples, format);
            }
            1
        };
        info!("surface {:?} {}x{}, {:?}, {}x MSAA", format, width, height, present_mode, sample_count);

        let extent = render_extent(config.width, config.height, scale_factor);
        let depth_texture =
            TextureResource::create_depth_texture(&device, extent, sample_count, "depth_texture");
        let msaa_target = TextureResource::create_msaa_target(&device, extent, format, sample_count);

        let upscale_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Upscale Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let upscale_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Upscale Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let global_bindings = GlobalBindings::new(&device);
        let buffers = GpuBufferPool::new(device.clone(), queue.clone());

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        pipeline_manager.load_shader("upscale", include_str!("upscale.wgsl"));

        let base = PipelineConfig::default()
            .with_shader("scene")
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_sample_count(sample_count)
            .with_blended_target(format)
            .with_bind_group_layouts(vec![
                global_bindings.layout().clone(),
                buffers.draw_layout().clone(),
            ]);

        for (name, config) in scene_pipelines(base) {
            pipeline_manager.register_pipeline(name, config);
        }
        pipeline_manager.register_pipeline(
            UPSCALE_PIPELINE,
            PipelineConfig::default()
                .with_label("UPSCALE")
                .with_shader("upscale")
                .with_bind_group_layouts(vec![upscale_layout.clone()])
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })])
                .with_cull_mode(None)
                .with_no_vertex_buffers(),
        );

        pipeline_manager
            .create_all_pipelines()
            .map_err(|errors| ViewerError::Pipeline(errors.join("; ")))?;

        let [r, g, b] = settings.clear_color;

        let mut engine = RenderEngine {
            surface,
            device,
            queue,
            config,
            format,
            sample_count,
            scale_factor,
            depth_texture,
            msaa_target,
            upscale_layout,
            upscale_sampler,
            upscale: None,
            pipeline_manager,
            global_bindings,
            buffers,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        };
        engine.upscale = engine.create_upscale_target(extent);

        Ok(engine)
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Geometry storage shared with the scene composer
    pub fn buffers_mut(&mut self) -> &mut GpuBufferPool {
        &mut self.buffers
    }

    /// Set VSync (vertical synchronization) state
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = if enable {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::Immediate
        };
        self.surface.configure(&self.device, &self.config);
    }

    /// Follows a change of the window's pixel density
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor == self.scale_factor {
            return;
        }
        self.scale_factor = scale_factor;
        self.rebuild_targets();
    }

    /// Size the scene is currently rendered at
    pub fn render_size(&self) -> (u32, u32) {
        render_extent(self.config.width, self.config.height, self.scale_factor)
    }

    fn create_upscale_target(&self, extent: (u32, u32)) -> Option<UpscaleTarget> {
        if extent == (self.config.width, self.config.height) {
            return None;
        }

        let color =
            TextureResource::create_color_target(&self.device, extent, self.format, "scene_color_target");
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Upscale Bind Group"),
            layout: &self.upscale_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.upscale_sampler),
                },
            ],
        });

        Some(UpscaleTarget { color, bind_group })
    }

    /// Recreates every target whose size follows the render extent
    fn rebuild_targets(&mut self) {
        let extent = self.render_size();

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, extent, self.sample_count, "depth_texture");
        self.msaa_target =
            TextureResource::create_msaa_target(&self.device, extent, self.format, self.sample_count);
        self.upscale = self.create_upscale_target(extent);

        if self.upscale.is_some() {
            debug!(
                "rendering at {}x{} for a {}x{} surface",
                extent.0, extent.1, self.config.width, self.config.height
            );
        }
    }

    fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                warn!("surface outdated, reconfiguring and skipping the frame");
                self.surface.configure(&self.device, &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out waiting for a surface frame");
                Ok(None)
            }
            Err(e) => Err(ViewerError::Frame(e)),
        }
    }
}

impl RenderSurface for RenderEngine {
    type Overlay = UiManager;

    /// Reconfigures the surface and recreates the size-dependent targets
    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.rebuild_targets();
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<&mut UiManager>,
    ) -> Result<()> {
        let draws = draw_list(scene);

        let globals = GlobalUniformContent::new(&camera.uniform, &scene.lights, scene.fog)
            .with_srgb_encoding(!self.format.is_srgb());
        self.global_bindings.update(&self.queue, globals);
        for (model, drawable) in &draws {
            self.buffers.prepare(drawable, *model);
        }

        let Some(frame) = self.acquire_frame()? else {
            return Ok(());
        };
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let scene_view = match &self.upscale {
                Some(target) => &target.color.view,
                None => &frame_view,
            };
            let (view, resolve_target, store) = match &self.msaa_target {
                Some(target) => (&target.view, Some(scene_view), wgpu::StoreOp::Discard),
                None => (scene_view, None, wgpu::StoreOp::Store),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for (_, drawable) in &draws {
                let Some(geometry) = self.buffers.get(drawable.geometry) else {
                    continue;
                };
                let pipeline = self
                    .pipeline_manager
                    .get_pipeline(pipeline_for(&drawable.material))
                    .expect("scene pipelines are built at startup");
                render_pass.set_pipeline(pipeline);
                render_pass.draw_geometry(geometry);
            }
        }

        if let Some(target) = &self.upscale {
            let mut upscale_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Upscale Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let pipeline = self
                .pipeline_manager
                .get_pipeline(UPSCALE_PIPELINE)
                .expect("upscale pipeline is built at startup");
            upscale_pass.set_pipeline(pipeline);
            upscale_pass.set_bind_group(0, &target.bind_group, &[]);
            upscale_pass.draw(0..3, 0..1);
        }

        if let Some(ui) = overlay {
            ui.render_overlay(&self.device, &self.queue, &mut encoder, &frame_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_axes, generate_box, LineData};
    use crate::gfx::scene::buffers::testing::CountingBuffers;
    use crate::gfx::scene::{Node, RenderableGroup};

    #[test]
    fn materials_pick_their_pipeline() {
        assert_eq!(pipeline_for(&Material::phong(0x44aa88)), SURFACE_PIPELINE);
        assert_eq!(
            pipeline_for(&Material::phong(0x156289).with_double_sided(true)),
            DOUBLE_SIDED_PIPELINE
        );
        assert_eq!(pipeline_for(&Material::line_basic(0xffffff)), LINES_PIPELINE);
    }

    #[test]
    fn outlines_pass_depth_equal_to_their_surface() {
        let pipelines = scene_pipelines(PipelineConfig::default());

        for (_, config) in &pipelines {
            assert_eq!(config.depth_compare, wgpu::CompareFunction::LessEqual);
        }

        let (_, lines) = pipelines
            .iter()
            .find(|(name, _)| *name == LINES_PIPELINE)
            .unwrap();
        assert_eq!(lines.primitive_topology, wgpu::PrimitiveTopology::LineList);
        assert_eq!(lines.cull_mode, None);
    }

    #[test]
    fn every_material_pipeline_is_registered() {
        let pipelines = scene_pipelines(PipelineConfig::default());
        let materials = [
            Material::phong(0x44aa88),
            Material::phong(0x156289).with_double_sided(true),
            Material::line_basic(0xffffff),
        ];

        for material in &materials {
            let name = pipeline_for(material);
            assert!(pipelines.iter().any(|(registered, _)| *registered == name), "{name}");
        }
    }

    #[test]
    fn render_extent_caps_pixel_ratio_at_two() {
        assert_eq!(render_extent(3000, 1500, 3.0), (2000, 1000));
        assert_eq!(render_extent(2400, 1600, 2.0), (2400, 1600));
        assert_eq!(render_extent(1200, 800, 1.0), (1200, 800));
        assert_eq!(render_extent(1, 1, 4.0), (1, 1));
    }

    #[test]
    fn transparent_drawables_come_last() {
        let mut buffers = CountingBuffers::default();
        let cube = generate_box(1.0, 1.0, 1.0, 1, 1, 1);
        let mut scene = Scene::new();

        scene.add(Node::group(
            "model",
            RenderableGroup {
                surface: Drawable::mesh("s", &cube, Material::phong(0x156289).with_opacity(0.75), &mut buffers),
                outline: Drawable::lines(
                    "o",
                    &LineData::wireframe(&cube),
                    Material::line_basic(0xffffff).with_opacity(0.8),
                    &mut buffers,
                ),
            },
        ));
        scene.add(Node::lines(
            "axes",
            Drawable::lines("a", &generate_axes(10.0), Material::line_basic(0xffffff), &mut buffers),
        ));

        let mut hidden = Node::mesh("hidden", Drawable::mesh("h", &cube, Material::phong(0), &mut buffers));
        hidden.visible = false;
        scene.add(hidden);

        let order: Vec<f32> = draw_list(&scene)
            .iter()
            .map(|(_, drawable)| drawable.material.opacity())
            .collect();
        assert_eq!(order, vec![1.0, 0.75, 0.8]);
    }
}
