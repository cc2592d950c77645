mod shaders;
mod textures;

use anyhow::Context;
use tracing::{info, warn};
use winit::window::Window;

use crate::{canvas::Canvas, viewport::Viewport};

use shaders::{present_bind_group_layout, PresentUniforms};
use textures::CanvasTexture;

/// Presents the CPU canvas in a window.
///
/// Each frame the canvas pixels are uploaded to a texture which is then drawn
/// with a single full screen triangle, letterboxed to keep the canvas aspect
/// ratio.
pub struct Renderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    window_size: winit::dpi::PhysicalSize<u32>,
    viewport: Viewport,
    canvas_texture: CanvasTexture,
    uniforms: PresentUniforms,
    bind_group: wgpu::BindGroup,
    render_pipeline: wgpu::RenderPipeline,

    /// `window` must be the last field in the struct because it needs to be
    /// dropped after `surface`, because the surface contains unsafe references
    /// to `window`.
    window: &'a Window,
}

impl<'a> Renderer<'a> {
    pub async fn new(
        window: &'a Window,
        canvas_width: u32,
        canvas_height: u32,
    ) -> anyhow::Result<Self> {
        let window_size = window.inner_size();

        // Create a WGPU instance that can use any supported graphics API.
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create the main rendering surface and then get an adapter that acts
        // as the handle to one of the machine's physical GPU(s).
        let surface = instance
            .create_surface(window)
            .context("failed to create rendering surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter is compatible with the window surface")?;

        info!("using graphics adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    label: None,
                },
                None,
            )
            .await
            .context("failed to request graphics device")?;

        // Prefer an sRGB back buffer so the sRGB canvas texture is written out
        // without any extra conversion.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("window surface does not support any texture formats")?;

        if surface_format.is_srgb() {
            info!("rendering surface supports sRGB");
        } else {
            info!("no sRGB support found for the main rendering surface, defaulting to first available");
        }

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.width.max(1),
            height: window_size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        let mut viewport = Viewport::new(canvas_width, canvas_height);
        viewport
            .set_window_size(window_size.width, window_size.height)
            .unwrap_or_else(|e| warn!("{e}"));

        let canvas_texture =
            CanvasTexture::new(&device, canvas_width, canvas_height, Some("canvas texture"));

        let mut uniforms = PresentUniforms::new(&device);
        uniforms.set_ndc_scale(viewport.ndc_scale());
        uniforms.update_gpu(&queue);

        let bind_group_layout = present_bind_group_layout(&device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("present bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.gpu_buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&canvas_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&canvas_texture.sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("present shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("renderer/present.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("present pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        // The full screen triangle is generated from vertex indices, so there
        // are no vertex buffers or depth testing.
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("present pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            window_size,
            viewport,
            canvas_texture,
            uniforms,
            bind_group,
            render_pipeline,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        self.window
    }

    pub fn window_size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.window_size
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            warn!("invalid width of {new_width} or height {new_height} when resizing");
        } else {
            self.window_size = winit::dpi::PhysicalSize::new(new_width, new_height);
            self.surface_config.width = new_width;
            self.surface_config.height = new_height;
            self.surface.configure(&self.device, &self.surface_config);

            // Keep the canvas letterboxed inside the new window size.
            self.viewport
                .set_window_size(new_width, new_height)
                .unwrap_or_else(|e| warn!("{e}"));
            self.uniforms.set_ndc_scale(self.viewport.ndc_scale());
        }
    }

    /// Upload `canvas` and draw it to the window.
    pub fn render(&mut self, canvas: &Canvas) -> Result<(), wgpu::SurfaceError> {
        self.canvas_texture.write(&self.queue, canvas.pixels());
        self.uniforms.update_gpu(&self.queue);

        let backbuffer = self.surface.get_current_texture()?;
        let view = backbuffer
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut command_encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("present encoder"),
                });

        {
            let mut render_pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Anything not covered by the canvas is a black
                        // letterbox bar.
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        // All done - submit commands for execution.
        self.queue.submit(std::iter::once(command_encoder.finish()));
        backbuffer.present();

        Ok(())
    }
}
