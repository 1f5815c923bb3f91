use crate::constants::POINT_ALPHA;
use crate::core::Camera;
use glam::Vec3;
use web_sys as web;

mod points;

use points::{create_instance_buffer, create_point_resources, PointResources, PointUniforms};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    dot_color: [f32; 3],
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, capacity: usize) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let points = create_point_resources(&device, format, capacity);
        log::info!(
            "[gpu] surface {}x{} {:?}, {} point slots",
            width,
            height,
            format,
            points.instance_capacity
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            points,
            width,
            height,
            clear_color: wgpu::Color::BLACK,
            dot_color: [1.0, 1.0, 1.0],
        })
    }

    /// Background and dot colours as linear-ish RGB in [0, 1].
    pub fn set_colors(&mut self, background: [f32; 3], dots: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: background[0] as f64,
            g: background[1] as f64,
            b: background[2] as f64,
            a: 1.0,
        };
        self.dot_color = dots;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn ensure_capacity(&mut self, count: usize) {
        if count > self.points.instance_capacity {
            self.points.instance_vb = create_instance_buffer(&self.device, count);
            self.points.instance_capacity = count;
            log::info!("[gpu] grew point buffer to {}", count);
        }
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        positions: &[Vec3],
        point_size: f32,
    ) -> Result<(), wgpu::SurfaceError> {
        self.ensure_capacity(positions.len());
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let [r, g, b] = self.dot_color;
        let uniforms = PointUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.gpu_projection_matrix().to_cols_array_2d(),
            color: [r, g, b, 1.0],
            params: [point_size, POINT_ALPHA, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.points.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        if !positions.is_empty() {
            self.queue
                .write_buffer(&self.points.instance_vb, 0, bytemuck::cast_slice(positions));
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !positions.is_empty() {
                rpass.set_pipeline(&self.points.pipeline);
                rpass.set_bind_group(0, &self.points.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.points.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.points.instance_vb.slice(..));
                rpass.draw(0..6, 0..(positions.len() as u32));
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
