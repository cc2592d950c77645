use glam::Vec2;
use wgpu::util::DeviceExt;

/// Uniform values read by `present.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PresentUniformData {
    /// Fraction of the window covered by the canvas in each axis.
    pub ndc_scale: Vec2,
    pub _padding: [f32; 2],
}

/// Holds the present shader's uniform values and the GPU buffer they are
/// copied to.
pub struct PresentUniforms {
    values: PresentUniformData,
    gpu_buffer: wgpu::Buffer,
    is_dirty: bool,
}

impl PresentUniforms {
    pub fn new(device: &wgpu::Device) -> Self {
        let values = PresentUniformData {
            ndc_scale: Vec2::ONE,
            ..Default::default()
        };

        let gpu_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("present uniforms"),
            contents: bytemuck::bytes_of(&values),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            values,
            gpu_buffer,
            is_dirty: false,
        }
    }

    pub fn set_ndc_scale(&mut self, ndc_scale: Vec2) {
        if self.values.ndc_scale != ndc_scale {
            self.values.ndc_scale = ndc_scale;
            self.is_dirty = true;
        }
    }

    /// Copy the uniform values to the GPU if they changed since the last call.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        if self.is_dirty {
            queue.write_buffer(&self.gpu_buffer, 0, bytemuck::bytes_of(&self.values));
            self.is_dirty = false;
        }
    }

    pub fn gpu_buffer(&self) -> &wgpu::Buffer {
        &self.gpu_buffer
    }
}

/// Layout of the single bind group used by the present pipeline:
///  0 - present uniforms
///  1 - canvas texture
///  2 - canvas sampler
pub fn present_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("present bind group layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                // Must match the filterable flag of the texture above.
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}
