//! Full-screen quad pipeline
//!
//! Draws a four-vertex triangle strip covering clip space with a
//! ray-marching fragment shader. Vertex and fragment WGSL sources are
//! separate files on disk, loaded by path at startup; the uniform buffer
//! carries the per-frame values (`scale`, `cam_pos`, `cam_look`).

use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// A quad vertex: one 2-D clip-space point
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
    };
}

/// The clip-space square as a triangle strip
const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [1.0, 1.0] },
    Vertex { position: [1.0, -1.0] },
    Vertex { position: [-1.0, 1.0] },
    Vertex { position: [-1.0, -1.0] },
];

/// Per-frame shader inputs
///
/// Layout matches the WGSL uniform struct (vec2 at 0, vec3s at 16-byte
/// offsets, struct size padded to 48).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Uniforms {
    /// Aspect-ratio scale factor, max component always 1.0
    pub scale: [f32; 2],
    pub _pad0: [f32; 2],
    /// Camera world-space position
    pub cam_pos: [f32; 3],
    pub _pad1: f32,
    /// Camera view direction (unit length)
    pub cam_look: [f32; 3],
    pub _pad2: f32,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0],
            _pad0: [0.0; 2],
            cam_pos: [0.0, 0.0, 5.0],
            _pad1: 0.0,
            cam_look: [0.0, 0.0, -1.0],
            _pad2: 0.0,
        }
    }
}

/// Errors from loading or validating shader sources
#[derive(Debug)]
pub enum ShaderError {
    /// Reading the source file failed
    Io(PathBuf, std::io::Error),
    /// The WGSL failed wgpu validation
    Validation(PathBuf, String),
}

impl std::fmt::Display for ShaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderError::Io(path, e) => {
                write!(f, "Failed to read shader '{}': {}", path.display(), e)
            }
            ShaderError::Validation(path, msg) => {
                write!(f, "Shader compilation failed for '{}': {}", path.display(), msg)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Load a WGSL module from disk, surfacing validation errors
///
/// wgpu reports invalid WGSL through the error scope rather than a return
/// value, so the scope is popped immediately after module creation.
fn load_shader_module(
    device: &wgpu::Device,
    path: &Path,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| ShaderError::Io(path.to_path_buf(), e))?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: path.to_str(),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(ShaderError::Validation(path.to_path_buf(), err.to_string()));
    }

    log::info!("Loaded shader {}", path.display());
    Ok(module)
}

/// Pipeline drawing the ray-marched full-screen quad
pub struct QuadPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl QuadPipeline {
    /// Build the pipeline from the two on-disk shader sources
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vs_module = load_shader_module(device, vertex_path)?;
        let fs_module = load_shader_module(device, fragment_path)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Static quad, immutable after creation
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Uniform Buffer"),
            contents: bytemuck::bytes_of(&Uniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_group,
        })
    }

    /// Push this frame's uniform values
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Record the quad draw into `encoder`
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Quad Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..4, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_layout_is_48_bytes() {
        // Must match the WGSL struct size
        assert_eq!(std::mem::size_of::<Uniforms>(), 48);
    }

    #[test]
    fn test_quad_covers_clip_space() {
        for v in &QUAD_VERTICES {
            assert_eq!(v.position[0].abs(), 1.0);
            assert_eq!(v.position[1].abs(), 1.0);
        }
    }

    #[test]
    fn test_default_uniforms_unit_scale() {
        let u = Uniforms::default();
        assert_eq!(u.scale, [1.0, 1.0]);
    }
}
