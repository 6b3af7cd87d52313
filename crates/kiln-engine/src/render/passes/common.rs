//! Shared GPU types and pipeline plumbing used by the pass modules.

use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

// ── quad geometry ─────────────────────────────────────────────────────────

/// Index pattern for a quad built as TL, BL, BR, TR (two CCW triangles).
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── 2D color vertex ───────────────────────────────────────────────────────

/// Per-vertex record of the debug-color and flat-color UI passes:
/// slot 0 position, slot 1 RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Solid quad, vertex order TL, BL, BR, TR to pair with
    /// [`QUAD_INDICES`].
    pub fn quad(left: f32, top: f32, right: f32, bottom: f32, color: [f32; 4]) -> [Self; 4] {
        [
            Self { position: [left, top], color },
            Self { position: [left, bottom], color },
            Self { position: [right, bottom], color },
            Self { position: [right, top], color },
        ]
    }
}

// ── uniform binding ───────────────────────────────────────────────────────

/// A single uniform buffer bound at group slot 0 with vertex-stage
/// visibility, the shape every pass's group 0 takes.
///
/// `min_binding_size` is set from `T`, so binding an undersized buffer is
/// rejected at setup time rather than read garbage at draw time.
pub(super) struct UniformBinding<T> {
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformBinding<T> {
    pub fn new(device: &wgpu::Device, label: &str, initial: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(uniform_min_size::<T>()),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

fn uniform_min_size<T>() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<T>() as u64).expect("uniform types are non-zero sized")
}

// ── pipeline construction ─────────────────────────────────────────────────

pub(super) struct PipelineParams<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub blend: Option<wgpu::BlendState>,
    pub cull_mode: Option<wgpu::Face>,
    pub depth_format: Option<wgpu::TextureFormat>,
}

/// Builds a render pipeline with the fixed state every pass shares:
/// triangle lists, CCW front faces, fill mode, no multisampling.
pub(super) fn build_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    params: &PipelineParams<'_>,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(params.label),
        bind_group_layouts: params.bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(params.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: params.shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: params.vertex_buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: params.shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: params.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: params.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: params.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── color vertex layout ───────────────────────────────────────────────

    #[test]
    fn color_vertex_layout() {
        let layout = ColorVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(layout.attributes[0].offset, 0);

        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    // ── quad helper ───────────────────────────────────────────────────────

    #[test]
    fn quad_corners_match_index_pattern() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let q = ColorVertex::quad(10.0, 20.0, 30.0, 40.0, red);

        assert_eq!(q[0].position, [10.0, 20.0]); // TL
        assert_eq!(q[1].position, [10.0, 40.0]); // BL
        assert_eq!(q[2].position, [30.0, 40.0]); // BR
        assert_eq!(q[3].position, [30.0, 20.0]); // TR
        assert!(q.iter().all(|v| v.color == red));

        // Both triangles reference only the four corners.
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < q.len()));
    }
}
