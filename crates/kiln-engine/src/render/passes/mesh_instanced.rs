use crate::camera::{Camera, InstancedCameraUniform};
use crate::render::RenderCtx;
use crate::texture;
use crate::transform::InstanceRaw;

use super::common::{self, PipelineParams, UniformBinding};
use super::mesh::MeshVertex;

/// Instanced mesh pass: per-vertex layout as in [`super::MeshPass`], plus
/// an instance-rate model matrix delivered as four vec4 attributes at slots
/// 2-5. The instance matrix applies before the camera transform
/// (`view_proj * model * position`).
///
/// The camera uniform here is [`InstancedCameraUniform`] (80 bytes: padded
/// position, then the matrix), wider than the static pass's bare matrix.
/// Host buffers must match that field order and padding exactly or the
/// view-projection matrix is read from the wrong offset.
pub struct InstancedMeshPass {
    pipeline: wgpu::RenderPipeline,
    camera: UniformBinding<InstancedCameraUniform>,
    texture_layout: wgpu::BindGroupLayout,
}

impl InstancedMeshPass {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln instanced mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh_instanced.wgsl").into()),
        });

        let camera = UniformBinding::new(
            ctx.device,
            "kiln instanced mesh camera",
            &InstancedCameraUniform::default(),
        );

        let texture_layout = ctx
            .device
            .create_bind_group_layout(&texture::TEXTURE_BIND_GROUP_LAYOUT);

        let pipeline = common::build_pipeline(
            ctx.device,
            ctx.color_format,
            &PipelineParams {
                label: "kiln instanced mesh pipeline",
                shader: &shader,
                bind_group_layouts: &[&camera.layout, &texture_layout],
                vertex_buffers: &[MeshVertex::layout(), InstanceRaw::layout()],
                blend: Some(wgpu::BlendState::REPLACE),
                cull_mode: None,
                depth_format: ctx.depth_format,
            },
        );

        log::debug!("instanced mesh pass created");
        Self {
            pipeline,
            camera,
            texture_layout,
        }
    }

    pub fn set_camera(&self, queue: &wgpu::Queue, camera: &Camera) {
        self.camera
            .write(queue, &InstancedCameraUniform::from_camera(camera));
    }

    /// Layout for host-built group-1 texture bind groups.
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Binds the pipeline and the camera at group 0. Texture (group 1),
    /// vertex buffer (slot 0) and instance buffer (slot 1) are bound by the
    /// caller per draw.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.camera.bind_group, &[]);
    }
}

/// Growable vertex-slot-1 buffer for instance records.
///
/// The host rewrites it between frames; capacity grows in powers of two so
/// steady-state uploads reuse the allocation.
#[derive(Default)]
pub struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&mut self, ctx: &RenderCtx<'_>, instances: &[InstanceRaw]) {
        self.len = instances.len() as u32;
        if instances.is_empty() {
            return;
        }

        if self.buffer.is_none() || instances.len() > self.capacity {
            let new_cap = instances.len().next_power_of_two().max(16);
            log::debug!("instance buffer capacity {} -> {new_cap}", self.capacity);

            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("kiln instance buffer"),
                size: (new_cap * std::mem::size_of::<InstanceRaw>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
        }

        let Some(buffer) = self.buffer.as_ref() else {
            return;
        };
        ctx.queue
            .write_buffer(buffer, 0, bytemuck::cast_slice(instances));
    }

    /// Number of instances in the last upload (the draw call's instance
    /// count).
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Binds the buffer at vertex slot 1. Returns false (and binds nothing)
    /// when there are no instances to draw.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        match self.buffer.as_ref() {
            Some(buffer) if self.len > 0 => {
                rpass.set_vertex_buffer(1, buffer.slice(..));
                true
            }
            _ => false,
        }
    }
}
