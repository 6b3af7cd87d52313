use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::{Camera, CameraUniform};
use crate::render::RenderCtx;
use crate::texture;

use super::common::{self, PipelineParams, UniformBinding};

/// Per-vertex record of both mesh passes: slot 0 world position, slot 1
/// texture coordinate (UV origin top-left, per wgpu convention).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Static mesh pass: world positions through a bare view-projection matrix
/// at group 0 slot 0, diffuse texture + sampler at group 1.
///
/// The camera uniform here is [`CameraUniform`] (64 bytes). It is NOT the
/// layout the instanced pass expects; never share a buffer between the two.
pub struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    camera: UniformBinding<CameraUniform>,
    texture_layout: wgpu::BindGroupLayout,
}

impl MeshPass {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let camera = UniformBinding::new(ctx.device, "kiln mesh camera", &CameraUniform::default());

        let texture_layout = ctx
            .device
            .create_bind_group_layout(&texture::TEXTURE_BIND_GROUP_LAYOUT);

        let pipeline = common::build_pipeline(
            ctx.device,
            ctx.color_format,
            &PipelineParams {
                label: "kiln mesh pipeline",
                shader: &shader,
                bind_group_layouts: &[&camera.layout, &texture_layout],
                vertex_buffers: &[MeshVertex::layout()],
                blend: Some(wgpu::BlendState::REPLACE),
                cull_mode: None,
                depth_format: ctx.depth_format,
            },
        );

        log::debug!("mesh pass created");
        Self {
            pipeline,
            camera,
            texture_layout,
        }
    }

    pub fn set_camera(&self, queue: &wgpu::Queue, camera: &Camera) {
        self.camera.write(queue, &CameraUniform::from_camera(camera));
    }

    /// Uploads a pre-composed view-projection matrix directly.
    pub fn set_view_proj(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        self.camera
            .write(queue, &CameraUniform::from_view_proj(view_proj));
    }

    /// Layout for host-built group-1 texture bind groups.
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Binds the pipeline and the camera at group 0. The texture bind group
    /// is bound at group 1 by the caller per draw.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.camera.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_layout() {
        let layout = MeshVertex::layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[0].offset, 0);

        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(layout.attributes[1].offset, 12);
    }
}
