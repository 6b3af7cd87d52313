use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::render::RenderCtx;
use crate::texture;

use super::common::{self, PipelineParams, UniformBinding};

/// Per-vertex record of the textured UI pass: slot 0 position, slot 1
/// texture coordinate (UV origin top-left, per wgpu convention).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl TexturedVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Quad with the full texture mapped across it, vertex order TL, BL,
    /// BR, TR to pair with [`super::QUAD_INDICES`].
    pub fn quad(left: f32, top: f32, right: f32, bottom: f32) -> [Self; 4] {
        [
            Self { position: [left, top], tex_coords: [0.0, 0.0] },
            Self { position: [left, bottom], tex_coords: [0.0, 1.0] },
            Self { position: [right, bottom], tex_coords: [1.0, 1.0] },
            Self { position: [right, top], tex_coords: [1.0, 0.0] },
        ]
    }
}

/// Textured UI pass: same projection handling as [`super::UiColorPass`],
/// but the payload attribute is a texture coordinate and group 1 carries
/// the texture + sampler pair. The fragment stage outputs the sampled texel
/// unmodified.
pub struct UiTexturePass {
    pipeline: wgpu::RenderPipeline,
    projection: UniformBinding<[[f32; 4]; 4]>,
    texture_layout: wgpu::BindGroupLayout,
}

impl UiTexturePass {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln ui texture shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/ui_texture.wgsl").into()),
        });

        let projection = UniformBinding::new(
            ctx.device,
            "kiln ui texture projection",
            &Mat4::IDENTITY.to_cols_array_2d(),
        );

        let texture_layout = ctx
            .device
            .create_bind_group_layout(&texture::TEXTURE_BIND_GROUP_LAYOUT);

        let pipeline = common::build_pipeline(
            ctx.device,
            ctx.color_format,
            &PipelineParams {
                label: "kiln ui texture pipeline",
                shader: &shader,
                bind_group_layouts: &[&projection.layout, &texture_layout],
                vertex_buffers: &[TexturedVertex::layout()],
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                cull_mode: Some(wgpu::Face::Back),
                depth_format: None,
            },
        );

        log::debug!("ui texture pass created");
        Self {
            pipeline,
            projection,
            texture_layout,
        }
    }

    pub fn set_projection(&self, queue: &wgpu::Queue, projection: Mat4) {
        self.projection.write(queue, &projection.to_cols_array_2d());
    }

    /// Layout for host-built group-1 texture bind groups; see
    /// [`crate::texture::Texture::bind_group`].
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Binds the pipeline and the projection at group 0. The texture bind
    /// group is bound at group 1 by the caller per draw.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.projection.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textured_vertex_layout() {
        let layout = TexturedVertex::layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);

        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn quad_uvs_cover_unit_square() {
        let q = TexturedVertex::quad(0.0, 0.0, 100.0, 50.0);
        assert_eq!(q[0].tex_coords, [0.0, 0.0]); // TL
        assert_eq!(q[1].tex_coords, [0.0, 1.0]); // BL
        assert_eq!(q[2].tex_coords, [1.0, 1.0]); // BR
        assert_eq!(q[3].tex_coords, [1.0, 0.0]); // TR
    }
}
