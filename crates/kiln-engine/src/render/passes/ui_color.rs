use glam::Mat4;

use crate::render::RenderCtx;

use super::common::{self, ColorVertex, PipelineParams, UniformBinding};

/// Flat-color UI pass: 2D positions in logical pixels, one orthographic
/// projection uniform at group 0 slot 0, per-vertex RGBA carried through as
/// the sole fragment output.
///
/// The projection must be re-uploaded via [`set_projection`] whenever the
/// viewport size changes; see [`crate::camera::ui_projection`].
///
/// [`set_projection`]: UiColorPass::set_projection
pub struct UiColorPass {
    pipeline: wgpu::RenderPipeline,
    projection: UniformBinding<[[f32; 4]; 4]>,
}

impl UiColorPass {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln ui color shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/ui_color.wgsl").into()),
        });

        let projection = UniformBinding::new(
            ctx.device,
            "kiln ui color projection",
            &Mat4::IDENTITY.to_cols_array_2d(),
        );

        let pipeline = common::build_pipeline(
            ctx.device,
            ctx.color_format,
            &PipelineParams {
                label: "kiln ui color pipeline",
                shader: &shader,
                bind_group_layouts: &[&projection.layout],
                vertex_buffers: &[ColorVertex::layout()],
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                cull_mode: Some(wgpu::Face::Back),
                depth_format: None,
            },
        );

        log::debug!("ui color pass created");
        Self {
            pipeline,
            projection,
        }
    }

    pub fn set_projection(&self, queue: &wgpu::Queue, projection: Mat4) {
        self.projection.write(queue, &projection.to_cols_array_2d());
    }

    /// Binds the pipeline and the projection at group 0.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.projection.bind_group, &[]);
    }
}
