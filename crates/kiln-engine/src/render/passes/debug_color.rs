use crate::render::RenderCtx;

use super::common::{self, ColorVertex, PipelineParams};

/// Debug-color pass: flat-colored 2D primitives with no projection.
///
/// Vertex positions are promoted to clip space as `(x, y, 0, 1)` verbatim;
/// callers must pre-transform coordinates into the [-1, 1] range themselves
/// or the geometry lands off-screen. That is a contract requirement, not a
/// runtime-checked error.
///
/// No bind groups: the pipeline layout is empty.
pub struct DebugColorPass {
    pipeline: wgpu::RenderPipeline,
}

impl DebugColorPass {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln debug color shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/debug_color.wgsl").into()),
        });

        let pipeline = common::build_pipeline(
            ctx.device,
            ctx.color_format,
            &PipelineParams {
                label: "kiln debug color pipeline",
                shader: &shader,
                bind_group_layouts: &[],
                vertex_buffers: &[ColorVertex::layout()],
                blend: Some(wgpu::BlendState::REPLACE),
                cull_mode: None,
                depth_format: None,
            },
        );

        log::debug!("debug color pass created");
        Self { pipeline }
    }

    /// Binds the pipeline; the caller supplies vertex/index buffers and the
    /// draw call.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
    }
}
