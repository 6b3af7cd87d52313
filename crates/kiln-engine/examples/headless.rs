//! Headless smoke run: builds every pass against an offscreen target and
//! records one frame touching all five pipelines.
//!
//! Useful for checking that the pipeline layouts and binding schema are
//! accepted by a real device without opening a window.

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use wgpu::util::DeviceExt;

use kiln_engine::camera::{Camera, ui_projection};
use kiln_engine::logging;
use kiln_engine::render::passes::{
    ColorVertex, DebugColorPass, InstanceBuffer, InstancedMeshPass, MeshPass, MeshVertex,
    QUAD_INDICES, TexturedVertex, UiColorPass, UiTexturePass,
};
use kiln_engine::render::{RenderCtx, RenderTarget};
use kiln_engine::texture::{self, Texture};
use kiln_engine::transform::InstanceTransform;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

fn main() -> Result<()> {
    logging::init_logging(Default::default());

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .context("failed to find a suitable GPU adapter")?;

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("kiln headless device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default(),
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::Performance,
        trace: wgpu::Trace::Off,
    }))
    .context("failed to create wgpu device/queue")?;

    let color_format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let color_target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("headless color target"),
        size: wgpu::Extent3d {
            width: WIDTH,
            height: HEIGHT,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: color_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let color_view = color_target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::depth(&device, WIDTH, HEIGHT);

    let ctx = RenderCtx::new(&device, &queue, color_format, Some(texture::DEPTH_FORMAT));

    // All five pipeline configurations, built once.
    let debug_pass = DebugColorPass::new(&ctx);
    let ui_color_pass = UiColorPass::new(&ctx);
    let ui_texture_pass = UiTexturePass::new(&ctx);
    let mesh_pass = MeshPass::new(&ctx);
    let instanced_pass = InstancedMeshPass::new(&ctx);

    // Uniforms.
    let camera = Camera::new(
        Vec3::new(0.0, 1.0, 4.0),
        0.0,
        0.2,
        WIDTH,
        HEIGHT,
        std::f32::consts::FRAC_PI_2,
        0.1,
        100.0,
    );
    mesh_pass.set_camera(&queue, &camera);
    instanced_pass.set_camera(&queue, &camera);

    let projection = ui_projection(WIDTH as f32, HEIGHT as f32);
    ui_color_pass.set_projection(&queue, projection);
    ui_texture_pass.set_projection(&queue, projection);

    // Geometry + textures.
    let white = Texture::default_white(&device, &queue);
    let checker = Texture::from_rgba8(
        &device,
        &queue,
        &[
            255, 255, 255, 255, 40, 40, 40, 255, //
            40, 40, 40, 255, 255, 255, 255, 255,
        ],
        2,
        2,
        true,
        Some("checker"),
    )?;

    let mesh_texture_bg = white.bind_group(&device, mesh_pass.texture_layout());
    let instanced_texture_bg = white.bind_group(&device, instanced_pass.texture_layout());
    let ui_texture_bg = checker.bind_group(&device, ui_texture_pass.texture_layout());

    let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad ibo"),
        contents: bytemuck::cast_slice(&QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });

    let ground: [MeshVertex; 4] = [
        MeshVertex { position: [-2.0, 0.0, -2.0], tex_coords: [0.0, 0.0] },
        MeshVertex { position: [-2.0, 0.0, 2.0], tex_coords: [0.0, 1.0] },
        MeshVertex { position: [2.0, 0.0, 2.0], tex_coords: [1.0, 1.0] },
        MeshVertex { position: [2.0, 0.0, -2.0], tex_coords: [1.0, 0.0] },
    ];
    let mesh_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh vbo"),
        contents: bytemuck::cast_slice(&ground),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let mut instances = InstanceBuffer::new();
    let raws: Vec<_> = (0..4)
        .map(|i| {
            InstanceTransform::new(Vec3::new(i as f32 - 1.5, 0.5, -1.0), Quat::IDENTITY).to_raw()
        })
        .collect();
    instances.upload(&ctx, &raws);

    let ui_quad = ColorVertex::quad(16.0, 16.0, 216.0, 66.0, [0.1, 0.4, 0.9, 0.8]);
    let ui_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("ui vbo"),
        contents: bytemuck::cast_slice(&ui_quad),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let ui_tex_quad = TexturedVertex::quad(16.0, 80.0, 144.0, 208.0);
    let ui_tex_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("ui tex vbo"),
        contents: bytemuck::cast_slice(&ui_tex_quad),
        usage: wgpu::BufferUsages::VERTEX,
    });

    // A clip-space triangle for the debug overlay; no projection applies.
    let debug_tri = [
        ColorVertex { position: [-0.9, -0.9], color: [1.0, 0.0, 0.0, 1.0] },
        ColorVertex { position: [-0.5, -0.9], color: [0.0, 1.0, 0.0, 1.0] },
        ColorVertex { position: [-0.7, -0.5], color: [0.0, 0.0, 1.0, 1.0] },
    ];
    let debug_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("debug vbo"),
        contents: bytemuck::cast_slice(&debug_tri),
        usage: wgpu::BufferUsages::VERTEX,
    });

    // One frame: scene pass with depth, then the 2D overlay on top.
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("kiln headless encoder"),
    });

    {
        let mut target = RenderTarget::new(&mut encoder, &color_view, Some(&depth.view));
        let mut rpass = target.begin_pass(
            "scene pass",
            wgpu::LoadOp::Clear(wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.03,
                a: 1.0,
            }),
        );

        mesh_pass.bind(&mut rpass);
        rpass.set_bind_group(1, &mesh_texture_bg, &[]);
        rpass.set_vertex_buffer(0, mesh_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);

        instanced_pass.bind(&mut rpass);
        rpass.set_bind_group(1, &instanced_texture_bg, &[]);
        rpass.set_vertex_buffer(0, mesh_vbo.slice(..));
        if instances.bind(&mut rpass) {
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..instances.len());
        }
    }

    {
        let mut target = RenderTarget::new(&mut encoder, &color_view, None);
        let mut rpass = target.begin_pass("overlay pass", wgpu::LoadOp::Load);

        ui_color_pass.bind(&mut rpass);
        rpass.set_vertex_buffer(0, ui_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);

        ui_texture_pass.bind(&mut rpass);
        rpass.set_bind_group(1, &ui_texture_bg, &[]);
        rpass.set_vertex_buffer(0, ui_tex_vbo.slice(..));
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);

        debug_pass.bind(&mut rpass);
        rpass.set_vertex_buffer(0, debug_vbo.slice(..));
        rpass.draw(0..3, 0..1);
    }

    queue.submit(std::iter::once(encoder.finish()));
    log::info!("headless frame recorded and submitted across all five passes");

    Ok(())
}
