//! Instance transforms and the clip-space math of each vertex stage.
//!
//! The clip helpers are exact CPU mirrors of the WGSL vertex stages in
//! `render/passes/shaders/`; any change there must be reflected here so the
//! transform contract stays testable without a device.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Per-instance model transform owned by the host.
#[derive(Debug, Clone)]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl InstanceTransform {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.matrix().to_cols_array_2d(),
        }
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// GPU-side instance record: a 4x4 model matrix delivered as four vec4 rows.
///
/// Vertex attributes cap at four components, so the matrix is split across
/// attribute slots 2-5 (immediately after the two per-vertex slots) and
/// reassembled in the vertex stage. The four-row shape is part of the buffer
/// contract; do not collapse it into a single matrix attribute.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

// ── vertex-stage clip math ────────────────────────────────────────────────

/// Debug-color pass: the position is already in clip space; promote only.
pub fn clip_from_debug(position: Vec2) -> Vec4 {
    Vec4::new(position.x, position.y, 0.0, 1.0)
}

/// Orthographic UI passes: `projection * (x, y, 0, 1)`.
pub fn clip_from_ui(projection: Mat4, position: Vec2) -> Vec4 {
    projection * Vec4::new(position.x, position.y, 0.0, 1.0)
}

/// Static mesh pass: `view_proj * (world, 1)`.
pub fn clip_from_world(view_proj: Mat4, world: Vec3) -> Vec4 {
    view_proj * world.extend(1.0)
}

/// Instanced mesh pass: the instance matrix applies before the camera.
/// `view_proj * model * (pos, 1)`; reversing the order is a correctness
/// bug, not a style choice.
pub fn clip_from_instance(view_proj: Mat4, model: Mat4, position: Vec3) -> Vec4 {
    view_proj * model * position.extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ui_projection;

    const EPS: f32 = 1e-5;

    fn assert_vec4_eq(a: Vec4, b: Vec4) {
        assert!((a - b).length() < EPS, "{a:?} != {b:?}");
    }

    // ── debug pass ────────────────────────────────────────────────────────

    #[test]
    fn debug_positions_pass_through_unchanged() {
        for p in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.25, -0.75),
            Vec2::ZERO,
        ] {
            let clip = clip_from_debug(p);
            assert_eq!(clip.x, p.x);
            assert_eq!(clip.y, p.y);
            assert_eq!(clip.z, 0.0);
            assert_eq!(clip.w, 1.0);
        }
    }

    // ── ortho passes ──────────────────────────────────────────────────────

    #[test]
    fn ui_clip_matches_matrix_times_promoted_position() {
        let proj = ui_projection(1280.0, 720.0);
        for p in [
            Vec2::ZERO,
            Vec2::new(1280.0, 720.0),
            Vec2::new(640.0, 360.0),
            Vec2::new(17.5, 503.25),
        ] {
            let expected = proj * Vec4::new(p.x, p.y, 0.0, 1.0);
            assert_vec4_eq(clip_from_ui(proj, p), expected);
        }
    }

    // ── instanced pass ────────────────────────────────────────────────────

    #[test]
    fn identity_instance_reproduces_static_pass() {
        let view_proj = Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 100.0)
            * Mat4::look_to_rh(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z, Vec3::Y);
        let world = Vec3::new(1.5, -0.5, -3.0);

        assert_vec4_eq(
            clip_from_instance(view_proj, Mat4::IDENTITY, world),
            clip_from_world(view_proj, world),
        );
    }

    #[test]
    fn instance_applies_before_camera() {
        let view_proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
        let translation = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let scale = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let pos = Vec3::new(0.5, -1.0, -2.0);

        // Translation and non-uniform scale do not commute, so the two
        // compositions must land at different clip positions.
        let correct = clip_from_instance(view_proj, translation * scale, pos);
        let reversed = clip_from_instance(view_proj, scale * translation, pos);
        assert!((correct - reversed).length() > 1e-3);

        // And the helper composes exactly view_proj * model * pos.
        let expected = view_proj * (translation * scale) * pos.extend(1.0);
        assert_vec4_eq(correct, expected);
    }

    // ── instance record ───────────────────────────────────────────────────

    #[test]
    fn instance_layout_occupies_slots_two_through_five() {
        let layout = InstanceRaw::layout();
        assert_eq!(layout.array_stride, 64);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.attributes.len(), 4);

        for (i, attr) in layout.attributes.iter().enumerate() {
            assert_eq!(attr.shader_location, 2 + i as u32);
            assert_eq!(attr.offset, 16 * i as u64);
            assert_eq!(attr.format, wgpu::VertexFormat::Float32x4);
        }
    }

    #[test]
    fn translation_only_transform_raw_matrix() {
        let t = InstanceTransform::new(Vec3::new(3.0, 4.0, 5.0), Quat::IDENTITY);
        let raw = t.to_raw();
        // Column-major: the translation lives in the last column.
        assert_eq!(raw.model[3][0], 3.0);
        assert_eq!(raw.model[3][1], 4.0);
        assert_eq!(raw.model[3][2], 5.0);
        assert_eq!(raw.model[0][0], 1.0);
    }
}
