//! Camera math and camera-facing uniform layouts.
//!
//! Two uniform shapes exist on purpose:
//! - [`CameraUniform`]: a bare 4x4 view-projection matrix (64 bytes),
//!   consumed by the static mesh pass.
//! - [`InstancedCameraUniform`]: camera position (padded to vec4) followed
//!   by the view-projection matrix (80 bytes), consumed by the instanced
//!   mesh pass.
//!
//! The two are NOT binary compatible; a buffer laid out for one must never
//! be bound to the other. Keeping them as distinct `Pod` types makes the
//! mismatch a type error on the host side instead of a garbled matrix read
//! on the GPU side.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Free-look perspective camera.
///
/// Angles are radians. `yaw = 0, pitch = 0` looks down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub aspect: f32,
    pub fovy: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(
        position: Vec3,
        yaw: f32,
        pitch: f32,
        width: u32,
        height: u32,
        fovy: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            position,
            yaw,
            pitch,
            aspect: width as f32 / height as f32,
            fovy,
            z_near,
            z_far,
        }
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.view_direction(), Vec3::Y)
    }

    /// Perspective projection in wgpu's 0..1 depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Updates the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Forward direction without pitch (movement on the ground plane).
    pub fn forward_direction(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        Vec3::new(yaw_sin, 0.0, -yaw_cos).normalize()
    }

    /// Direction the camera is actually looking at.
    pub fn view_direction(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), -self.pitch.sin(), -self.yaw.cos()).normalize()
    }

    pub fn right_direction(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        Vec3::new(yaw_cos, 0.0, yaw_sin).normalize()
    }
}

/// Orthographic projection for UI passes: logical pixel coordinates with a
/// top-left origin mapped to clip space.
///
/// Hosts must recompute and re-upload this whenever the viewport size
/// changes.
pub fn ui_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width.max(1.0), height.max(1.0), 0.0, -1.0, 1000.0)
}

// ── camera uniforms ───────────────────────────────────────────────────────

/// Group 0 / slot 0 uniform of the static mesh pass: a bare view-projection
/// matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self::from_view_proj(camera.view_projection())
    }

    pub fn from_view_proj(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::from_view_proj(Mat4::IDENTITY)
    }
}

/// Group 0 / slot 0 uniform of the instanced mesh pass.
///
/// The leading position is padded to a vec4 so `view_proj` lands at byte
/// offset 16, matching the WGSL struct `{ position: vec3, view_proj:
/// mat4x4 }`. The position field is reserved (the fragment stage does not
/// read it yet) but it is part of the wire layout all the same.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct InstancedCameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl InstancedCameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_position: camera.position.extend(1.0).to_array(),
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}

impl Default for InstancedCameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn camera_at_origin() -> Camera {
        Camera::new(Vec3::ZERO, 0.0, 0.0, 800, 600, std::f32::consts::FRAC_PI_2, 0.1, 100.0)
    }

    // ── uniform layouts ───────────────────────────────────────────────────

    #[test]
    fn camera_uniform_is_a_bare_matrix() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn instanced_camera_uniform_is_position_then_matrix() {
        assert_eq!(std::mem::size_of::<InstancedCameraUniform>(), 80);
        assert_eq!(std::mem::offset_of!(InstancedCameraUniform, view_position), 0);
        assert_eq!(std::mem::offset_of!(InstancedCameraUniform, view_proj), 16);
    }

    #[test]
    fn uniform_layouts_are_not_interchangeable() {
        assert_ne!(
            std::mem::size_of::<CameraUniform>(),
            std::mem::size_of::<InstancedCameraUniform>(),
        );
    }

    // ── directions ────────────────────────────────────────────────────────

    #[test]
    fn zero_yaw_looks_down_negative_z() {
        let cam = camera_at_origin();
        let dir = cam.view_direction();
        assert!((dir - Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn right_is_positive_x_at_zero_yaw() {
        let cam = camera_at_origin();
        assert!((cam.right_direction() - Vec3::X).length() < EPS);
    }

    #[test]
    fn forward_ignores_pitch() {
        let mut cam = camera_at_origin();
        cam.pitch = 0.7;
        let fwd = cam.forward_direction();
        assert!(fwd.y.abs() < EPS);
        assert!((fwd - Vec3::NEG_Z).length() < EPS);
    }

    // ── projections ───────────────────────────────────────────────────────

    #[test]
    fn point_ahead_projects_to_center() {
        let cam = camera_at_origin();
        let clip = cam.view_projection() * Vec4::new(0.0, 0.0, -5.0, 1.0);
        assert!(clip.x.abs() < EPS);
        assert!(clip.y.abs() < EPS);
        assert!((clip.w - 5.0).abs() < EPS);
    }

    #[test]
    fn ui_projection_maps_pixels_to_ndc() {
        let proj = ui_projection(800.0, 600.0);

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < EPS);
        assert!((top_left.y - 1.0).abs() < EPS);

        let bottom_right = proj * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < EPS);
        assert!((bottom_right.y + 1.0).abs() < EPS);

        let center = proj * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!(center.x.abs() < EPS);
        assert!(center.y.abs() < EPS);
    }
}
