//! Kiln engine crate.
//!
//! This crate owns the GPU-side data contract of the renderer: the five
//! render-pass pipeline configurations, their vertex/instance/uniform
//! layouts, and the transform math those layouts depend on.
//!
//! Window creation, device/queue acquisition, asset loading and scene
//! composition are the host's responsibility; everything here works
//! against a borrowed `wgpu::Device`/`wgpu::Queue`.

pub mod camera;
pub mod logging;
pub mod render;
pub mod texture;
pub mod transform;
