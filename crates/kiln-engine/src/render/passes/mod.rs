//! The five render-pass configurations.
//!
//! Construction order and cost do not matter; each pass is built once and
//! is immutable afterwards. Uniform updates go through the passes' `set_*`
//! methods (plain `Queue::write_buffer` calls), everything else is bound by
//! the host per draw.

mod common;
mod debug_color;
mod mesh;
mod mesh_instanced;
mod ui_color;
mod ui_texture;

pub use common::{ColorVertex, QUAD_INDICES};
pub use debug_color::DebugColorPass;
pub use mesh::{MeshPass, MeshVertex};
pub use mesh_instanced::{InstanceBuffer, InstancedMeshPass};
pub use ui_color::UiColorPass;
pub use ui_texture::{TexturedVertex, UiTexturePass};
