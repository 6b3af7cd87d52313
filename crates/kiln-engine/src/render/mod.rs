//! GPU rendering subsystem.
//!
//! Each pass is an immutable pipeline-configuration value built once
//! against a [`RenderCtx`] and reused for every draw. Hosts own the vertex,
//! index, instance and uniform buffers; passes fix the layouts those
//! buffers must follow.
//!
//! Binding schema (a fixed wire format between host and shader):
//!
//! | Pass           | Group 0                  | Group 1                   |
//! |----------------|--------------------------|---------------------------|
//! | Debug color    | (none)                   | (none)                    |
//! | UI flat color  | 0: mat4x4 ortho          | (none)                    |
//! | UI textured    | 0: mat4x4 ortho          | 0: texture, 1: sampler    |
//! | Mesh static    | 0: mat4x4 view-proj      | 0: texture, 1: sampler    |
//! | Mesh instanced | 0: {vec3, mat4x4} camera | 0: texture, 1: sampler    |
//!
//! Vertex slots 0-1 are always position + payload; slots 2-5, when present,
//! carry the instance matrix rows at instance rate.

mod ctx;
pub mod passes;

pub use ctx::{RenderCtx, RenderTarget};
