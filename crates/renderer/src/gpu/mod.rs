//! GPU orchestration for the triangle bootstrap.
//!
//! - `context` owns the wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `pipeline` compiles the embedded GLSL stages and links them into the one
//!   render pipeline the loop uses.
//! - `geometry` uploads the static vertex buffer and records the layout
//!   descriptor that describes it to the vertex stage.
//! - `viewport` tracks the drawable extent applied to every render pass.
//! - `state` glues everything together and exposes the `GpuState` API used by
//!   `window`.

mod context;
mod geometry;
mod pipeline;
mod state;
mod viewport;

pub use geometry::{Geometry, Vertex, TRIANGLE};
pub use pipeline::{build_triangle_pipeline, compile_stage, link};
pub(crate) use state::GpuState;
