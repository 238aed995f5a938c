//! Renderer crate for triview.
//!
//! The module glues the preview window, the `wgpu` triangle pipeline, and the
//! embedded GLSL stage sources together. The overall flow is:
//!
//! ```text
//!   CLI / triview
//!          │ RendererConfig
//!          ▼
//!   run_windowed ──▶ WindowState ──▶ winit event loop ──▶ GpuState::render()
//!          ▲                                   │
//!          │                                   └─▶ resize ─▶ surface + viewport
//! ```
//!
//! `GpuState` owns all GPU resources (surface, device, pipeline, geometry),
//! while `run_windowed` is the thin entry point that opens the window and
//! drives redraws until close is requested. The pipeline is built exactly once
//! at start-up from the embedded vertex and fragment sources; if either stage
//! fails to compile, or the two stages fail to link, start-up reports the
//! failing stage and message and the draw loop is never entered.

mod error;
mod gpu;
mod shaders;
mod window;

pub use error::PipelineError;
pub use gpu::{build_triangle_pipeline, compile_stage, link, Geometry, Vertex, TRIANGLE};
pub use shaders::{StageKind, StageSource, TRIANGLE_FRAGMENT, TRIANGLE_VERTEX};
pub use window::run_windowed;

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title for the preview window.
    pub window_title: String,
    /// Present on the display's refresh cadence (Fifo) when true; otherwise
    /// prefer immediate presentation.
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (800, 600),
            window_title: "triview".to_string(),
            vsync: true,
        }
    }
}
