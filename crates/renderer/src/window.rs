use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::RendererConfig;

/// Aggregates the window handle and GPU state for the draw loop.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size, config)?;
        Ok(Self { window, gpu })
    }
}

/// Opens the preview window and runs the draw loop until close is requested.
///
/// Pipeline, geometry, and context construction happen before the loop
/// starts; any failure is reported to the caller and the loop is never
/// entered with an unusable pipeline. Once running, every iteration renders
/// and presents exactly one frame, then winit dispatches pending window
/// events (which may resize the surface) before the next redraw.
pub fn run_windowed(config: &RendererConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone(), config)
        .context("failed to initialise the GPU renderer")?;
    info!(
        width = window_size.width,
        height = window_size.height,
        "entering draw loop"
    );

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.gpu.resize(new_size);
                    }
                    WindowEvent::RedrawRequested => match state.gpu.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.gpu.recover_surface();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("surface out of memory; exiting");
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            warn!("surface timeout; retrying next frame");
                        }
                        Err(other) => {
                            warn!("surface error: {other:?}; retrying next frame");
                        }
                    },
                    _ => {}
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
                elwt.set_control_flow(ControlFlow::Poll);
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
