use std::time::{Duration, Instant};

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::RendererConfig;

use super::context::GpuContext;
use super::geometry::{Geometry, TRIANGLE};
use super::pipeline::build_triangle_pipeline;
use super::viewport::Viewport;

/// Aggregates every GPU-side resource needed to draw the triangle.
///
/// Field order doubles as shutdown order: the pipeline and geometry drop
/// before the surface and device they were created from.
pub(crate) struct GpuState {
    pipeline: wgpu::RenderPipeline,
    geometry: Geometry,
    viewport: Viewport,
    stats: FrameStats,
    context: GpuContext,
}

impl GpuState {
    /// Builds the pipeline and geometry against a fresh GPU context.
    ///
    /// Fails before any frame loop exists if a stage refuses to compile, the
    /// stages refuse to link, or the vertex buffer cannot be allocated. Both
    /// stages are compiled and attached before the link, and the link
    /// completes before the state is handed to the draw loop.
    pub(crate) fn new<T>(
        target: &T,
        size: PhysicalSize<u32>,
        config: &RendererConfig,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, size, config.vsync)?;
        let pipeline = build_triangle_pipeline(&context.device, context.surface_format)?;
        let geometry = Geometry::upload(&context.device, &TRIANGLE)?;
        let viewport = Viewport::new(size);

        Ok(Self {
            pipeline,
            geometry,
            viewport,
            stats: FrameStats::new(Instant::now()),
            context,
        })
    }

    /// Resize handler: keeps the surface configuration and the rasterization
    /// viewport consistent with the drawable extent. Zero-dimension sizes
    /// (minimized windows) are ignored, and a repeat call with unchanged
    /// dimensions is a no-op.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        if !self.viewport.update(new_size) {
            return;
        }
        self.context.resize(new_size);
        let (width, height) = self.viewport.extent();
        debug!(width, height, "surface resized");
    }

    /// Reconfigures the surface at the current size after a lost or outdated
    /// frame.
    pub(crate) fn recover_surface(&mut self) {
        let size = self.context.size;
        self.context.resize(size);
    }

    /// Renders and presents exactly one frame.
    ///
    /// The per-frame sequence is fixed: clear the color target to opaque
    /// black, activate the pipeline, bind the geometry, draw the uploaded
    /// vertex range, present. No step is skipped or reordered, and a failed
    /// acquisition leaves the sequence untouched for the caller to retry on a
    /// later iteration.
    pub(crate) fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.viewport.apply(&mut render_pass);
            render_pass.set_pipeline(&self.pipeline);
            self.geometry.bind(&mut render_pass);
            render_pass.draw(self.geometry.draw_range(), 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        if let Some(fps) = self.stats.frame_presented(Instant::now()) {
            debug!(
                fps = fps.round(),
                frames = self.stats.total_presented(),
                "render stats"
            );
        }

        Ok(())
    }
}

/// Counts presented frames and derives a once-a-second FPS reading.
struct FrameStats {
    total_presented: u64,
    window_start: Instant,
    frames_in_window: u32,
}

impl FrameStats {
    fn new(now: Instant) -> Self {
        Self {
            total_presented: 0,
            window_start: now,
            frames_in_window: 0,
        }
    }

    /// Records one presented frame; returns the frame rate once per elapsed
    /// second of wall-clock time.
    fn frame_presented(&mut self, now: Instant) -> Option<f32> {
        self.total_presented += 1;
        self.frames_in_window += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }

        let fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
        self.frames_in_window = 0;
        self.window_start = now;
        Some(fps)
    }

    fn total_presented(&self) -> u64 {
        self.total_presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_present_is_counted_per_frame() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);

        for _ in 0..5 {
            stats.frame_presented(start);
        }
        assert_eq!(stats.total_presented(), 5);
    }

    #[test]
    fn fps_is_reported_once_a_full_second_elapsed() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);

        assert_eq!(stats.frame_presented(start + Duration::from_millis(500)), None);
        let fps = stats
            .frame_presented(start + Duration::from_secs(2))
            .expect("a second has elapsed");
        assert!(fps > 0.0);

        // The window restarts after a report.
        assert_eq!(
            stats.frame_presented(start + Duration::from_millis(2100)),
            None
        );
        assert_eq!(stats.total_presented(), 3);
    }
}
