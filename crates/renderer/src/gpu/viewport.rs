use winit::dpi::PhysicalSize;

/// Width and height of the drawable surface in physical pixels.
///
/// Written only by the resize path; read when encoding each render pass. The
/// origin is fixed at (0,0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        Self {
            width: size.width.max(1),
            height: size.height.max(1),
        }
    }

    /// Updates the extent, returning whether it actually changed. Calling
    /// twice with the same dimensions leaves the state untouched.
    pub fn update(&mut self, size: PhysicalSize<u32>) -> bool {
        let next = Self::new(size);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }

    /// Applies origin (0,0) and the current extent to `render_pass`.
    pub fn apply(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_viewport(
            0.0,
            0.0,
            self.width as f32,
            self.height as f32,
            0.0,
            1.0,
        );
    }

    pub fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
