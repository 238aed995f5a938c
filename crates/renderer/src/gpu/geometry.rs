use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::error::PipelineError;

/// A single 3-component position vertex, laid out exactly as the GPU reads it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Layout descriptor for the vertex buffer: attribute location 0, three
    /// 32-bit floats, unnormalized, tightly packed from offset 0. Must match
    /// the byte layout of the uploaded data exactly; the location must match
    /// the vertex stage input, which is not validated automatically.
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// The demo triangle: apex top-center, base corners bottom left and right.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [0.0, 0.5, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
    },
];

/// One vertex buffer paired with its layout, bindable as a single unit.
pub struct Geometry {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl Geometry {
    /// Allocates a GPU buffer and copies the full vertex array into it once.
    ///
    /// The data never changes after this copy (static usage). An allocation
    /// refusal surfaces as [`PipelineError::Exhausted`] and is fatal.
    pub fn upload(device: &wgpu::Device, vertices: &[Vertex]) -> Result<Self, PipelineError> {
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(PipelineError::Exhausted {
                what: "vertex buffer",
                message: error.to_string(),
            });
        }
        Ok(Self {
            buffer,
            vertex_count: vertices.len() as u32,
        })
    }

    /// Makes this geometry the active vertex input for the draws that follow
    /// in `render_pass`. Bindings do not outlive the pass, so this is
    /// re-issued every frame.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.buffer.slice(..));
    }

    /// Vertex range covering exactly the data that was uploaded — never fewer
    /// vertices, never more.
    pub fn draw_range(&self) -> Range<u32> {
        0..self.vertex_count
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_uploaded_byte_layout() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);

        let attribute = layout.attributes[0];
        assert_eq!(attribute.shader_location, 0);
        assert_eq!(attribute.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attribute.offset, 0);
    }

    #[test]
    fn demo_triangle_is_three_vertices_of_nine_floats() {
        assert_eq!(TRIANGLE.len(), 3);
        let floats: &[f32] = bytemuck::cast_slice(TRIANGLE.as_slice());
        assert_eq!(floats.len(), 9);
        assert_eq!(floats[..3], [0.0, 0.5, 0.0]);
    }
}
