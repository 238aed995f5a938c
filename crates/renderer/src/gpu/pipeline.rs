use std::borrow::Cow;

use tracing::debug;

use crate::error::PipelineError;
use crate::shaders::{StageSource, TRIANGLE_FRAGMENT, TRIANGLE_VERTEX};

use super::geometry::Vertex;

/// Compiles one shader stage source into a GPU shader object.
///
/// The GLSL text goes through wgpu's naga frontend inside a validation error
/// scope; a frontend or validation failure surfaces as
/// [`PipelineError::Compile`] carrying the stage kind and the driver message.
pub fn compile_stage(
    device: &wgpu::Device,
    source: StageSource,
) -> Result<wgpu::ShaderModule, PipelineError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(source.kind.label()),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source.glsl),
            stage: source.kind.naga_stage(),
            defines: &[],
        },
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(PipelineError::Compile {
            stage: source.kind,
            message: error.to_string(),
        });
    }
    Ok(module)
}

/// Links a compiled vertex and fragment stage into one render pipeline.
///
/// Both modules are consumed by value: their handles drop once the link
/// attempt finishes, whether it produced a usable pipeline or not.
pub fn link(
    device: &wgpu::Device,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, PipelineError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("triangle pipeline"),
        layout: None,
        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: Some("main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: Some("main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview: None,
        cache: None,
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(PipelineError::Link {
            message: error.to_string(),
        });
    }
    Ok(pipeline)
}

/// Builds the triangle pipeline from the embedded stage sources.
///
/// Both stages must compile before the link is attempted; a failure on either
/// stage aborts before any pipeline object exists.
pub fn build_triangle_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, PipelineError> {
    let vertex = compile_stage(device, TRIANGLE_VERTEX)?;
    let fragment = compile_stage(device, TRIANGLE_FRAGMENT)?;
    let pipeline = link(device, vertex, fragment, surface_format)?;
    debug!(?surface_format, "triangle pipeline linked");
    Ok(pipeline)
}
