use std::fmt;

use wgpu::naga::ShaderStage;

/// Identifies which programmable stage a source text feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn naga_stage(self) -> ShaderStage {
        match self {
            StageKind::Vertex => ShaderStage::Vertex,
            StageKind::Fragment => ShaderStage::Fragment,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            StageKind::Vertex => "triangle vertex",
            StageKind::Fragment => "triangle fragment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// An immutable shader stage source text tagged with its stage kind.
///
/// Sources are compile-time constants, never mutated, and consumed exactly
/// once by the pipeline build.
#[derive(Clone, Copy, Debug)]
pub struct StageSource {
    pub kind: StageKind,
    pub glsl: &'static str,
}

/// Pass-through vertex stage: reads a 3D position at attribute location 0 and
/// emits it untransformed.
pub const TRIANGLE_VERTEX: StageSource = StageSource {
    kind: StageKind::Vertex,
    glsl: r"#version 450
layout(location = 0) in vec3 position;

void main() {
    gl_Position = vec4(position, 1.0);
}
",
};

/// Constant-blue fragment stage.
pub const TRIANGLE_FRAGMENT: StageSource = StageSource {
    kind: StageKind::Fragment,
    glsl: r"#version 450
layout(location = 0) out vec4 out_color;

void main() {
    out_color = vec4(0.0, 0.0, 1.0, 1.0);
}
",
};
