use thiserror::Error;

use crate::shaders::StageKind;

/// Errors raised while building the GPU resources the draw loop depends on.
///
/// None of these are retried: the shader texts are fixed at build time, so a
/// compile or link failure cannot self-heal, and an allocation refusal is
/// fatal. Callers report the error and refuse to enter the frame loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A shader stage source failed to compile.
    #[error("{stage} shader failed to compile: {message}")]
    Compile {
        /// Which stage the failing source was feeding.
        stage: StageKind,
        /// Driver-supplied diagnostic.
        message: String,
    },

    /// Two individually valid stages refused to combine into a pipeline.
    #[error("shader stages failed to link: {message}")]
    Link { message: String },

    /// The GPU refused to allocate a resource.
    #[error("GPU refused to allocate {what}: {message}")]
    Exhausted {
        what: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_name_the_failing_stage() {
        let err = PipelineError::Compile {
            stage: StageKind::Vertex,
            message: "unknown identifier".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("vertex shader failed to compile"));
        assert!(rendered.contains("unknown identifier"));
    }

    #[test]
    fn link_errors_carry_the_driver_message() {
        let err = PipelineError::Link {
            message: "interface mismatch at location 0".into(),
        };
        assert!(err.to_string().contains("interface mismatch"));
    }
}
