//! Renderer errors
//!
//! Every variant is terminal for the current mount. None of them escape the
//! renderer's public operations; they are logged and kept as `last_error`.

use std::fmt;

use gitaf_hal::{GfxError, HalError, ShaderStage};

/// Errors that stop the background renderer
#[derive(Clone, Debug, PartialEq)]
pub enum RenderError {
    /// No graphics context for the drawing surface
    ContextUnavailable,

    /// A shader stage failed to compile
    ShaderCompileFailed { stage: ShaderStage, log: String },

    /// The two stages failed to link
    ProgramLinkFailed(String),

    /// The linked program has no vertex input for the quad
    VertexInputMissing(&'static str),

    /// The quad could not be uploaded
    BufferUploadFailed(GfxError),

    /// A frame failed mid-draw
    FrameRenderFailed(GfxError),

    /// The host refused a listener or a frame request
    Host(HalError),
}

impl RenderError {
    /// Build the error for a failed compile of `stage`
    pub(crate) fn compile(stage: ShaderStage, err: GfxError) -> Self {
        let log = match err {
            GfxError::CompileFailed(log) => log,
            other => other.to_string(),
        };
        RenderError::ShaderCompileFailed { stage, log }
    }

    /// Build the error for a failed link
    pub(crate) fn link(err: GfxError) -> Self {
        match err {
            GfxError::LinkFailed(log) => RenderError::ProgramLinkFailed(log),
            other => RenderError::ProgramLinkFailed(other.to_string()),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ContextUnavailable => write!(f, "WebGL not supported"),
            RenderError::ShaderCompileFailed { stage, log } => {
                write!(f, "Shader compile error ({}): {}", stage.name(), log)
            }
            RenderError::ProgramLinkFailed(log) => write!(f, "Program link error: {}", log),
            RenderError::VertexInputMissing(name) => {
                write!(f, "Program has no vertex input '{}'", name)
            }
            RenderError::BufferUploadFailed(e) => write!(f, "Failed to upload quad: {}", e),
            RenderError::FrameRenderFailed(e) => write!(f, "Error rendering: {}", e),
            RenderError::Host(e) => write!(f, "Host error: {}", e),
        }
    }
}

impl From<HalError> for RenderError {
    fn from(e: HalError) -> Self {
        match e {
            HalError::ContextUnavailable => RenderError::ContextUnavailable,
            other => RenderError::Host(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_keeps_info_log() {
        let err = RenderError::compile(
            ShaderStage::Fragment,
            GfxError::CompileFailed("0:12: syntax error".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Shader compile error (fragment): 0:12: syntax error"
        );
    }

    #[test]
    fn test_link_from_other_gfx_error() {
        let err = RenderError::link(GfxError::ContextLost);
        assert_eq!(err, RenderError::ProgramLinkFailed("context lost".to_string()));
    }

    #[test]
    fn test_from_hal_error() {
        assert_eq!(
            RenderError::from(HalError::ContextUnavailable),
            RenderError::ContextUnavailable
        );
        assert_eq!(
            RenderError::from(HalError::SchedulerUnavailable),
            RenderError::Host(HalError::SchedulerUnavailable)
        );
    }
}
