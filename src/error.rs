//! Error types for the renderer and the host.
use thiserror::Error;

use crate::gl_wrappers::ShaderType;

/// Everything that can go wrong between asking for a context and finishing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not get the requested OpenGL context: {0}")]
    ContextNegotiation(String),

    #[error("{stage} shader compilation error: {log}")]
    ShaderCompile { stage: ShaderType, log: String },

    #[error("error linking program. OpenGL reply: '{0}'")]
    ShaderLink(String),

    #[error("vertex input `{0}` is not an active attribute of the program")]
    MissingAttribute(String),

    #[error("{call} failed with GL error 0x{code:04x}")]
    Draw { call: &'static str, code: u32 },

    #[error("paint requested before setup")]
    NotReady,

    #[error("could not write diagnostics: {0}")]
    Diagnostics(#[from] std::io::Error),
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
