use crate::assets::GlslVersion;
use snafu::Snafu;
use std::collections::TryReserveError;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum ShaderError {
    #[snafu(display("Couldn't find shader {identifier}"))]
    NotFound { identifier: String },

    #[snafu(display("Failed to compile shader {identifier} for glsl version '{version}': {log}"))]
    CompileFailed {
        identifier: String,
        version: GlslVersion,
        log: String,
    },

    #[snafu(display(
        "Failed to link program (vertex hash {vertex_hash}, fragment hash {fragment_hash}): {log}"
    ))]
    LinkFailed {
        vertex_hash: u32,
        fragment_hash: u32,
        log: String,
    },

    #[snafu(display("Failed to allocate enough space for shader source: {source}"))]
    AllocationFailed { source: TryReserveError },

    #[snafu(display("The GPU backend couldn't create an object: {message}"))]
    ObjectCreation { message: String },
}

impl ShaderError {
    /// The diagnostic log reported by the GPU backend, if this error carries one.
    pub fn backend_log(&self) -> Option<&str> {
        match self {
            ShaderError::CompileFailed { log, .. } | ShaderError::LinkFailed { log, .. } => Some(log),
            _ => None,
        }
    }
}
