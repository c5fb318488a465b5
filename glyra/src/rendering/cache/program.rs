use crate::rendering::backend::GpuBackend;
use crate::rendering::cache::generic_cache::Cache;
use crate::rendering::cache::shader::CompiledShader;
use crate::rendering::error::{LinkFailedErr, ObjectCreationErr, ShaderError};
use crate::rendering::program::Program;
use log::{trace, warn};
use static_assertions::const_assert_eq;
use std::rc::Rc;

/// Identity of a linked program. Vertex and fragment roles are not interchangeable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramKey {
    pub vertex_hash: u32,
    pub fragment_hash: u32,
}

impl ProgramKey {
    pub const fn new(vertex_hash: u32, fragment_hash: u32) -> Self {
        Self {
            vertex_hash,
            fragment_hash,
        }
    }
}

const_assert_eq!(size_of::<ProgramKey>(), 8);

pub type ProgramCache<B> = Cache<ProgramKey, Program<B>>;

/// Creates a program from two compiled shaders and links it.
///
/// A failed link deletes the program object again and returns the driver's log.
pub(crate) fn link<B: GpuBackend>(
    backend: &Rc<B>,
    vertex: &CompiledShader<B>,
    fragment: &CompiledShader<B>,
) -> Result<Program<B>, ShaderError> {
    let handle = backend
        .create_program()
        .map_err(|message| ObjectCreationErr { message }.build())?;

    backend.attach_shader(handle, fragment.handle());
    backend.attach_shader(handle, vertex.handle());

    if !backend.link_program(handle) {
        let log = backend.program_info_log(handle);
        warn!("Failed to link program: {log}");
        backend.delete_program(handle);
        return LinkFailedErr {
            vertex_hash: vertex.hash(),
            fragment_hash: fragment.hash(),
            log,
        }
        .fail();
    }

    trace!(
        "Linking program with shaders V: {:?} F: {:?} P: {handle:?}",
        vertex.handle(),
        fragment.handle()
    );

    Ok(Program::new(backend.clone(), handle, vertex.hash(), fragment.hash()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_order_sensitive() {
        assert_ne!(ProgramKey::new(1, 2), ProgramKey::new(2, 1));
        assert_eq!(ProgramKey::new(1, 2), ProgramKey::new(1, 2));
    }
}
