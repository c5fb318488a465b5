use crate::rendering::backend::GpuBackend;
use log::trace;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// A linked GPU program and its uniform setters.
///
/// The program object is deleted when this value is dropped, which only happens when
/// the owning manager tears down its program cache.
pub struct Program<B: GpuBackend> {
    backend: Rc<B>,
    handle: B::Program,
    vertex_hash: u32,
    fragment_hash: u32,
}

impl<B: GpuBackend> Program<B> {
    pub(crate) fn new(backend: Rc<B>, handle: B::Program, vertex_hash: u32, fragment_hash: u32) -> Self {
        Self {
            backend,
            handle,
            vertex_hash,
            fragment_hash,
        }
    }

    /// The raw GPU program handle, for binding it in draw calls.
    pub fn id(&self) -> B::Program {
        self.handle
    }

    /// `(vertex_hash, fragment_hash)` this program was linked from.
    pub fn hashes(&self) -> (u32, u32) {
        (self.vertex_hash, self.fragment_hash)
    }

    /// Sets an `int`/`sampler` uniform. Unknown names are ignored, the way GL ignores location -1.
    ///
    /// The backend may bind this program to do so and leaves it bound afterwards.
    /// Bind the program you draw with after setting uniforms.
    pub fn set_int(&self, name: &str, value: i32) {
        match self.backend.uniform_location(self.handle, name) {
            Some(location) => self.backend.set_uniform_1i(self.handle, &location, value),
            None => trace!("Program {:?} has no uniform {name}", self.handle),
        }
    }

    /// Sets a `float` uniform. Unknown names are ignored.
    ///
    /// Same binding side effect as [`set_int`](Self::set_int).
    pub fn set_float(&self, name: &str, value: f32) {
        match self.backend.uniform_location(self.handle, name) {
            Some(location) => self.backend.set_uniform_1f(self.handle, &location, value),
            None => trace!("Program {:?} has no uniform {name}", self.handle),
        }
    }
}

impl<B: GpuBackend> Debug for Program<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("handle", &self.handle)
            .field("vertex_hash", &self.vertex_hash)
            .field("fragment_hash", &self.fragment_hash)
            .finish()
    }
}

impl<B: GpuBackend> Drop for Program<B> {
    fn drop(&mut self) {
        trace!("Deleting program {:?}", self.handle);
        self.backend.delete_program(self.handle);
    }
}
