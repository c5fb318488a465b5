use crate::assets::GlslVersion;
use crate::rendering::backend::{GpuBackend, ShaderStage};
use crate::rendering::cache::generic_cache::Cache;
use log::trace;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

pub type ShaderCache<B> = Cache<u32, CompiledShader<B>>;

/// A successfully compiled shader object. Deleting the GPU object is tied to dropping
/// this value.
pub struct CompiledShader<B: GpuBackend> {
    backend: Rc<B>,
    handle: B::Shader,
    hash: u32,
    stage: ShaderStage,
    version: GlslVersion,
}

impl<B: GpuBackend> CompiledShader<B> {
    pub(crate) fn new(
        backend: Rc<B>,
        handle: B::Shader,
        hash: u32,
        stage: ShaderStage,
        version: GlslVersion,
    ) -> Self {
        Self {
            backend,
            handle,
            hash,
            stage,
            version,
        }
    }

    pub fn handle(&self) -> B::Shader {
        self.handle
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn version(&self) -> GlslVersion {
        self.version
    }
}

impl<B: GpuBackend> Debug for CompiledShader<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledShader")
            .field("handle", &self.handle)
            .field("hash", &self.hash)
            .field("stage", &self.stage)
            .field("version", &self.version)
            .finish()
    }
}

impl<B: GpuBackend> Drop for CompiledShader<B> {
    fn drop(&mut self) {
        trace!("Deleting shader {:?} (hash {})", self.handle, self.hash);
        self.backend.delete_shader(self.handle);
    }
}
