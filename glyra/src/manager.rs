//! The shader manager: one source registry plus the compiled-shader, program and
//! texture caches, sharing a single GPU backend.
//!
//! Typical use by a renderer:
//!
//! 1. [`ShaderManager::init`] once, with every named source the renderer needs.
//! 2. [`ShaderManager::select`] the vertex shader, then the fragment shader, for the
//!    permutation of the current draw. Both return a hash.
//! 3. [`ShaderManager::get_program`] with both hashes to obtain a linked program.
//!
//! Everything compiled or linked stays cached until the manager is torn down, either
//! through [`ShaderManager::deinit`] or by dropping it.

use crate::assets::{GlslVersion, PermutationDefine, ShaderSource, SourceEntry, SourceRegistry, permutation_hash};
use crate::rendering::backend::{GpuBackend, ShaderStage};
use crate::rendering::cache::{
    CacheCounters, CompiledShader, ProgramCache, ProgramKey, ShaderCache, TextureCache, link,
};
use crate::rendering::compiler::{self, construct_shader};
use crate::rendering::error::NotFoundErr;
use crate::rendering::{Program, ShaderError};
use bon::Builder;
use log::{info, trace, warn};
use std::borrow::Cow;
use std::rc::Rc;

/// Everything a [`ShaderManager`] needs to know up front.
#[derive(Debug, Clone, Builder)]
pub struct ShaderManagerDesc {
    /// Named snippets and full shaders. Names double as `#include <name>` targets.
    #[builder(default)]
    pub sources: Vec<ShaderSource>,
    /// Primary vertex shader body, registered as `__MAIN__.vert`.
    #[builder(into)]
    pub main_vertex: Option<Cow<'static, str>>,
    /// Primary fragment shader body, registered as `__MAIN__.frag`.
    #[builder(into)]
    pub main_fragment: Option<Cow<'static, str>>,
    /// Version used by [`ShaderManager::select_default`].
    #[builder(default)]
    pub default_version: GlslVersion,
}

/// What a teardown released.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub programs_deleted: usize,
    pub shaders_deleted: usize,
    pub owned_sources_freed: usize,
    /// Texture handles forgotten. Textures are owned by their uploader and never deleted here.
    pub textures_released: usize,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub shaders: CacheCounters,
    pub programs: CacheCounters,
    pub textures: CacheCounters,
}

pub struct ShaderManager<B: GpuBackend> {
    // programs are declared first so they are dropped before the shaders they were linked from
    programs: ProgramCache<B>,
    shaders: ShaderCache<B>,
    textures: TextureCache<B>,
    sources: SourceRegistry,
    default_version: GlslVersion,
    backend: Rc<B>,
    torn_down: bool,
}

impl<B: GpuBackend> ShaderManager<B> {
    /// Registers all sources (expanding includes) and creates empty caches.
    ///
    /// # Panics
    ///
    /// Panics if a source contains an `#include` that names no registered source.
    pub fn init(backend: Rc<B>, desc: ShaderManagerDesc) -> Self {
        let ShaderManagerDesc {
            sources,
            main_vertex,
            main_fragment,
            default_version,
        } = desc;

        let sources = SourceRegistry::register(&sources, main_vertex, main_fragment);

        ShaderManager {
            programs: ProgramCache::new("Program"),
            shaders: ShaderCache::new("Shader"),
            textures: TextureCache::new(),
            sources,
            default_version,
            backend,
            torn_down: false,
        }
    }

    /// Resolves `identifier` + `defines` to a compiled shader and returns its hash.
    ///
    /// A cached variant is returned without touching the GPU. Otherwise the shader is
    /// compiled for `version`; a failed compile is not cached, so selecting it again
    /// retries.
    pub fn select(
        &mut self,
        identifier: &str,
        defines: &[PermutationDefine],
        version: GlslVersion,
    ) -> Result<u32, ShaderError> {
        trace!("Select shader '{identifier}'");

        let Some(entry) = self.sources.find(identifier) else {
            warn!("Couldn't find shader {identifier}");
            return NotFoundErr { identifier }.fail();
        };

        let hash = permutation_hash(identifier, defines);

        if let Some(compiled) = self.shaders.lookup(hash) {
            trace!(
                "Shader '{identifier}' with hash {hash} found. Id: {:?}",
                compiled.handle()
            );
            if compiled.version() != version {
                warn!(
                    "Shader '{identifier}' with hash {hash} was compiled for {} but {version} was requested",
                    compiled.version()
                );
            }
            return Ok(hash);
        }

        let source = construct_shader(entry.source(), defines, version)?;
        let compiled = compiler::compile(&self.backend, identifier, hash, &source, version)?;
        self.shaders.insert(hash, compiled);

        Ok(hash)
    }

    /// [`select`](Self::select) with the version configured in [`ShaderManagerDesc`].
    pub fn select_default(&mut self, identifier: &str, defines: &[PermutationDefine]) -> Result<u32, ShaderError> {
        self.select(identifier, defines, self.default_version)
    }

    /// Returns the program linked from the two selected shaders, or `None` when linking
    /// failed. The driver's link log is logged either way.
    ///
    /// The vertex hash comes first. The key is ordered, so swapped arguments would name a
    /// different program; debug builds reject them.
    ///
    /// # Panics
    ///
    /// Panics if either hash was never returned by a successful [`select`](Self::select),
    /// and in debug builds if the shaders' stages do not match their positions.
    pub fn get_program(&mut self, vertex_hash: u32, fragment_hash: u32) -> Option<&Program<B>> {
        self.try_get_program(vertex_hash, fragment_hash).ok()
    }

    /// Like [`get_program`](Self::get_program), but keeps the link log in the error.
    pub fn try_get_program(&mut self, vertex_hash: u32, fragment_hash: u32) -> Result<&Program<B>, ShaderError> {
        let shaders = &self.shaders;
        let backend = &self.backend;

        self.programs
            .get_or_try_insert_with(ProgramKey::new(vertex_hash, fragment_hash), || {
                let Some(vertex) = shaders.peek(vertex_hash) else {
                    panic!("Unable to find vertex shader with hash {vertex_hash}");
                };
                let Some(fragment) = shaders.peek(fragment_hash) else {
                    panic!("Unable to find fragment shader with hash {fragment_hash}");
                };
                debug_assert_eq!(
                    vertex.stage(),
                    ShaderStage::Vertex,
                    "Shader with hash {vertex_hash} is not a vertex shader"
                );
                debug_assert_eq!(
                    fragment.stage(),
                    ShaderStage::Fragment,
                    "Shader with hash {fragment_hash} is not a fragment shader"
                );
                link(backend, vertex, fragment)
            })
    }

    /// Remembers an uploaded texture under its content hash. The manager never deletes it.
    pub fn store_texture(&mut self, hash: u32, texture: B::Texture) {
        self.textures.store(hash, texture);
    }

    /// `None` means "not cached yet", not an error.
    pub fn get_texture(&self, hash: u32) -> Option<B::Texture> {
        self.textures.get(hash)
    }

    pub fn find_source(&self, name: &str) -> Option<&SourceEntry> {
        self.sources.find(name)
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn shader(&self, hash: u32) -> Option<&CompiledShader<B>> {
        self.shaders.peek(hash)
    }

    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    pub fn default_version(&self) -> GlslVersion {
        self.default_version
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            shaders: self.shaders.counters(),
            programs: self.programs.counters(),
            textures: self.textures.counters(),
        }
    }

    /// Deletes every cached program and shader, frees owned source texts and forgets
    /// cached textures. Dropping the manager does the same.
    pub fn deinit(mut self) -> TeardownReport {
        self.teardown()
    }

    fn teardown(&mut self) -> TeardownReport {
        if self.torn_down {
            return TeardownReport::default();
        }
        self.torn_down = true;

        info!("Destroying shader cache");

        let report = TeardownReport {
            textures_released: self.textures.release(),
            owned_sources_freed: self.sources.release(),
            programs_deleted: self.programs.drain_all(),
            shaders_deleted: self.shaders.drain_all(),
        };

        trace!("{report:?}");
        report
    }
}

impl<B: GpuBackend> Drop for ShaderManager<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
