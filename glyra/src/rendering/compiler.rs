use crate::assets::{GlslVersion, PermutationDefine};
use crate::rendering::backend::{GpuBackend, ShaderStage};
use crate::rendering::cache::CompiledShader;
use crate::rendering::error::{AllocationFailedErr, CompileFailedErr, ObjectCreationErr, ShaderError};
use log::{trace, warn};
use snafu::ResultExt;
use std::rc::Rc;

const DEFINE_PREFIX: &str = "#define ";

/// Builds the final text handed to the driver:
/// version pragma, one `#define NAME[ VALUE]` line per define, then the body.
///
/// Defines with an empty name are skipped with a warning.
pub fn construct_shader(
    source: &str,
    defines: &[PermutationDefine],
    version: GlslVersion,
) -> Result<String, ShaderError> {
    let pragma = version.pragma();

    let mut size = pragma.len() + source.len();
    for define in defines.iter().filter(|d| !d.name().is_empty()) {
        size += DEFINE_PREFIX.len() + define.name().len() + 1;
        if let Some(value) = define.value() {
            size += 1 + value.len();
        }
    }

    let mut shader = String::new();
    shader
        .try_reserve_exact(size)
        .context(AllocationFailedErr)?;

    shader.push_str(pragma);
    for (i, define) in defines.iter().enumerate() {
        if define.name().is_empty() {
            warn!("Name is empty for permutation # {i}");
            continue;
        }
        shader.push_str(DEFINE_PREFIX);
        shader.push_str(define.name());
        if let Some(value) = define.value() {
            shader.push(' ');
            shader.push_str(value);
        }
        shader.push('\n');
    }
    shader.push_str(source);

    debug_assert_eq!(shader.len(), size);
    Ok(shader)
}

/// Creates and compiles one shader object.
///
/// On failure the driver's info log is logged and returned, and the shader object is
/// deleted again; nothing about the failure is remembered.
pub(crate) fn compile<B: GpuBackend>(
    backend: &Rc<B>,
    identifier: &str,
    hash: u32,
    source: &str,
    version: GlslVersion,
) -> Result<CompiledShader<B>, ShaderError> {
    let stage = ShaderStage::from_identifier(identifier);

    let handle = backend
        .create_shader(stage)
        .map_err(|message| ObjectCreationErr { message }.build())?;

    if !backend.compile_shader(handle, source) {
        let log = backend.shader_info_log(handle);
        warn!("Failed to compile shader {identifier} for glsl version '{version}': {log}");
        backend.delete_shader(handle);
        return CompileFailedErr {
            identifier,
            version,
            log,
        }
        .fail();
    }

    trace!(
        "Compiled {} shader {identifier} to {handle:?} Hash {hash}",
        stage.short_name()
    );

    Ok(CompiledShader::new(backend.clone(), handle, hash, stage, version))
}
