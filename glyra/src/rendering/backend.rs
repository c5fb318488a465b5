use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// `.vert` identifiers are vertex shaders; everything else is treated as a fragment shader.
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.ends_with(".vert") {
            ShaderStage::Vertex
        } else {
            ShaderStage::Fragment
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "V",
            ShaderStage::Fragment => "F",
        }
    }
}

/// The GPU driver calls the shader manager depends on.
///
/// All calls happen on the thread that owns the GL context. Implementations are not
/// expected to be `Send` or `Sync`.
pub trait GpuBackend {
    type Shader: Copy + Debug + Eq + Hash;
    type Program: Copy + Debug + Eq + Hash;
    type Texture: Copy + Debug + Eq;
    type UniformLocation: Debug;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Uploads `source` and compiles it. Returns the compile status.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links the program. Returns the link status.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// Uniform setters may make `program` the current program and leave it current.
    fn set_uniform_1i(&self, program: Self::Program, location: &Self::UniformLocation, value: i32);
    fn set_uniform_1f(&self, program: Self::Program, location: &Self::UniformLocation, value: f32);
}

#[cfg(feature = "glow")]
mod gl {
    use super::{GpuBackend, ShaderStage};
    use glow::HasContext;

    type GlShader = <glow::Context as HasContext>::Shader;
    type GlProgram = <glow::Context as HasContext>::Program;
    type GlTexture = <glow::Context as HasContext>::Texture;
    type GlUniformLocation = <glow::Context as HasContext>::UniformLocation;

    impl GpuBackend for glow::Context {
        type Shader = GlShader;
        type Program = GlProgram;
        type Texture = GlTexture;
        type UniformLocation = GlUniformLocation;

        fn create_shader(&self, stage: ShaderStage) -> Result<GlShader, String> {
            let shader_type = match stage {
                ShaderStage::Vertex => glow::VERTEX_SHADER,
                ShaderStage::Fragment => glow::FRAGMENT_SHADER,
            };
            unsafe { HasContext::create_shader(self, shader_type) }
        }

        fn compile_shader(&self, shader: GlShader, source: &str) -> bool {
            unsafe {
                self.shader_source(shader, source);
                HasContext::compile_shader(self, shader);
                self.get_shader_compile_status(shader)
            }
        }

        fn shader_info_log(&self, shader: GlShader) -> String {
            unsafe { self.get_shader_info_log(shader) }
        }

        fn delete_shader(&self, shader: GlShader) {
            unsafe { HasContext::delete_shader(self, shader) }
        }

        fn create_program(&self) -> Result<GlProgram, String> {
            unsafe { HasContext::create_program(self) }
        }

        fn attach_shader(&self, program: GlProgram, shader: GlShader) {
            unsafe { HasContext::attach_shader(self, program, shader) }
        }

        fn link_program(&self, program: GlProgram) -> bool {
            unsafe {
                HasContext::link_program(self, program);
                self.get_program_link_status(program)
            }
        }

        fn program_info_log(&self, program: GlProgram) -> String {
            unsafe { self.get_program_info_log(program) }
        }

        fn delete_program(&self, program: GlProgram) {
            unsafe { HasContext::delete_program(self, program) }
        }

        fn uniform_location(&self, program: GlProgram, name: &str) -> Option<GlUniformLocation> {
            unsafe { self.get_uniform_location(program, name) }
        }

        // GLES 3.0 has no `glProgramUniform*`, so the program stays bound after this call.
        fn set_uniform_1i(&self, program: GlProgram, location: &GlUniformLocation, value: i32) {
            unsafe {
                self.use_program(Some(program));
                self.uniform_1_i32(Some(location), value);
            }
        }

        fn set_uniform_1f(&self, program: GlProgram, location: &GlUniformLocation, value: f32) {
            unsafe {
                self.use_program(Some(program));
                self.uniform_1_f32(Some(location), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_from_suffix() {
        assert_eq!(ShaderStage::from_identifier("cubemap.vert"), ShaderStage::Vertex);
        assert_eq!(ShaderStage::from_identifier("cubemap.frag"), ShaderStage::Fragment);
        assert_eq!(ShaderStage::from_identifier("vert.glsl"), ShaderStage::Fragment);
    }
}
