#![allow(dead_code)]

use glyra::{GpuBackend, ShaderStage};
use std::cell::{Cell, RefCell};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A GPU backend that hands out sequential ids and records every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: Cell<u32>,

    pub created_shaders: RefCell<Vec<(u32, ShaderStage)>>,
    pub compiled_sources: RefCell<Vec<String>>,
    pub deleted_shaders: RefCell<Vec<u32>>,

    pub created_programs: RefCell<Vec<u32>>,
    pub attachments: RefCell<Vec<(u32, u32)>>,
    pub links: Cell<usize>,
    pub deleted_programs: RefCell<Vec<u32>>,

    pub int_uniforms: RefCell<Vec<(u32, String, i32)>>,
    pub float_uniforms: RefCell<Vec<(u32, String, f32)>>,

    /// Compiles fail while the source contains this text.
    pub fail_compile_on: RefCell<Option<String>>,
    pub fail_link: Cell<bool>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub fn compiles(&self) -> usize {
        self.compiled_sources.borrow().len()
    }

    pub fn texture(&self) -> u32 {
        self.next()
    }
}

impl GpuBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type Texture = u32;
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.next();
        self.created_shaders.borrow_mut().push((id, stage));
        Ok(id)
    }

    fn compile_shader(&self, _shader: u32, source: &str) -> bool {
        self.compiled_sources.borrow_mut().push(source.to_owned());
        match self.fail_compile_on.borrow().as_deref() {
            Some(marker) => !source.contains(marker),
            None => true,
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        format!("0:1: error: shader {shader} is broken")
    }

    fn delete_shader(&self, shader: u32) {
        self.deleted_shaders.borrow_mut().push(shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.next();
        self.created_programs.borrow_mut().push(id);
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attachments.borrow_mut().push((program, shader));
    }

    fn link_program(&self, _program: u32) -> bool {
        self.links.set(self.links.get() + 1);
        !self.fail_link.get()
    }

    fn program_info_log(&self, program: u32) -> String {
        format!("error: program {program} failed to link")
    }

    fn delete_program(&self, program: u32) {
        self.deleted_programs.borrow_mut().push(program);
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        name.starts_with("u_").then(|| name.to_owned())
    }

    fn set_uniform_1i(&self, program: u32, location: &String, value: i32) {
        self.int_uniforms
            .borrow_mut()
            .push((program, location.clone(), value));
    }

    fn set_uniform_1f(&self, program: u32, location: &String, value: f32) {
        self.float_uniforms
            .borrow_mut()
            .push((program, location.clone(), value));
    }
}
