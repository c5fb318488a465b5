pub mod backend;
pub mod cache;
pub mod compiler;
pub(crate) mod error;
pub mod program;

pub use backend::{GpuBackend, ShaderStage};
pub use cache::texture_key;
pub use compiler::construct_shader;
pub use error::ShaderError;
pub use program::Program;
