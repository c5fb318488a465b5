mod generic_cache;

mod program;
mod shader;
mod texture;

pub use self::generic_cache::{Cache, CacheCounters};
pub use self::program::*;
pub use self::shader::*;
pub use self::texture::*;

pub(crate) use self::program::link;
