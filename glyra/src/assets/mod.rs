//! Shader sources as declared by clients: names, include expansion, defines and
//! target language versions.

pub mod define;
pub mod registry;
pub mod source;
pub mod version;

pub use define::{DefineSet, PermutationDefine, permutation_hash};
pub use registry::{SourceRegistry, process_includes};
pub use source::{MAIN_FRAGMENT, MAIN_VERTEX, ShaderSource, SourceEntry};
pub use version::GlslVersion;
