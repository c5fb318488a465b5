#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
//! Shader compilation and caching for OpenGL ES rendering backends.
//!
//! Named GLSL sources are registered once with their `#include`s expanded. Variants
//! are selected by identifier plus a set of `#define`s, compiled at most once per
//! permutation hash, and linked into programs at most once per
//! `(vertex hash, fragment hash)` pair. A texture cache lets independently loaded
//! assets share uploads by content hash.

pub mod assets;
pub mod manager;
pub mod rendering;

pub use assets::*;
pub use manager::{CacheStats, ShaderManager, ShaderManagerDesc, TeardownReport};
pub use rendering::*;

pub use ::glyra_utils::{PermutationHasher, shader_hash};
pub use ::log;

#[cfg(feature = "glow")]
pub use ::glow;
