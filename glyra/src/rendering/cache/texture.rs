use crate::rendering::backend::GpuBackend;
use crate::rendering::cache::generic_cache::{Cache, CacheCounters};
use glyra_utils::RollingHash;
use log::{info, trace, warn};

/// Content-hash keyed texture handles, shared between independently loaded assets.
///
/// The cache only remembers handles. Uploading and deleting textures is the job of
/// whoever stored them.
pub struct TextureCache<B: GpuBackend> {
    textures: Cache<u32, B::Texture>,
}

impl<B: GpuBackend> TextureCache<B> {
    pub fn new() -> Self {
        Self {
            textures: Cache::new("Texture"),
        }
    }

    /// Remembers `texture` under `hash`. A hash that is already cached keeps its first handle.
    pub fn store(&mut self, hash: u32, texture: B::Texture) {
        let (stored, inserted) = self.textures.insert(hash, texture);
        if inserted {
            trace!("Storing texture with hash: {hash} {texture:?}");
        } else {
            warn!("Failed to cache texture hash: {hash} id: {texture:?}, already cached as {stored:?}");
        }
    }

    pub fn get(&self, hash: u32) -> Option<B::Texture> {
        let texture = self.textures.lookup(hash).copied();
        if texture.is_none() {
            info!("Couldn't find texture with hash {hash} in cache");
        }
        texture
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn counters(&self) -> CacheCounters {
        self.textures.counters()
    }

    /// Forgets every handle without deleting it. Returns how many were forgotten.
    pub(crate) fn release(&mut self) -> usize {
        self.textures.drain_all()
    }
}

impl<B: GpuBackend> Default for TextureCache<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// The conventional texture key for image `index` of an asset: hash of `"<file>_img_<index>"`.
pub fn texture_key(file: &str, index: u32) -> u32 {
    let mut hash = RollingHash::new();
    hash.write(file).write("_img_").write(&index.to_string());
    hash.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyra_utils::shader_hash;

    #[test]
    fn texture_key_matches_formatted_string() {
        assert_eq!(
            texture_key("DamagedHelmet.glb", 3),
            shader_hash("DamagedHelmet.glb_img_3")
        );
    }

    #[test]
    fn texture_keys_differ_per_index() {
        assert_ne!(texture_key("a.gltf", 0), texture_key("a.gltf", 1));
    }
}
