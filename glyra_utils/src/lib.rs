/// Polynomial rolling hash (`h = h * 31 + byte`) used as the key of every shader cache.
///
/// The empty string hashes to `0`.
pub const fn shader_hash(value: &str) -> u32 {
    let bytes = value.as_bytes();
    let mut hash: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(bytes[i] as u32);
        i += 1;
    }
    hash
}

/// Incremental form of [`shader_hash`] for keys that are built from several pieces
/// without concatenating them first.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RollingHash(u32);

impl RollingHash {
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn write(&mut self, value: &str) -> &mut Self {
        for byte in value.bytes() {
            self.0 = (self.0 << 5).wrapping_sub(self.0).wrapping_add(u32::from(byte));
        }
        self
    }

    pub const fn finish(&self) -> u32 {
        self.0
    }
}

/// Accumulates the permutation key of a shader variant.
///
/// Seeded with the hash of the shader identifier; every define contributes
/// `shader_hash(name ++ value)` through XOR, so the result does not depend on the
/// order in which defines are fed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PermutationHasher {
    acc: u32,
}

impl PermutationHasher {
    pub fn new(identifier: &str) -> Self {
        Self {
            acc: shader_hash(identifier),
        }
    }

    pub fn define(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        let mut hash = RollingHash::new();
        hash.write(name);
        if let Some(value) = value {
            hash.write(value);
        }
        self.acc ^= hash.finish();
        self
    }

    pub const fn finish(&self) -> u32 {
        self.acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_hashes_to_zero() {
        assert_eq!(shader_hash(""), 0);
        assert_eq!(RollingHash::new().write("").finish(), 0);
    }

    #[test]
    fn hash_is_deterministic() {
        for s in ["a", "cubemap.frag", "__MAIN__.vert", "model.gltf_img_3"] {
            assert_eq!(shader_hash(s), shader_hash(s));
        }
    }

    #[test]
    fn hash_matches_polynomial() {
        // 'a' = 97, 'b' = 98 -> 97 * 31 + 98
        assert_eq!(shader_hash("a"), 97);
        assert_eq!(shader_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn hash_wraps_instead_of_overflowing() {
        let long = "z".repeat(4096);
        let _ = shader_hash(&long);
    }

    #[test]
    fn rolling_hash_matches_concatenation() {
        let mut hash = RollingHash::new();
        hash.write("TONEMAP_").write("KHR_PBR_NEUTRAL");
        assert_eq!(hash.finish(), shader_hash("TONEMAP_KHR_PBR_NEUTRAL"));
    }

    #[test]
    fn permutation_without_defines_is_identifier_hash() {
        assert_eq!(
            PermutationHasher::new("t.vert").finish(),
            shader_hash("t.vert")
        );
    }

    #[test]
    fn permutation_is_order_independent() {
        let mut ab = PermutationHasher::new("pbr.frag");
        ab.define("HAS_NORMALS", None).define("LIGHT_COUNT", Some("4"));

        let mut ba = PermutationHasher::new("pbr.frag");
        ba.define("LIGHT_COUNT", Some("4")).define("HAS_NORMALS", None);

        assert_eq!(ab.finish(), ba.finish());
    }

    #[test]
    fn define_value_is_appended_to_name() {
        let mut hasher = PermutationHasher::new("x");
        hasher.define("FOO", Some("1"));
        assert_eq!(hasher.finish(), shader_hash("x") ^ shader_hash("FOO1"));
    }
}
