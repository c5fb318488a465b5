use glyra_utils::PermutationHasher;
use itertools::Itertools;
use log::trace;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// A single preprocessor define of a shader permutation, emitted as
/// `#define NAME[ VALUE]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationDefine {
    pub name: Cow<'static, str>,
    pub value: Option<Cow<'static, str>>,
}

impl PermutationDefine {
    pub fn new<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value<S, V>(name: S, value: V) -> Self
    where
        S: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Display for PermutationDefine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{} {value}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Computes the cache key of a shader variant: the identifier hash XORed with the hash
/// of every `name ++ value` pair.
///
/// Defines with an empty name are never emitted into the shader text, so they do not
/// contribute to the key either.
pub fn permutation_hash(identifier: &str, defines: &[PermutationDefine]) -> u32 {
    let mut hasher = PermutationHasher::new(identifier);
    for define in defines.iter().filter(|d| !d.name().is_empty()) {
        hasher.define(define.name(), define.value());
    }
    hasher.finish()
}

/// An ordered list of defines where each name appears at most once.
///
/// Renderers collect the features a draw needs (vertex attributes, material maps,
/// tone-mapping mode) into a set and pass it to `select`. Adding a name twice keeps
/// the first value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefineSet {
    defines: SmallVec<[PermutationDefine; 8]>,
}

impl DefineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when a define with the same name was already present.
    pub fn add(&mut self, define: PermutationDefine) -> bool {
        if self.contains(define.name()) {
            trace!("Define {} already present, keeping the first one", define.name);
            return false;
        }
        self.defines.push(define);
        true
    }

    pub fn flag<S: Into<Cow<'static, str>>>(&mut self, name: S) -> &mut Self {
        self.add(PermutationDefine::new(name));
        self
    }

    pub fn value<S, V>(&mut self, name: S, value: V) -> &mut Self
    where
        S: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        self.add(PermutationDefine::with_value(name, value));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defines.iter().any(|d| d.name() == name)
    }

    pub fn as_slice(&self) -> &[PermutationDefine] {
        &self.defines
    }

    pub fn clear(&mut self) {
        self.defines.clear();
    }
}

impl Deref for DefineSet {
    type Target = [PermutationDefine];

    fn deref(&self) -> &Self::Target {
        &self.defines
    }
}

impl FromIterator<PermutationDefine> for DefineSet {
    fn from_iter<T: IntoIterator<Item = PermutationDefine>>(iter: T) -> Self {
        let mut set = DefineSet::new();
        for define in iter {
            set.add(define);
        }
        set
    }
}

impl Display for DefineSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.defines.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyra_utils::shader_hash;

    #[test]
    fn duplicate_names_keep_first_value() {
        let mut set = DefineSet::new();
        assert!(set.add(PermutationDefine::with_value("LIGHT_COUNT", "4")));
        assert!(!set.add(PermutationDefine::with_value("LIGHT_COUNT", "8")));

        assert_eq!(set.len(), 1);
        assert_eq!(set[0].value(), Some("4"));
    }

    #[test]
    fn permutation_hash_ignores_order() {
        let a = PermutationDefine::with_value("FOO", "1");
        let b = PermutationDefine::new("USE_SKINNING");

        assert_eq!(
            permutation_hash("t.frag", &[a.clone(), b.clone()]),
            permutation_hash("t.frag", &[b, a])
        );
    }

    #[test]
    fn permutation_hash_without_defines() {
        assert_eq!(permutation_hash("t.vert", &[]), shader_hash("t.vert"));
    }

    #[test]
    fn empty_names_do_not_alias_real_defines() {
        let nameless = [PermutationDefine::with_value("", "FOO")];
        let foo = [PermutationDefine::new("FOO")];

        assert_eq!(permutation_hash("t.frag", &nameless), permutation_hash("t.frag", &[]));
        assert_ne!(permutation_hash("t.frag", &nameless), permutation_hash("t.frag", &foo));
    }

    #[test]
    fn display_lists_defines() {
        let set: DefineSet = [
            PermutationDefine::new("HAS_NORMAL_VEC3"),
            PermutationDefine::with_value("ALPHAMODE", "ALPHAMODE_OPAQUE"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.to_string(), "[HAS_NORMAL_VEC3, ALPHAMODE ALPHAMODE_OPAQUE]");
    }
}
