use const_format::concatcp;
use std::borrow::Cow;

const MAIN_PREFIX: &str = "__MAIN__";

/// Registry name of the client's primary vertex shader body.
pub const MAIN_VERTEX: &str = concatcp!(MAIN_PREFIX, ".vert");
/// Registry name of the client's primary fragment shader body.
pub const MAIN_FRAGMENT: &str = concatcp!(MAIN_PREFIX, ".frag");

/// A named shader fragment as declared by a client, before include expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub name: Cow<'static, str>,
    pub source: Cow<'static, str>,
}

impl ShaderSource {
    pub const fn new_static(name: &'static str, source: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            source: Cow::Borrowed(source),
        }
    }

    pub fn new<S, S2>(name: S, source: S2) -> Self
    where
        S: Into<Cow<'static, str>>,
        S2: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub(crate) fn include_pattern(&self) -> String {
        include_pattern(&self.name)
    }
}

pub(crate) fn include_pattern(name: &str) -> String {
    format!("#include <{name}>")
}

/// A registered, fully include-expanded shader source.
///
/// The text either aliases the static string it was declared with, or is a heap
/// allocation owned by the registry (expanded text, or a copied runtime string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    name: Cow<'static, str>,
    source: Cow<'static, str>,
}

impl SourceEntry {
    pub(crate) fn new(name: Cow<'static, str>, source: Cow<'static, str>) -> Self {
        Self { name, source }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// `true` when the registry owns the text and frees it on teardown.
    pub fn is_owned(&self) -> bool {
        matches!(self.source, Cow::Owned(_))
    }

    /// Shader stage implied by the name: `.vert` is a vertex shader, anything else a fragment shader.
    pub fn is_vertex(&self) -> bool {
        self.name.ends_with(".vert")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names() {
        assert_eq!(MAIN_VERTEX, "__MAIN__.vert");
        assert_eq!(MAIN_FRAGMENT, "__MAIN__.frag");
    }

    #[test]
    fn static_entries_are_not_owned() {
        let entry = SourceEntry::new(Cow::Borrowed("a.glsl"), Cow::Borrowed("void f();"));
        assert!(!entry.is_owned());

        let entry = SourceEntry::new(Cow::Borrowed("a.glsl"), Cow::Owned("void f();".into()));
        assert!(entry.is_owned());
    }

    #[test]
    fn stage_from_suffix() {
        let vert = SourceEntry::new(Cow::Borrowed("t.vert"), Cow::Borrowed("x"));
        let frag = SourceEntry::new(Cow::Borrowed("t.frag"), Cow::Borrowed("x"));
        let other = SourceEntry::new(Cow::Borrowed("common.glsl"), Cow::Borrowed("x"));
        assert!(vert.is_vertex());
        assert!(!frag.is_vertex());
        assert!(!other.is_vertex());
    }

    #[test]
    fn pattern_format() {
        assert_eq!(
            ShaderSource::new_static("b.glsl", "Z").include_pattern(),
            "#include <b.glsl>"
        );
    }
}
