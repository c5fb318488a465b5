//! Named shader sources with `#include <name>` expansion.
//!
//! Every source handed to [`SourceRegistry::register`] is expanded against all other
//! registered sources before it becomes visible. Expansion is plain substring
//! substitution of the marker `#include <name>`; there is no tokenizer. Includes are
//! resolved repeatedly until the text stops changing (bounded by the number of
//! sources), so chained includes work in any declaration order.
//!
//! A marker that is still present afterwards means the shader manifest references a
//! source that does not exist. That is a bug in the caller and the registry refuses
//! to continue.

use crate::assets::source::{MAIN_FRAGMENT, MAIN_VERTEX, ShaderSource, SourceEntry, include_pattern};
use log::{error, trace, warn};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

const INCLUDE_TOKEN: &str = "#include";

#[derive(Debug, Default)]
pub struct SourceRegistry {
    entries: HashMap<String, SourceEntry>,
}

impl SourceRegistry {
    /// Expands and registers `sources`, plus the optional primary shader bodies under
    /// [`MAIN_VERTEX`] and [`MAIN_FRAGMENT`].
    ///
    /// # Panics
    ///
    /// Panics if any `#include` remains in a source after expansion.
    pub fn register(
        sources: &[ShaderSource],
        main_vertex: Option<Cow<'static, str>>,
        main_fragment: Option<Cow<'static, str>>,
    ) -> Self {
        let mut registry = SourceRegistry {
            entries: HashMap::with_capacity(sources.len() + 2),
        };

        let candidates = IncludeCandidates::new(sources);

        for (i, source) in sources.iter().enumerate() {
            if source.source.is_empty() {
                warn!("[Source Registry] Shader {} at index {i} is empty", source.name);
                continue;
            }
            let expanded = candidates.expand(&source.name, source.source.clone());
            registry.insert(source.name.clone(), expanded);
        }

        for (name, main) in [(MAIN_VERTEX, main_vertex), (MAIN_FRAGMENT, main_fragment)] {
            let Some(main) = main else {
                continue;
            };
            let expanded = candidates.expand(name, main);
            registry.insert(Cow::Borrowed(name), expanded);
        }

        trace!(
            "[Source Registry] Registered {} sources ({} owned)",
            registry.len(),
            registry.owned_count()
        );

        registry
    }

    fn insert(&mut self, name: Cow<'static, str>, source: Cow<'static, str>) {
        let key = name.to_string();
        if self.entries.contains_key(&key) {
            warn!("[Source Registry] Shader source {key} was registered twice, keeping the last one");
        }
        self.entries.insert(key, SourceEntry::new(name, source));
    }

    pub fn find(&self, name: &str) -> Option<&SourceEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.values()
    }

    /// Number of entries whose text is owned by the registry.
    pub fn owned_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_owned()).count()
    }

    /// Drops every entry, returning how many owned texts were freed.
    pub(crate) fn release(&mut self) -> usize {
        let owned = self.owned_count();
        self.entries.clear();
        owned
    }
}

struct IncludeCandidate<'a> {
    name: &'a str,
    pattern: String,
    source: &'a str,
}

struct IncludeCandidates<'a> {
    candidates: Vec<IncludeCandidate<'a>>,
}

impl<'a> IncludeCandidates<'a> {
    fn new(sources: &'a [ShaderSource]) -> Self {
        let candidates = sources
            .iter()
            .filter(|s| !s.name.is_empty() && !s.source.is_empty())
            .map(|s| IncludeCandidate {
                name: &s.name,
                pattern: s.include_pattern(),
                source: &s.source,
            })
            .collect();

        Self { candidates }
    }

    /// Resolves every include in `source` to a fixed point.
    ///
    /// Each name is spliced in at most once; later markers for an already included
    /// name (and markers naming the source itself) are blanked with spaces.
    fn expand(&self, name: &str, source: Cow<'static, str>) -> Cow<'static, str> {
        let mut text = source;
        let mut included: HashSet<&str> = HashSet::new();
        included.insert(name);

        if text.contains(&include_pattern(name)) {
            warn!("[Source Registry] Shader {name} includes itself, ignoring the include");
            text = Cow::Owned(blank_pattern(text.into_owned(), &include_pattern(name)));
        }

        // each pass splices at least one new name, so `len + 1` passes always reach the fixed point
        for _ in 0..=self.candidates.len() {
            let mut changed = false;

            for candidate in &self.candidates {
                if !text.contains(&candidate.pattern) {
                    continue;
                }

                changed = true;
                if included.contains(candidate.name) {
                    text = Cow::Owned(blank_pattern(text.into_owned(), &candidate.pattern));
                    continue;
                }

                trace!("[Source Registry] Replacing {} in {name}", candidate.pattern);
                text = Cow::Owned(replace_include(&text, &candidate.pattern, candidate.source));
                included.insert(candidate.name);
            }

            if !changed {
                break;
            }
        }

        if text.contains(INCLUDE_TOKEN) {
            error!("Couldn't replace every include in shader {name}. Last result:\n{text}");
            panic!("Refusing to continue execution with incorrect shaders: unresolved include in {name}");
        }

        text
    }
}

/// Replaces the first occurrence of `pattern` with `replacement` and blanks every
/// other occurrence with spaces of the same length.
fn replace_include(source: &str, pattern: &str, replacement: &str) -> String {
    let Some(pos) = source.find(pattern) else {
        return source.to_owned();
    };

    let mut result = String::with_capacity(source.len() - pattern.len() + replacement.len());
    result.push_str(&source[..pos]);
    result.push_str(replacement);
    result.push_str(&source[pos + pattern.len()..]);

    blank_pattern(result, pattern)
}

fn blank_pattern(source: String, pattern: &str) -> String {
    if !source.contains(pattern) {
        return source;
    }
    source.replace(pattern, &" ".repeat(pattern.len()))
}

/// Expands newline-prefixed `#include <name>` markers in a standalone shader body.
///
/// Unlike registration this does a single substitution pass per include, in the order
/// given, replacing every occurrence including the preceding newline. It is used to
/// assemble primary shader bodies before they are handed to the manager.
pub fn process_includes(source: &str, includes: &[ShaderSource]) -> String {
    let mut result = source.to_owned();

    for include in includes {
        if include.name.is_empty() {
            continue;
        }
        let pattern = format!("\n{}", include.include_pattern());
        if result.contains(&pattern) {
            result = result.replace(&pattern, &include.source);
        }
    }

    result
}
