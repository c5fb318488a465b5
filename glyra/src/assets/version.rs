use std::fmt::{Display, Formatter};

/// Shading language versions the OpenGL ES backends can target.
///
/// Every variant maps to a literal `#version` pragma. Adding a version means adding
/// its pragma to [`GlslVersion::pragma`]; nothing is derived.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GlslVersion {
    /// GLSL ES 1.00 (OpenGL ES 2.0)
    Glsl100,
    /// GLSL ES 3.00 (OpenGL ES 3.0)
    #[default]
    Glsl300Es,
}

impl GlslVersion {
    pub const ALL: [GlslVersion; 2] = [GlslVersion::Glsl100, GlslVersion::Glsl300Es];

    pub const fn pragma(self) -> &'static str {
        match self {
            GlslVersion::Glsl100 => "#version 100\n",
            GlslVersion::Glsl300Es => "#version 300 es\n",
        }
    }
}

impl Display for GlslVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GlslVersion::Glsl100 => write!(f, "GLSL 100"),
            GlslVersion::Glsl300Es => write!(f, "GLSL 300 ES"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pragmas_are_newline_terminated_version_lines() {
        for version in GlslVersion::ALL {
            let pragma = version.pragma();
            assert!(pragma.starts_with("#version "));
            assert!(pragma.ends_with('\n'));
            assert_eq!(pragma.matches('\n').count(), 1);
        }
    }

    #[test]
    fn pragma_literals() {
        assert_eq!(GlslVersion::Glsl100.pragma(), "#version 100\n");
        assert_eq!(GlslVersion::Glsl300Es.pragma(), "#version 300 es\n");
        assert_eq!(GlslVersion::Glsl300Es.to_string(), "GLSL 300 ES");
    }
}
