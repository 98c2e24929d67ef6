//! Target selection and output options.

use std::fmt;
use std::str::FromStr;

/// Output language of a lowering run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    TypeScript,
    Python,
    Zig,
    /// Canonical Faber source, printed by `faber_fmt`.
    Faber,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::TypeScript, Target::Python, Target::Zig, Target::Faber];

    /// Short name accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Target::TypeScript => "ts",
            Target::Python => "py",
            Target::Zig => "zig",
            Target::Faber => "fab",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Target::TypeScript => "TypeScript",
            Target::Python => "Python",
            Target::Zig => "Zig",
            Target::Faber => "Faber",
        }
    }

    /// File extension for generated output.
    pub const fn extension(self) -> &'static str {
        match self {
            Target::TypeScript => "ts",
            Target::Python => "py",
            Target::Zig => "zig",
            Target::Faber => "fab",
        }
    }

    /// Whether statements end in `;` unless configured otherwise.
    pub const fn default_semicolons(self) -> bool {
        matches!(self, Target::TypeScript | Target::Zig)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Errors from option parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("unknown target `{0}` (expected one of: ts, py, zig, fab)")]
    UnknownTarget(String),
    #[error("target `{0}` is not supported by this compiler; use ts, py or zig")]
    UnsupportedTarget(String),
    #[error("invalid indent `{0}` (expected a number of spaces or `tab`)")]
    InvalidIndent(String),
}

impl FromStr for Target {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ts" | "typescript" => Ok(Target::TypeScript),
            "py" | "python" => Ok(Target::Python),
            "zig" => Ok(Target::Zig),
            "fab" | "faber" => Ok(Target::Faber),
            "cpp" | "c++" | "lua" => Err(OptionsError::UnsupportedTarget(s.to_string())),
            _ => Err(OptionsError::UnknownTarget(s.to_string())),
        }
    }
}

/// Parse an indent setting: a space count (`2`, `4`) or `tab`.
pub fn parse_indent(s: &str) -> Result<String, OptionsError> {
    if s.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    match s.parse::<usize>() {
        Ok(n) if (1..=16).contains(&n) => Ok(" ".repeat(n)),
        _ => Err(OptionsError::InvalidIndent(s.to_string())),
    }
}

/// Options for one lowering run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenOptions {
    pub target: Target,
    /// One level of indentation.
    pub indent: String,
    /// Statement terminators where the target treats them as optional.
    pub semicolons: bool,
}

impl CodegenOptions {
    pub fn new(target: Target) -> Self {
        CodegenOptions {
            target,
            indent: "    ".to_string(),
            semicolons: target.default_semicolons(),
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[must_use]
    pub fn with_semicolons(mut self, semicolons: bool) -> Self {
        self.semicolons = semicolons;
        self
    }
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions::new(Target::TypeScript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_targets() {
        assert_eq!("ts".parse(), Ok(Target::TypeScript));
        assert_eq!("Python".parse(), Ok(Target::Python));
        assert_eq!("fab".parse(), Ok(Target::Faber));
    }

    #[test]
    fn rejects_unbuilt_backends() {
        assert_eq!(
            "cpp".parse::<Target>(),
            Err(OptionsError::UnsupportedTarget("cpp".into()))
        );
        assert!(matches!(
            "lua".parse::<Target>(),
            Err(OptionsError::UnsupportedTarget(_))
        ));
        assert!(matches!(
            "cobol".parse::<Target>(),
            Err(OptionsError::UnknownTarget(_))
        ));
    }

    #[test]
    fn indent_settings() {
        assert_eq!(parse_indent("2"), Ok("  ".to_string()));
        assert_eq!(parse_indent("tab"), Ok("\t".to_string()));
        assert!(parse_indent("0").is_err());
        assert!(parse_indent("wide").is_err());
    }

    #[test]
    fn python_defaults_to_no_semicolons() {
        assert!(!CodegenOptions::new(Target::Python).semicolons);
        assert!(CodegenOptions::new(Target::TypeScript).semicolons);
    }
}
