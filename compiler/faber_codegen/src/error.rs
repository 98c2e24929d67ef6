//! Lowering errors.
//!
//! Both kinds are compile failures. `Unsupported` names a construct with no
//! faithful translation in the selected target; `Misplaced` is a node that
//! is valid syntax but cannot be lowered where it appears.

use faber_ir::Span;

use crate::Target;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("{construct} is not supported when targeting {target}{}", suggestion_suffix(.suggestion.as_deref()))]
    Unsupported {
        construct: String,
        target: Target,
        suggestion: Option<String>,
        span: Span,
    },
    #[error("`{kind}` cannot appear {context}")]
    Misplaced {
        kind: &'static str,
        context: &'static str,
        span: Span,
    },
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    suggestion.map(|s| format!("; {s}")).unwrap_or_default()
}

impl CodegenError {
    pub fn unsupported(construct: impl Into<String>, target: Target, span: Span) -> Self {
        CodegenError::Unsupported {
            construct: construct.into(),
            target,
            suggestion: None,
            span,
        }
    }

    /// Attach a suggested alternative source construct.
    #[must_use]
    pub fn suggest(self, alternative: impl Into<String>) -> Self {
        match self {
            CodegenError::Unsupported {
                construct,
                target,
                span,
                ..
            } => CodegenError::Unsupported {
                construct,
                target,
                suggestion: Some(alternative.into()),
                span,
            },
            other => other,
        }
    }

    pub const fn misplaced(kind: &'static str, context: &'static str, span: Span) -> Self {
        CodegenError::Misplaced {
            kind,
            context,
            span,
        }
    }

    pub const fn span(&self) -> Span {
        match self {
            CodegenError::Unsupported { span, .. } | CodegenError::Misplaced { span, .. } => *span,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            CodegenError::Unsupported { suggestion, .. } => suggestion.as_deref(),
            CodegenError::Misplaced { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_suggestion() {
        let err = CodegenError::unsupported("string concatenation", Target::Zig, Span::DUMMY)
            .suggest("use `scriptum`");
        assert_eq!(
            err.to_string(),
            "string concatenation is not supported when targeting Zig; use `scriptum`"
        );
        assert_eq!(err.suggestion(), Some("use `scriptum`"));
    }

    #[test]
    fn misplaced_message() {
        let err = CodegenError::misplaced("Spread", "outside an argument list", Span::new(3, 6));
        assert_eq!(err.to_string(), "`Spread` cannot appear outside an argument list");
        assert_eq!(err.span(), Span::new(3, 6));
    }
}
