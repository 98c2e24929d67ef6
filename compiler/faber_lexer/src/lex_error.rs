//! Lexer error types.

use faber_ir::Span;

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated template literal")]
    UnterminatedTemplate,
    #[error("invalid escape `\\{0}` in string literal")]
    InvalidEscape(char),
    #[error("integer literal does not fit in 64 bits")]
    IntOverflow,
    #[error("malformed float literal")]
    InvalidFloat,
    #[error("source file exceeds 4GiB")]
    SourceTooLarge,
}

/// A lexer error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    /// A fix the user can apply, where one is obvious.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.kind {
            LexErrorKind::UnterminatedString => Some("add a closing `\"` on the same line"),
            LexErrorKind::UnterminatedTemplate => Some("add a closing backtick"),
            LexErrorKind::InvalidEscape(_) => {
                Some("valid escapes are `\\n`, `\\t`, `\\r`, `\\0`, `\\\"` and `\\\\`")
            }
            LexErrorKind::IntOverflow => Some("use a `fractus` literal or `magnus` arithmetic"),
            _ => None,
        }
    }
}
