//! Parse error types.
//!
//! - `ParseErrorKind` says what went wrong
//! - `ErrorContext` says what the parser was doing ("while parsing a for loop")
//! - `ParseError` ties both to a span

use std::fmt;

use faber_ir::Span;
use faber_lexer::LexError;

/// Context describing what was being parsed when an error occurred.
///
/// ```ignore
/// self.in_error_context(ErrorContext::IfStatement, |p| p.parse_if_inner())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    // === Declarations ===
    VarDecl,
    FunctionDef,
    FunctionParams,
    GenusDef,
    PactumDef,
    OrdoDef,
    DiscretioDef,
    TypeAlias,
    Import,

    // === Statements ===
    IfStatement,
    WhileLoop,
    ForLoop,
    Discerne,
    Elige,
    TryStatement,
    Block,

    // === Expressions ===
    Lambda,
    FunctionCall,
    ArrayLiteral,
    ObjectLiteral,
    NewExpression,
    IndexExpression,

    // === Types ===
    TypeAnnotation,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::VarDecl => "a variable declaration",
            Self::FunctionDef => "a function definition",
            Self::FunctionParams => "function parameters",
            Self::GenusDef => "a genus definition",
            Self::PactumDef => "a pactum definition",
            Self::OrdoDef => "an ordo definition",
            Self::DiscretioDef => "a discretio definition",
            Self::TypeAlias => "a type alias",
            Self::Import => "an import",
            Self::IfStatement => "an if statement",
            Self::WhileLoop => "a while loop",
            Self::ForLoop => "a for loop",
            Self::Discerne => "a discerne statement",
            Self::Elige => "an elige statement",
            Self::TryStatement => "a tempta statement",
            Self::Block => "a block",
            Self::Lambda => "a lambda",
            Self::FunctionCall => "a function call",
            Self::ArrayLiteral => "an array literal",
            Self::ObjectLiteral => "an object literal",
            Self::NewExpression => "a novum expression",
            Self::IndexExpression => "an index expression",
            Self::TypeAnnotation => "a type annotation",
        }
    }
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected end of statement, found {found}")]
    ExpectedStatementEnd { found: String },
    #[error("invalid assignment target")]
    InvalidAssignTarget,
    #[error("spread `...` is only allowed in argument lists, array and object literals")]
    MisplacedSpread,
    #[error("nesting exceeds {0} levels")]
    TooDeep(usize),
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// A parse error with location and optional context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach context unless a more specific one is already present.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
        }
        self
    }

    /// A fix the user can apply, where one is obvious.
    pub fn hint(&self) -> Option<&'static str> {
        match &self.kind {
            ParseErrorKind::Lex(lex) => lex.suggestion(),
            ParseErrorKind::InvalidAssignTarget => {
                Some("only names, fields and indexed elements can be assigned")
            }
            ParseErrorKind::ExpectedStatementEnd { .. } => {
                Some("put each statement on its own line or separate them with `;`")
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(context) = self.context {
            write!(f, " while parsing {}", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Lex(lex) => Some(lex),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let span = err.span;
        ParseError::new(ParseErrorKind::Lex(err), span)
    }
}
