//! Recursive descent parser for Faber.
//!
//! Produces an untyped [`Program`]: every `Expr::ty` is `None` until the
//! analyzer runs. Newlines are significant only through `Token::newline_before`:
//! they end statements, and a `(` or `[` at the start of a line begins a new
//! expression rather than a call or index.
//!
//! # Module Structure
//!
//! - `cursor.rs`: token access and lookahead
//! - `error.rs`: `ParseError`, `ErrorContext`
//! - `grammar/stmt.rs`: statements and blocks
//! - `grammar/decl.rs`: declarations (functio, genus, pactum, ordo, discretio, imports)
//! - `grammar/expr.rs`: precedence chain, postfix, primary expressions
//! - `grammar/ty.rs`: type annotations

mod cursor;
mod error;
mod grammar;

use faber_ir::{Program, Span};
use faber_lexer::{Token, TokenKind};
use faber_stack::MAX_NESTING_DEPTH;
use tracing::instrument;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

/// Lex and parse `source`.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = faber_lexer::lex(source)?;
    parse_tokens(tokens)
}

/// Parse an already-lexed token stream (must end in `Eof`).
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;
    tracing::debug!(statements = program.body.len(), "parsed program");
    Ok(program)
}

/// Parser state: the cursor plus the current nesting depth.
pub struct Parser {
    cursor: Cursor,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            depth: 0,
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Semicolon) {
                continue;
            }
            body.push(self.parse_stmt()?);
            self.expect_stmt_end()?;
        }
        Ok(Program {
            body,
            span: Span::new(0, self.cursor.current_span().end),
        })
    }

    /// Run `f`, labelling any error it returns with `context`.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|e| e.with_context(context))
    }

    /// Run `f` one nesting level deeper, failing past `MAX_NESTING_DEPTH`.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::TooDeep(MAX_NESTING_DEPTH),
                self.cursor.current_span(),
            ));
        }
        self.depth += 1;
        let result = faber_stack::ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    /// Whether the current token cannot continue the current statement.
    fn at_stmt_end(&self) -> bool {
        self.cursor.at_line_start()
            || matches!(
                self.cursor.current_kind(),
                TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
            )
    }

    fn expect_stmt_end(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(&TokenKind::Semicolon) || self.at_stmt_end() {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedStatementEnd {
                    found: self.cursor.current_kind().display_name(),
                },
                self.cursor.current_span(),
            ))
        }
    }
}

#[cfg(test)]
mod tests;
