//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use faber_ir::Span;
use faber_lexer::{Token, TokenKind};

use crate::{ParseError, ParseErrorKind};

/// Cursor over a token list whose last token is always `Eof`.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end in Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Kind of the token `n` positions ahead (0 is the current token).
    pub fn peek_kind(&self, n: usize) -> &TokenKind {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    /// Whether a newline precedes the token `n` positions ahead.
    pub fn peek_newline_before(&self, n: usize) -> bool {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[idx].newline_before
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Whether a newline separates the current token from the previous one.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.current().newline_before
    }

    /// Consume and return the current token. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with "expected `what`".
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&kind.display_name()))
        }
    }

    /// Consume an identifier.
    pub fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Consume an identifier or a keyword used as a name (property names,
    /// object keys, type names such as `nihil` and `cursor`).
    pub fn expect_name(&mut self) -> Result<String, ParseError> {
        if let Some(kw) = self.current_kind().keyword_text() {
            self.advance();
            return Ok(kw.to_string());
        }
        self.expect_ident()
    }

    /// Build an "expected X, found Y" error at the current token.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_kind().display_name(),
            },
            self.current_span(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(src: &str) -> Cursor {
        Cursor::new(faber_lexer::lex(src).unwrap_or_else(|e| panic!("lex failed: {e}")))
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut c = cursor("a");
        c.advance();
        assert!(c.is_at_end());
        c.advance();
        assert!(c.is_at_end());
    }

    #[test]
    fn peek_is_clamped() {
        let c = cursor("a b");
        assert_eq!(c.peek_kind(1), &TokenKind::Ident("b".into()));
        assert_eq!(c.peek_kind(10), &TokenKind::Eof);
    }

    #[test]
    fn keywords_are_names() {
        let mut c = cursor("nihil x");
        assert_eq!(c.expect_name().ok().as_deref(), Some("nihil"));
        assert!(c.expect_name().is_ok());
    }

    #[test]
    fn expect_reports_found_token() {
        let mut c = cursor("42");
        let err = c.expect(&TokenKind::LParen).err();
        assert!(err.is_some_and(|e| e.to_string().contains("integer `42`")));
    }
}
