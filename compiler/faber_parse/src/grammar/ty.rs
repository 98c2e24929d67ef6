//! Type annotations: `Name`, `Name<T, U>`, `T?`, `(A, B) -> R`.

use faber_ir::TypeAnnotation;
use faber_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser {
    pub(crate) fn parse_type(&mut self) -> Result<TypeAnnotation, ParseError> {
        self.in_error_context(ErrorContext::TypeAnnotation, |p| {
            p.nested(Self::parse_type_inner)
        })
    }

    fn parse_type_inner(&mut self) -> Result<TypeAnnotation, ParseError> {
        if self.cursor.eat(&TokenKind::LParen) {
            let mut params = Vec::new();
            if !self.cursor.check(&TokenKind::RParen) {
                loop {
                    params.push(self.parse_type()?);
                    if !self.cursor.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.cursor.expect(&TokenKind::RParen)?;
            self.cursor.expect(&TokenKind::Arrow)?;
            let ret = self.parse_type()?;
            return Ok(TypeAnnotation::Function {
                params,
                ret: Box::new(ret),
            });
        }

        let name = self.cursor.expect_name()?;
        let mut args = Vec::new();
        if self.cursor.eat(&TokenKind::Lt) {
            loop {
                args.push(self.parse_type()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::Gt)?;
        }
        let mut ty = TypeAnnotation::Named { name, args };
        while self.cursor.eat(&TokenKind::Question) {
            ty = TypeAnnotation::Nullable(Box::new(ty));
        }
        Ok(ty)
    }

    /// Whether the tokens at the cursor start a `Type name` pair rather than a
    /// bare name. A bare name is an identifier followed by one of `follow`.
    pub(crate) fn starts_typed_binding(&self, follow: &[TokenKind]) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Ident(_) => {
                let next = self.cursor.peek_kind(1);
                !(follow.contains(next) || self.next_is_line_break())
            }
            TokenKind::LParen | TokenKind::Nihil | TokenKind::Cursor => true,
            _ => false,
        }
    }

    fn next_is_line_break(&self) -> bool {
        // A name at the end of its line, as in `varia x` with no initializer.
        matches!(
            self.cursor.peek_kind(1),
            TokenKind::Eof | TokenKind::Semicolon | TokenKind::RBrace
        ) || self.cursor.peek_newline_before(1)
    }
}
