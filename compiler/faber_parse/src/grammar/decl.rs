//! Declarations: functions, genus, pactum, ordo, discretio, type aliases and imports.

use faber_ir::{
    DiscretioDecl, FieldDecl, FnModifiers, FunctionDecl, GenusDecl, ImportDecl, ImportItem,
    OrdoDecl, OrdoMember, PactumDecl, Param, ReturnVerb, StmtKind, VariantDecl,
};
use faber_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser {
    /// `[futura] [cursor] functio name(params) [ret] { body }`
    ///
    /// With `require_body == false` (pactum members) the body is optional.
    pub(crate) fn parse_function(
        &mut self,
        require_body: bool,
    ) -> Result<FunctionDecl, ParseError> {
        self.in_error_context(ErrorContext::FunctionDef, |p| {
            let start = p.cursor.current_span();
            let mut modifiers = FnModifiers::default();
            loop {
                if p.cursor.eat(&TokenKind::Futura) {
                    modifiers.is_async = true;
                } else if p.cursor.eat(&TokenKind::Cursor) {
                    modifiers.is_generator = true;
                } else {
                    break;
                }
            }
            p.cursor.expect(&TokenKind::Functio)?;
            let name = p.cursor.expect_name()?;
            let params = p.parse_params()?;

            let verb = match p.cursor.current_kind() {
                TokenKind::Fit => Some(ReturnVerb::Fit),
                TokenKind::Fiunt => Some(ReturnVerb::Fiunt),
                TokenKind::Fiet => Some(ReturnVerb::Fiet),
                TokenKind::Fient => Some(ReturnVerb::Fient),
                _ => None,
            };
            let ret = if verb.is_some() || p.cursor.check(&TokenKind::Arrow) {
                p.cursor.advance();
                Some(p.parse_type()?)
            } else {
                None
            };

            let body = if require_body || p.cursor.check(&TokenKind::LBrace) {
                Some(p.parse_block()?)
            } else {
                None
            };
            Ok(FunctionDecl {
                name,
                modifiers,
                params,
                verb,
                ret,
                body,
                span: p.span_from(start),
            })
        })
    }

    /// `(Type a, Type b = d, ...Type rest)`; types are optional.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.in_error_context(ErrorContext::FunctionParams, |p| {
            p.cursor.expect(&TokenKind::LParen)?;
            let mut params = Vec::new();
            while !p.cursor.check(&TokenKind::RParen) {
                let start = p.cursor.current_span();
                let rest = p.cursor.eat(&TokenKind::Ellipsis);
                let ty = if p.starts_typed_binding(&[
                    TokenKind::Comma,
                    TokenKind::RParen,
                    TokenKind::Eq,
                ]) {
                    Some(p.parse_type()?)
                } else {
                    None
                };
                let name = p.cursor.expect_ident()?;
                let default = if p.cursor.eat(&TokenKind::Eq) {
                    Some(p.parse_expr()?)
                } else {
                    None
                };
                params.push(Param {
                    name,
                    ty,
                    default,
                    rest,
                    span: p.span_from(start),
                });
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.cursor.expect(&TokenKind::RParen)?;
            Ok(params)
        })
    }

    /// `Type name [= default]`
    fn parse_field(&mut self) -> Result<FieldDecl, ParseError> {
        let start = self.cursor.current_span();
        let ty = self.parse_type()?;
        let name = self.cursor.expect_name()?;
        let default = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(FieldDecl {
            name,
            ty,
            default,
            span: self.span_from(start),
        })
    }

    /// Whether a genus member starts a method. `cursor<T>` in field
    /// position is a type, not the generator modifier.
    fn at_function_start(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Functio | TokenKind::Futura => true,
            TokenKind::Cursor => self.cursor.peek_kind(1) != &TokenKind::Lt,
            _ => false,
        }
    }

    /// `genus Name [sub Base] [implet I, J] { fields and methods }`
    pub(crate) fn parse_genus(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::GenusDef, |p| {
            p.cursor.expect(&TokenKind::Genus)?;
            let name = p.cursor.expect_ident()?;
            let base = if p.cursor.eat(&TokenKind::Sub) {
                Some(p.cursor.expect_ident()?)
            } else {
                None
            };
            let mut implements = Vec::new();
            if p.cursor.eat(&TokenKind::Implet) {
                implements.push(p.cursor.expect_ident()?);
                while p.cursor.eat(&TokenKind::Comma) {
                    implements.push(p.cursor.expect_ident()?);
                }
            }
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut fields = Vec::new();
            let mut methods = Vec::new();
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                if p.cursor.eat(&TokenKind::Semicolon) || p.cursor.eat(&TokenKind::Comma) {
                    continue;
                }
                if p.at_function_start() {
                    methods.push(p.parse_function(true)?);
                } else {
                    fields.push(p.parse_field()?);
                }
                p.expect_stmt_end()?;
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(StmtKind::Genus(GenusDecl {
                name,
                base,
                implements,
                fields,
                methods,
            }))
        })
    }

    /// `pactum Name { functio m(Type a) -> T }`
    pub(crate) fn parse_pactum(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::PactumDef, |p| {
            p.cursor.expect(&TokenKind::Pactum)?;
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut methods = Vec::new();
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                if p.cursor.eat(&TokenKind::Semicolon) {
                    continue;
                }
                methods.push(p.parse_function(false)?);
                p.expect_stmt_end()?;
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(StmtKind::Pactum(PactumDecl { name, methods }))
        })
    }

    /// `ordo Name { a, b = 2, c = "x" }`
    pub(crate) fn parse_ordo(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::OrdoDef, |p| {
            p.cursor.expect(&TokenKind::Ordo)?;
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut members = Vec::new();
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                let start = p.cursor.current_span();
                let member = p.cursor.expect_name()?;
                let value = if p.cursor.eat(&TokenKind::Eq) {
                    Some(p.parse_expr()?)
                } else {
                    None
                };
                members.push(OrdoMember {
                    name: member,
                    value,
                    span: p.span_from(start),
                });
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(StmtKind::Ordo(OrdoDecl { name, members }))
        })
    }

    /// `discretio Name { Variant { Type f, Type g }, Other }`
    pub(crate) fn parse_discretio(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::DiscretioDef, |p| {
            p.cursor.expect(&TokenKind::Discretio)?;
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut variants = Vec::new();
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                if p.cursor.eat(&TokenKind::Comma) || p.cursor.eat(&TokenKind::Semicolon) {
                    continue;
                }
                let start = p.cursor.current_span();
                let variant = p.cursor.expect_ident()?;
                let mut fields = Vec::new();
                if p.cursor.eat(&TokenKind::LBrace) {
                    while !p.cursor.check(&TokenKind::RBrace) {
                        fields.push(p.parse_field()?);
                        if !p.cursor.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    p.cursor.expect(&TokenKind::RBrace)?;
                }
                variants.push(VariantDecl {
                    name: variant,
                    fields,
                    span: p.span_from(start),
                });
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(StmtKind::Discretio(DiscretioDecl { name, variants }))
        })
    }

    /// `typus Name = Type`
    pub(crate) fn parse_type_alias(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::TypeAlias, |p| {
            p.cursor.expect(&TokenKind::Typus)?;
            let name = p.cursor.expect_ident()?;
            p.cursor.expect(&TokenKind::Eq)?;
            let ty = p.parse_type()?;
            Ok(StmtKind::TypeAlias { name, ty })
        })
    }

    /// `ex "path" importa a, b ut c`
    pub(crate) fn parse_import(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::Import, |p| {
            p.cursor.expect(&TokenKind::Ex)?;
            let path = match p.cursor.advance().kind {
                TokenKind::Str(path) => path,
                _ => return Err(p.cursor.unexpected("a module path string")),
            };
            p.cursor.expect(&TokenKind::Importa)?;
            let mut items = Vec::new();
            loop {
                let name = p.cursor.expect_ident()?;
                let alias = if p.cursor.eat(&TokenKind::Ut) {
                    Some(p.cursor.expect_ident()?)
                } else {
                    None
                };
                items.push(ImportItem { name, alias });
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Ok(StmtKind::Import(ImportDecl { path, items }))
        })
    }
}
