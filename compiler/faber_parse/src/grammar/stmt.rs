//! Statements and blocks.

use faber_ir::{
    Block, CaseBinding, CatchClause, DiscerneCase, DiscerneStmt, EligeCase, EligeStmt, IfBranch,
    IfStmt, ScribeLevel, Stmt, StmtKind, TryStmt, VarDecl,
};
use faber_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser {
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_stmt_inner)
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Fixum | TokenKind::Varia => self.parse_var_decl()?,
            TokenKind::Functio | TokenKind::Futura | TokenKind::Cursor => {
                StmtKind::Function(self.parse_function(true)?)
            }
            TokenKind::Genus => self.parse_genus()?,
            TokenKind::Pactum => self.parse_pactum()?,
            TokenKind::Ordo => self.parse_ordo()?,
            TokenKind::Discretio => self.parse_discretio()?,
            TokenKind::Typus => self.parse_type_alias()?,
            TokenKind::Ex
                if matches!(self.cursor.peek_kind(1), TokenKind::Str(_))
                    && self.cursor.peek_kind(2) == &TokenKind::Importa =>
            {
                self.parse_import()?
            }
            TokenKind::Ex => self.parse_for_of()?,
            TokenKind::De => self.parse_for_in()?,
            TokenKind::Si => self.parse_if()?,
            TokenKind::Dum => self.parse_while()?,
            TokenKind::Discerne => self.parse_discerne()?,
            TokenKind::Elige => self.parse_elige()?,
            TokenKind::Tempta => self.parse_try()?,
            TokenKind::Redde => {
                self.cursor.advance();
                let value = if self.at_stmt_end() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                StmtKind::Return(value)
            }
            TokenKind::Rumpe => {
                self.cursor.advance();
                StmtKind::Break
            }
            TokenKind::Perge => {
                self.cursor.advance();
                StmtKind::Continue
            }
            TokenKind::Iace => {
                self.cursor.advance();
                StmtKind::Throw(self.parse_expr()?)
            }
            TokenKind::Mori => {
                self.cursor.advance();
                StmtKind::Panic(self.parse_expr()?)
            }
            TokenKind::Scribe | TokenKind::Vide | TokenKind::Mone => self.parse_scribe()?,
            TokenKind::Adfirma => {
                self.cursor.advance();
                let cond = self.parse_expr()?;
                let message = if self.cursor.eat(&TokenKind::Comma) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                StmtKind::Assert { cond, message }
            }
            TokenKind::LBrace => StmtKind::Block(self.parse_block()?),
            _ => StmtKind::Expr(self.parse_expr()?),
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.in_error_context(ErrorContext::Block, |p| {
            let start = p.cursor.expect(&TokenKind::LBrace)?;
            let mut stmts = Vec::new();
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                if p.cursor.eat(&TokenKind::Semicolon) {
                    continue;
                }
                stmts.push(p.parse_stmt()?);
                p.expect_stmt_end()?;
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(Block {
                stmts,
                span: p.span_from(start),
            })
        })
    }

    fn parse_var_decl(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::VarDecl, |p| {
            let mutable = p.cursor.advance().kind == TokenKind::Varia;
            let ty = if p.starts_typed_binding(&[TokenKind::Eq]) {
                Some(p.parse_type()?)
            } else {
                None
            };
            let name = p.cursor.expect_ident()?;
            let init = if p.cursor.eat(&TokenKind::Eq) {
                Some(p.parse_expr()?)
            } else {
                None
            };
            if init.is_none() && !mutable {
                return Err(p.cursor.unexpected("`=` (fixum requires an initializer)"));
            }
            Ok(StmtKind::Var(VarDecl {
                mutable,
                name,
                ty,
                init,
            }))
        })
    }

    /// `si c {} sin c {} secus {}`
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::IfStatement, |p| {
            p.cursor.expect(&TokenKind::Si)?;
            let mut branches = vec![IfBranch {
                cond: p.parse_expr()?,
                body: p.parse_block()?,
            }];
            while p.cursor.eat(&TokenKind::Sin) {
                branches.push(IfBranch {
                    cond: p.parse_expr()?,
                    body: p.parse_block()?,
                });
            }
            let otherwise = if p.cursor.eat(&TokenKind::Secus) {
                Some(p.parse_block()?)
            } else {
                None
            };
            Ok(StmtKind::If(IfStmt {
                branches,
                otherwise,
            }))
        })
    }

    fn parse_while(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::WhileLoop, |p| {
            p.cursor.expect(&TokenKind::Dum)?;
            let cond = p.parse_expr()?;
            let body = p.parse_block()?;
            Ok(StmtKind::While { cond, body })
        })
    }

    /// `ex iterable pro x { }`
    fn parse_for_of(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::ForLoop, |p| {
            p.cursor.expect(&TokenKind::Ex)?;
            let iterable = p.parse_expr()?;
            p.cursor.expect(&TokenKind::Pro)?;
            let binding = p.cursor.expect_ident()?;
            let body = p.parse_block()?;
            Ok(StmtKind::ForOf {
                binding,
                iterable,
                body,
            })
        })
    }

    /// `de object pro k { }`
    fn parse_for_in(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::ForLoop, |p| {
            p.cursor.expect(&TokenKind::De)?;
            let object = p.parse_expr()?;
            p.cursor.expect(&TokenKind::Pro)?;
            let binding = p.cursor.expect_ident()?;
            let body = p.parse_block()?;
            Ok(StmtKind::ForIn {
                binding,
                object,
                body,
            })
        })
    }

    /// `discerne s { si V pro a, b { } si V ut v { } si V { } ceterum { } }`
    fn parse_discerne(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::Discerne, |p| {
            p.cursor.expect(&TokenKind::Discerne)?;
            let subject = p.parse_expr()?;
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut cases = Vec::new();
            let mut otherwise = None;
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                if p.cursor.eat(&TokenKind::Semicolon) {
                    continue;
                }
                let start = p.cursor.current_span();
                if p.cursor.eat(&TokenKind::Ceterum) {
                    otherwise = Some(p.parse_block()?);
                    continue;
                }
                p.cursor.expect(&TokenKind::Si)?;
                let variant = p.cursor.expect_ident()?;
                let binding = if p.cursor.eat(&TokenKind::Ut) {
                    CaseBinding::Alias(p.cursor.expect_ident()?)
                } else if p.cursor.eat(&TokenKind::Pro) {
                    let mut names = vec![p.cursor.expect_ident()?];
                    while p.cursor.eat(&TokenKind::Comma) {
                        names.push(p.cursor.expect_ident()?);
                    }
                    CaseBinding::Positional(names)
                } else {
                    CaseBinding::None
                };
                let body = p.parse_block()?;
                cases.push(DiscerneCase {
                    variant,
                    binding,
                    body,
                    span: p.span_from(start),
                });
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(StmtKind::Discerne(DiscerneStmt {
                subject,
                cases,
                otherwise,
            }))
        })
    }

    /// `elige v { casu 1, 2 { } ceterum { } }`
    fn parse_elige(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::Elige, |p| {
            p.cursor.expect(&TokenKind::Elige)?;
            let subject = p.parse_expr()?;
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut cases = Vec::new();
            let mut otherwise = None;
            while !p.cursor.check(&TokenKind::RBrace) && !p.cursor.is_at_end() {
                if p.cursor.eat(&TokenKind::Semicolon) {
                    continue;
                }
                let start = p.cursor.current_span();
                if p.cursor.eat(&TokenKind::Ceterum) {
                    otherwise = Some(p.parse_block()?);
                    continue;
                }
                p.cursor.expect(&TokenKind::Casu)?;
                let mut values = vec![p.parse_expr()?];
                while p.cursor.eat(&TokenKind::Comma) {
                    values.push(p.parse_expr()?);
                }
                let body = p.parse_block()?;
                cases.push(EligeCase {
                    values,
                    body,
                    span: p.span_from(start),
                });
            }
            p.cursor.expect(&TokenKind::RBrace)?;
            Ok(StmtKind::Elige(EligeStmt {
                subject,
                cases,
                otherwise,
            }))
        })
    }

    /// `tempta { } cape e { } demum { }`
    fn parse_try(&mut self) -> Result<StmtKind, ParseError> {
        self.in_error_context(ErrorContext::TryStatement, |p| {
            p.cursor.expect(&TokenKind::Tempta)?;
            let body = p.parse_block()?;
            let catch = if p.cursor.eat(&TokenKind::Cape) {
                let binding = if let TokenKind::Ident(_) = p.cursor.current_kind() {
                    Some(p.cursor.expect_ident()?)
                } else {
                    None
                };
                Some(CatchClause {
                    binding,
                    body: p.parse_block()?,
                })
            } else {
                None
            };
            let finally = if p.cursor.eat(&TokenKind::Demum) {
                Some(p.parse_block()?)
            } else {
                None
            };
            if catch.is_none() && finally.is_none() {
                return Err(p.cursor.unexpected("`cape` or `demum`"));
            }
            Ok(StmtKind::Try(TryStmt {
                body,
                catch,
                finally,
            }))
        })
    }

    /// `scribe a, b` / `vide a` / `mone a`
    fn parse_scribe(&mut self) -> Result<StmtKind, ParseError> {
        let level = match self.cursor.advance().kind {
            TokenKind::Vide => ScribeLevel::Vide,
            TokenKind::Mone => ScribeLevel::Mone,
            _ => ScribeLevel::Scribe,
        };
        let mut args = Vec::new();
        if !self.at_stmt_end() {
            args.push(self.parse_expr()?);
            while self.cursor.eat(&TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
        }
        Ok(StmtKind::Scribe { level, args })
    }
}
