//! Expression parsing.
//!
//! Precedence chain, lowest first:
//! assignment, `sic`/`secus` conditional, `vel`, `aut`, `et`, equality and
//! `est` tests, comparison, ranges, additive, multiplicative, `qua` casts,
//! unary (`-`, `non`, `cede`), postfix, primary.

use faber_ir::{
    Access, AssignOp, BinaryOp, Expr, ExprKind, FieldInit, Lambda, LambdaBody, NewInit,
    ObjectEntry, Param, UnaryOp,
};
use faber_lexer::TokenKind;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

impl Parser {
    /// Parse an expression, including assignment.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment)
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_conditional()?;
        let op = match self.cursor.current_kind() {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::StarEq => AssignOp::MulAssign,
            TokenKind::SlashEq => AssignOp::DivAssign,
            _ => return Ok(target),
        };
        if !matches!(
            target.kind,
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        ) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignTarget,
                target.span,
            ));
        }
        self.cursor.advance();
        let value = self.parse_expr()?;
        let span = target.span.merge(value.span);
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// `cond sic then secus otherwise`, right-associative.
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_coalesce()?;
        if !self.cursor.eat(&TokenKind::Sic) {
            return Ok(cond);
        }
        let then = self.nested(Self::parse_conditional)?;
        self.cursor.expect(&TokenKind::Secus)?;
        let otherwise = self.nested(Self::parse_conditional)?;
        let span = cond.span.merge(otherwise.span);
        Ok(Expr::new(
            ExprKind::Conditional {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            span,
        ))
    }

    fn parse_coalesce(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_or()?;
        while self.cursor.eat(&TokenKind::Vel) {
            let right = self.parse_or()?;
            left = binary(BinaryOp::Coalesce, left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.cursor.eat(&TokenKind::Aut) {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.cursor.eat(&TokenKind::Et) {
            let right = self.parse_equality()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// `==`, `!=`, `est T`, `non est T`
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                TokenKind::Est => {
                    self.cursor.advance();
                    left = self.finish_type_test(left, false)?;
                    continue;
                }
                TokenKind::Non if self.cursor.peek_kind(1) == &TokenKind::Est => {
                    self.cursor.advance();
                    self.cursor.advance();
                    left = self.finish_type_test(left, true)?;
                    continue;
                }
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_comparison()?;
            left = binary(op, left, right);
        }
    }

    fn finish_type_test(&mut self, expr: Expr, negated: bool) -> Result<Expr, ParseError> {
        let ty = self.parse_type()?;
        let span = self.span_from(expr.span);
        Ok(Expr::new(
            ExprKind::TypeTest {
                expr: Box::new(expr),
                ty,
                negated,
            },
            span,
        ))
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_range()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_range()?;
            left = binary(op, left, right);
        }
    }

    /// `a..b`, `a usque b`, each with an optional `per step`. Not associative.
    fn parse_range(&mut self) -> Result<Expr, ParseError> {
        let start = self.parse_additive()?;
        let inclusive = match self.cursor.current_kind() {
            TokenKind::DotDot => false,
            TokenKind::Usque => true,
            _ => return Ok(start),
        };
        self.cursor.advance();
        let end = self.parse_additive()?;
        let step = if self.cursor.eat(&TokenKind::Per) {
            Some(Box::new(self.parse_additive()?))
        } else {
            None
        };
        let span = self.span_from(start.span);
        Ok(Expr::new(
            ExprKind::Range {
                start: Box::new(start),
                end: Box::new(end),
                inclusive,
                step,
            },
            span,
        ))
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_cast()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_cast()?;
            left = binary(op, left, right);
        }
    }

    /// `expr qua Type`
    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary()?;
        while self.cursor.eat(&TokenKind::Qua) {
            let ty = self.parse_type()?;
            let span = self.span_from(expr.span);
            expr = Expr::new(
                ExprKind::Cast {
                    expr: Box::new(expr),
                    ty,
                },
                span,
            );
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let wrap: fn(Box<Expr>) -> ExprKind = match self.cursor.current_kind() {
            TokenKind::Minus => |operand| ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            },
            TokenKind::Non => |operand| ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            },
            TokenKind::Cede => ExprKind::Cede,
            _ => return self.parse_postfix(),
        };
        self.cursor.advance();
        let operand = self.nested(Self::parse_unary)?;
        let span = start.merge(operand.span);
        Ok(Expr::new(wrap(Box::new(operand)), span))
    }

    /// Member access, calls and indexing, left to right.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let access = match self.cursor.current_kind() {
                TokenKind::Dot | TokenKind::LBracket | TokenKind::LParen => Access::Plain,
                TokenKind::QuestionDot | TokenKind::QuestionBracket | TokenKind::QuestionParen => {
                    Access::Optional
                }
                TokenKind::BangDot | TokenKind::BangBracket => Access::NonNull,
                _ => return Ok(expr),
            };
            match self.cursor.current_kind() {
                TokenKind::Dot | TokenKind::QuestionDot | TokenKind::BangDot => {
                    self.cursor.advance();
                    let property = self.cursor.expect_name()?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property,
                            access,
                        },
                        span,
                    );
                }
                TokenKind::LParen | TokenKind::QuestionParen => {
                    if self.cursor.at_line_start() {
                        return Ok(expr);
                    }
                    self.cursor.advance();
                    let args = self.in_error_context(ErrorContext::FunctionCall, |p| {
                        p.parse_list(&TokenKind::RParen, Self::parse_spreadable)
                    })?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                            optional: access == Access::Optional,
                        },
                        span,
                    );
                }
                _ => {
                    if self.cursor.at_line_start() {
                        return Ok(expr);
                    }
                    self.cursor.advance();
                    let index = self.in_error_context(ErrorContext::IndexExpression, |p| {
                        let index = p.parse_expr()?;
                        p.cursor.expect(&TokenKind::RBracket)?;
                        Ok(index)
                    })?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                            access,
                        },
                        span,
                    );
                }
            }
        }
    }

    /// Comma-separated items up to and including `close`; trailing comma allowed.
    fn parse_list<T>(
        &mut self,
        close: &TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        while !self.cursor.check(close) {
            items.push(item(self)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(items)
    }

    /// An argument or array element: an expression or `...expr`.
    fn parse_spreadable(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.eat(&TokenKind::Ellipsis) {
            let inner = self.parse_expr()?;
            return Ok(Expr::new(
                ExprKind::Spread(Box::new(inner)),
                self.span_from(start),
            ));
        }
        self.parse_expr()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind().clone() {
            TokenKind::Int(v) => {
                self.cursor.advance();
                ExprKind::Int(v)
            }
            TokenKind::Float(bits) => {
                self.cursor.advance();
                ExprKind::Float(bits)
            }
            TokenKind::Str(s) => {
                self.cursor.advance();
                ExprKind::Str(s)
            }
            TokenKind::Template(s) => {
                self.cursor.advance();
                ExprKind::Template(s)
            }
            TokenKind::Verum => {
                self.cursor.advance();
                ExprKind::Bool(true)
            }
            TokenKind::Falsum => {
                self.cursor.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Nihil => {
                self.cursor.advance();
                ExprKind::Nihil
            }
            TokenKind::Ego => {
                self.cursor.advance();
                ExprKind::Ego
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                ExprKind::Ident(name)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let items = self.in_error_context(ErrorContext::ArrayLiteral, |p| {
                    p.parse_list(&TokenKind::RBracket, Self::parse_spreadable)
                })?;
                ExprKind::Array(items)
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                let entries = self.in_error_context(ErrorContext::ObjectLiteral, |p| {
                    p.parse_list(&TokenKind::RBrace, Self::parse_object_entry)
                })?;
                ExprKind::Object(entries)
            }
            TokenKind::Novum => self.parse_new()?,
            TokenKind::Finge => {
                self.cursor.advance();
                let variant = self.cursor.expect_ident()?;
                self.cursor.expect(&TokenKind::LBrace)?;
                let fields = self.parse_list(&TokenKind::RBrace, Self::parse_field_init)?;
                ExprKind::Finge { variant, fields }
            }
            TokenKind::Pro => ExprKind::Lambda(self.parse_lambda(false)?),
            TokenKind::Futura if self.cursor.peek_kind(1) == &TokenKind::Pro => {
                self.cursor.advance();
                ExprKind::Lambda(self.parse_lambda(true)?)
            }
            TokenKind::Praefixum => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::LParen)?;
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen)?;
                ExprKind::Praefixum(Box::new(inner))
            }
            TokenKind::Ellipsis => {
                return Err(ParseError::new(ParseErrorKind::MisplacedSpread, start));
            }
            _ => return Err(self.cursor.unexpected("an expression")),
        };
        Ok(Expr::new(kind, self.span_from(start)))
    }

    fn parse_object_entry(&mut self) -> Result<ObjectEntry, ParseError> {
        if self.cursor.eat(&TokenKind::Ellipsis) {
            return Ok(ObjectEntry::Spread(self.parse_expr()?));
        }
        let key = match self.cursor.current_kind().clone() {
            TokenKind::Str(key) => {
                self.cursor.advance();
                key
            }
            _ => self.cursor.expect_name()?,
        };
        self.cursor.expect(&TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Ok(ObjectEntry::Prop { key, value })
    }

    fn parse_field_init(&mut self) -> Result<FieldInit, ParseError> {
        let name = self.cursor.expect_name()?;
        self.cursor.expect(&TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Ok(FieldInit { name, value })
    }

    /// `novum C(args)`, `novum C { f: v }`, or bare `novum C`.
    fn parse_new(&mut self) -> Result<ExprKind, ParseError> {
        self.in_error_context(ErrorContext::NewExpression, |p| {
            p.cursor.expect(&TokenKind::Novum)?;
            let class = p.cursor.expect_ident()?;
            let init = if p.cursor.eat(&TokenKind::LParen) {
                NewInit::Args(p.parse_list(&TokenKind::RParen, Self::parse_spreadable)?)
            } else if p.cursor.eat(&TokenKind::LBrace) {
                NewInit::Fields(p.parse_list(&TokenKind::RBrace, Self::parse_field_init)?)
            } else {
                NewInit::Args(Vec::new())
            };
            Ok(ExprKind::New { class, init })
        })
    }

    /// `pro a, b: expr` or `pro a { .. }`; the `pro` token is current.
    fn parse_lambda(&mut self, is_async: bool) -> Result<Lambda, ParseError> {
        self.in_error_context(ErrorContext::Lambda, |p| {
            p.cursor.expect(&TokenKind::Pro)?;
            let mut params = Vec::new();
            while !matches!(
                p.cursor.current_kind(),
                TokenKind::Colon | TokenKind::LBrace
            ) {
                let span = p.cursor.current_span();
                params.push(Param::simple(p.cursor.expect_ident()?, span));
                if !p.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            let body = if p.cursor.eat(&TokenKind::Colon) {
                LambdaBody::Expr(Box::new(p.parse_expr()?))
            } else {
                LambdaBody::Block(p.parse_block()?)
            };
            Ok(Lambda {
                params,
                body,
                is_async,
            })
        })
    }
}
