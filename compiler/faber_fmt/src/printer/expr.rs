//! Expressions.
//!
//! The parser keeps no parentheses, so they are reintroduced from binding
//! strength: an operand is wrapped when it binds looser than its position
//! requires.

use faber_ir::{
    BinaryOp, Expr, ExprKind, FieldInit, Lambda, LambdaBody, NewInit, ObjectEntry, UnaryOp,
    RANGE_PRECEDENCE, TYPE_TEST_PRECEDENCE,
};
use faber_lexer::TokenKind;

use super::Printer;
use crate::doc::{braces, concat, delimited, text, Doc};

/// Assignment, lambdas and spreads: only where a full expression is expected.
const LOWEST: u8 = 0;
const CONDITIONAL: u8 = 1;
const CAST: u8 = 10;
const UNARY: u8 = 11;
const POSTFIX: u8 = 12;
const PRIMARY: u8 = 13;

/// Binding strength of `expr` on the printer's scale; binary operators sit
/// one above their own table so the conditional fits below them.
fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Assign { .. } | ExprKind::Lambda(_) | ExprKind::Spread(_) => LOWEST,
        ExprKind::Conditional { .. } => CONDITIONAL,
        ExprKind::Binary { op, .. } => op.precedence() + 1,
        ExprKind::TypeTest { .. } => TYPE_TEST_PRECEDENCE + 1,
        ExprKind::Range { .. } => RANGE_PRECEDENCE + 1,
        ExprKind::Cast { .. } => CAST,
        ExprKind::Unary { .. } | ExprKind::Cede(_) => UNARY,
        ExprKind::Call { .. } | ExprKind::Member { .. } | ExprKind::Index { .. } => POSTFIX,
        _ => PRIMARY,
    }
}

/// Object keys print bare when they lex as a single name.
fn is_bare_key(key: &str) -> bool {
    match faber_lexer::lex(key) {
        Ok(tokens) => matches!(
            tokens.as_slice(),
            [name, eof] if matches!(name.kind, TokenKind::Ident(_)) && eof.kind == TokenKind::Eof
        ),
        Err(_) => false,
    }
}

fn string_literal(value: &str) -> Doc {
    text(format!("\"{}\"", faber_lexer::escape(value)))
}

/// Shortest text that reads back as the same `f64`.
fn float_literal(bits: u64) -> String {
    format!("{:?}", f64::from_bits(bits))
}

/// The token an expression statement would start with.
pub(super) fn leftmost(expr: &Expr) -> &Expr {
    match &expr.kind {
        ExprKind::Binary { left, .. } => leftmost(left),
        ExprKind::Assign { target, .. } => leftmost(target),
        ExprKind::Conditional { cond, .. } => leftmost(cond),
        ExprKind::Call { callee, .. } => leftmost(callee),
        ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => leftmost(object),
        ExprKind::Range { start, .. } => leftmost(start),
        ExprKind::Cast { expr, .. } | ExprKind::TypeTest { expr, .. } => leftmost(expr),
        _ => expr,
    }
}

impl Printer<'_> {
    /// `expr` in a position that accepts anything binding at least `min`.
    pub(crate) fn expr_at(&self, expr: &Expr, min: u8) -> Doc {
        let doc = faber_stack::ensure_sufficient_stack(|| self.expr_kind(expr));
        if precedence(expr) < min {
            concat(vec![text("("), doc, text(")")])
        } else {
            doc
        }
    }

    pub(crate) fn expr(&self, expr: &Expr) -> Doc {
        self.expr_at(expr, LOWEST)
    }

    fn expr_kind(&self, expr: &Expr) -> Doc {
        match &expr.kind {
            ExprKind::Int(v) => text(v.to_string()),
            ExprKind::Float(bits) => text(float_literal(*bits)),
            ExprKind::Str(s) => string_literal(s),
            ExprKind::Template(raw) => text(format!("`{raw}`")),
            ExprKind::Bool(true) => text("verum"),
            ExprKind::Bool(false) => text("falsum"),
            ExprKind::Nihil => text("nihil"),
            ExprKind::Ego => text("ego"),
            ExprKind::Ident(name) => text(name.as_str()),
            ExprKind::Array(items) => {
                let items: Vec<Doc> = items.iter().map(|e| self.expr(e)).collect();
                let force = self.forced(items.len());
                delimited("[", items, "]", force)
            }
            ExprKind::Object(entries) => {
                let items = entries
                    .iter()
                    .map(|entry| match entry {
                        ObjectEntry::Prop { key, value } => {
                            let key = if is_bare_key(key) {
                                text(key.as_str())
                            } else {
                                string_literal(key)
                            };
                            concat(vec![key, text(": "), self.expr(value)])
                        }
                        ObjectEntry::Spread(value) => concat(vec![text("..."), self.expr(value)]),
                    })
                    .collect::<Vec<_>>();
                let force = self.forced(items.len());
                braces(items, force)
            }
            ExprKind::Unary { op, operand } => {
                let inner = self.expr_at(operand, UNARY);
                match op {
                    UnaryOp::Not => concat(vec![text("non "), inner]),
                    // `--x` would not read back as two negations.
                    UnaryOp::Neg if starts_with_minus(operand) => {
                        concat(vec![text("-("), inner, text(")")])
                    }
                    UnaryOp::Neg => concat(vec![text("-"), inner]),
                }
            }
            ExprKind::Binary { op, left, right } => {
                let p = op.precedence() + 1;
                // `T <` would read as the start of type arguments.
                let left_min = if *op == BinaryOp::Lt && ends_with_type(left) {
                    PRIMARY
                } else {
                    p
                };
                concat(vec![
                    self.expr_at(left, left_min),
                    text(format!(" {} ", op.as_symbol())),
                    self.expr_at(right, p + 1),
                ])
            }
            ExprKind::Assign { op, target, value } => concat(vec![
                self.expr_at(target, CONDITIONAL),
                text(format!(" {} ", op.as_symbol())),
                self.expr(value),
            ]),
            ExprKind::Conditional {
                cond,
                then,
                otherwise,
            } => concat(vec![
                self.expr_at(cond, CONDITIONAL + 1),
                text(" sic "),
                self.expr_at(then, CONDITIONAL),
                text(" secus "),
                self.expr_at(otherwise, CONDITIONAL),
            ]),
            ExprKind::Call {
                callee,
                args,
                optional,
            } => {
                let args: Vec<Doc> = args.iter().map(|a| self.expr(a)).collect();
                let force = self.forced(args.len());
                let open = if *optional { "?(" } else { "(" };
                concat(vec![self.expr_at(callee, POSTFIX), delimited(open, args, ")", force)])
            }
            ExprKind::Member {
                object,
                property,
                access,
            } => concat(vec![
                self.expr_at(object, POSTFIX),
                text(format!("{}.{property}", access.marker())),
            ]),
            ExprKind::Index {
                object,
                index,
                access,
            } => concat(vec![
                self.expr_at(object, POSTFIX),
                text(format!("{}[", access.marker())),
                self.expr(index),
                text("]"),
            ]),
            ExprKind::Range {
                start,
                end,
                inclusive,
                step,
            } => {
                let operand = RANGE_PRECEDENCE + 2;
                let mut parts = vec![
                    self.expr_at(start, operand),
                    text(if *inclusive { " usque " } else { ".." }),
                    self.expr_at(end, operand),
                ];
                if let Some(step) = step {
                    parts.push(text(" per "));
                    parts.push(self.expr_at(step, operand));
                }
                concat(parts)
            }
            ExprKind::Lambda(lambda) => self.lambda(lambda),
            ExprKind::New { class, init } => match init {
                NewInit::Args(args) => {
                    let args: Vec<Doc> = args.iter().map(|a| self.expr(a)).collect();
                    let force = self.forced(args.len());
                    concat(vec![text(format!("novum {class}")), delimited("(", args, ")", force)])
                }
                NewInit::Fields(fields) => concat(vec![
                    text(format!("novum {class} ")),
                    self.field_inits(fields),
                ]),
            },
            ExprKind::Finge { variant, fields } => concat(vec![
                text(format!("finge {variant} ")),
                self.field_inits(fields),
            ]),
            ExprKind::Cede(inner) => concat(vec![text("cede "), self.expr_at(inner, UNARY)]),
            ExprKind::Praefixum(inner) => {
                concat(vec![text("praefixum("), self.expr(inner), text(")")])
            }
            ExprKind::Cast { expr, ty } => {
                concat(vec![self.expr_at(expr, CAST), text(format!(" qua {ty}"))])
            }
            ExprKind::TypeTest { expr, ty, negated } => {
                let keyword = if *negated { "non est" } else { "est" };
                concat(vec![
                    self.expr_at(expr, TYPE_TEST_PRECEDENCE + 1),
                    text(format!(" {keyword} {ty}")),
                ])
            }
            ExprKind::Spread(inner) => concat(vec![text("..."), self.expr(inner)]),
        }
    }

    fn field_inits(&self, fields: &[FieldInit]) -> Doc {
        let items = fields
            .iter()
            .map(|f| concat(vec![text(format!("{}: ", f.name)), self.expr(&f.value)]))
            .collect::<Vec<_>>();
        let force = self.forced(items.len());
        braces(items, force)
    }

    fn lambda(&self, lambda: &Lambda) -> Doc {
        let mut parts = Vec::new();
        if lambda.is_async {
            parts.push(text("futura "));
        }
        parts.push(text("pro"));
        let names: Vec<&str> = lambda.params.iter().map(|p| p.name.as_str()).collect();
        if !names.is_empty() {
            parts.push(text(format!(" {}", names.join(", "))));
        }
        match &lambda.body {
            LambdaBody::Expr(body) => {
                parts.push(text(": "));
                parts.push(self.expr(body));
            }
            LambdaBody::Block(block) => {
                parts.push(text(" "));
                parts.push(self.block(block));
            }
        }
        concat(parts)
    }
}

/// Whether the printed form of `expr` ends with a type annotation.
fn ends_with_type(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Cast { .. } | ExprKind::TypeTest { .. } => true,
        ExprKind::Binary { right, .. } => ends_with_type(right),
        ExprKind::Unary { operand, .. } | ExprKind::Cede(operand) => ends_with_type(operand),
        _ => false,
    }
}

/// Whether `expr`, printed as a unary operand, begins with a `-`.
fn starts_with_minus(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Unary {
            op: UnaryOp::Neg, ..
        } => true,
        ExprKind::Int(v) => *v < 0,
        ExprKind::Float(bits) => f64::from_bits(*bits).is_sign_negative(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_that_are_not_names_are_quoted() {
        assert!(is_bare_key("nomen"));
        assert!(!is_bare_key("data-id"));
        assert!(!is_bare_key("si"));
        assert!(!is_bare_key(""));
    }

    #[test]
    fn floats_read_back_exactly() {
        for value in [0.1, 1.0, 2.5e-8, 1e21, 123_456.789] {
            let text = float_literal(f64::to_bits(value));
            assert_eq!(text.parse::<f64>().ok(), Some(value), "{text}");
        }
    }
}
