//! Expression lowering.

use faber_ir::{
    Access, BinaryOp, Expr, ExprKind, FieldInit, NewInit, ObjectEntry, Primitive, ResolvedType,
    TypeAnnotation, UnaryOp,
};
use faber_stack::ensure_sufficient_stack;
use tracing::trace;

use super::stmt::{expr_is_integer, expr_is_text};
use super::{types, ZigGen};
use crate::consteval::{self, ConstValue};
use crate::emit::{
    bound_needs_parens, float_literal, operand_needs_parens, quote, receiver_needs_parens,
    OperandRules,
};
use crate::features::ZigFeatures;
use crate::protocol::optional::split_chain;
use crate::protocol::range::{negative_index, slice_end, EndBound, SliceEnd};
use crate::protocol::verbs::{cede, CedeLowering, CedePosition};
use crate::registry::zig::REGISTRY;
use crate::registry::{receiver_kind, ReceiverKind};
use crate::scope::{FunctionMode, Scope};
use crate::{CodegenError, Target};

type Result<T> = std::result::Result<T, CodegenError>;

const RULES: OperandRules = OperandRules {
    comparisons_chain: true,
    coalesce_isolated: true,
};

fn unsupported(construct: &str, span: faber_ir::Span) -> CodegenError {
    CodegenError::unsupported(construct, Target::Zig, span)
}

/// Collection kind of a receiver whose type the analyzer resolved.
fn known_kind(expr: &Expr) -> Option<ReceiverKind> {
    expr.ty.as_ref().and_then(|ty| receiver_kind(Some(ty)))
}

fn is_decimus(expr: &Expr) -> bool {
    expr.ty
        .as_ref()
        .is_some_and(|ty| ty.is_primitive(Primitive::Decimus))
}

/// Slice bounds and indices are `usize`; integer expressions need a cast.
fn usize_index(expr: &Expr, text: String) -> String {
    if expr.as_int_literal().is_some_and(|v| v >= 0) {
        text
    } else {
        format!("@intCast({text})")
    }
}

/// Element type of a literal list without a resolved type, from its first item.
fn literal_element_type(items: &[Expr]) -> Option<&'static str> {
    let first = items.first()?;
    Some(match &first.kind {
        ExprKind::Float(_) => "f64",
        ExprKind::Str(_) => "[]const u8",
        ExprKind::Bool(_) => "bool",
        _ if first.as_int_literal().is_some() => "i64",
        _ => return None,
    })
}

impl ZigGen {
    pub(super) fn gen_expr(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        trace!(kind = expr.kind.kind_name(), "zig expr");
        ensure_sufficient_stack(|| {
            if expr.has_optional_chain() {
                let temp = self.fresh_temp();
                if let Some(chain) = split_chain(expr, &temp) {
                    let base = self.gen_expr(&chain.base, scope)?;
                    let body = self.gen_expr(&chain.body, scope)?;
                    return Ok(format!("(if ({base}) |{temp}| {body} else null)"));
                }
            }
            self.gen_expr_kind(expr, scope)
        })
    }

    fn gen_expr_kind(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        match &expr.kind {
            ExprKind::Int(_) | ExprKind::Float(_) if is_decimus(expr) => {
                Err(unsupported("`decimus` values", expr.span).suggest("use `fractus`"))
            }
            ExprKind::Int(v) => Ok(v.to_string()),
            ExprKind::Float(bits) => Ok(float_literal(*bits)),
            ExprKind::Str(s) => Ok(quote(s)),
            ExprKind::Template(_) => Err(unsupported("template literals", expr.span)
                .suggest("pass the pieces to `scribe` separately")),
            ExprKind::Bool(b) => Ok(b.to_string()),
            ExprKind::Nihil => Ok("null".to_string()),
            ExprKind::Ego => Ok("self".to_string()),
            ExprKind::Ident(name) => Ok(name.clone()),
            ExprKind::Array(items) => self.gen_array(items, expr, scope),
            ExprKind::Object(entries) => self.gen_object(entries, expr, scope),
            ExprKind::Unary { op, operand } => {
                let text = self.gen_receiver(operand, scope)?;
                Ok(match op {
                    UnaryOp::Neg if text.starts_with('-') => format!("-({text})"),
                    UnaryOp::Neg => format!("-{text}"),
                    UnaryOp::Not => format!("!{text}"),
                })
            }
            ExprKind::Binary { op, left, right } => self.gen_binary(*op, left, right, scope),
            ExprKind::Assign { .. } => Err(unsupported("assignment inside an expression", expr.span)
                .suggest("move the assignment into its own statement")),
            ExprKind::Conditional {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.gen_expr(cond, scope)?;
                let then = self.gen_expr(then, scope)?;
                let otherwise = self.gen_expr(otherwise, scope)?;
                Ok(format!("if ({cond}) {then} else {otherwise}"))
            }
            ExprKind::Call { callee, args, .. } => self.gen_call(callee, args, scope),
            ExprKind::Member {
                object,
                property,
                access,
            } => {
                let object = self.gen_receiver(object, scope)?;
                Ok(match access {
                    Access::NonNull => format!("{object}.?.{property}"),
                    Access::Plain | Access::Optional => format!("{object}.{property}"),
                })
            }
            ExprKind::Index {
                object,
                index,
                access,
            } => self.gen_index(object, index, *access, scope),
            ExprKind::Range { .. } => Err(unsupported(
                "range expressions outside loops and slices",
                expr.span,
            )
            .suggest("iterate the range with `ex .. pro`")),
            ExprKind::Lambda(_) => {
                Err(unsupported("lambdas", expr.span).suggest("declare a named `functio`"))
            }
            ExprKind::New { class, init } => match init {
                NewInit::Args(args) => {
                    let args = self.gen_args(args, scope)?;
                    Ok(format!("{class}.init({})", args.join(", ")))
                }
                NewInit::Fields(fields) => {
                    let fields = self.gen_fields(fields, scope)?;
                    Ok(format!("{class}{fields}"))
                }
            },
            ExprKind::Finge { variant, fields } => {
                let payload = if fields.is_empty() {
                    "{}".to_string()
                } else {
                    format!(".{}", self.gen_fields(fields, scope)?)
                };
                Ok(match self.decls.variant(variant) {
                    Some(info) => format!("{}{{ .{variant} = {payload} }}", info.union),
                    None => format!(".{{ .{variant} = {payload} }}"),
                })
            }
            ExprKind::Cede(_) => {
                if scope.mode == FunctionMode::TopLevel {
                    return Err(CodegenError::misplaced("cede", "at module level", expr.span));
                }
                match cede(scope.mode, CedePosition::Value) {
                    CedeLowering::Invalid(context) => {
                        Err(CodegenError::misplaced("cede", context, expr.span))
                    }
                    _ => Err(unsupported("`cede`", expr.span)),
                }
            }
            ExprKind::Praefixum(inner) => match consteval::evaluate(inner) {
                Some(value) => Ok(const_literal(&value)),
                None => {
                    let text = self.gen_expr(inner, scope)?;
                    Ok(format!("comptime ({text})"))
                }
            },
            ExprKind::Cast { expr: inner, ty } => {
                let ty = self.ty(ty, expr.span)?;
                let inner = self.gen_expr(inner, scope)?;
                Ok(format!("@as({ty}, {inner})"))
            }
            ExprKind::TypeTest {
                expr: inner,
                ty,
                negated,
            } => self.gen_type_test(inner, ty, *negated, expr.span, scope),
            ExprKind::Spread(_) => Err(CodegenError::misplaced(
                "Spread",
                "outside an argument list or array literal",
                expr.span,
            )),
        }
    }

    fn gen_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, scope: Scope) -> Result<String> {
        let text = expr_is_text(left) || expr_is_text(right);
        match op {
            BinaryOp::Add if text => {
                if left.is_str_literal() && right.is_str_literal() {
                    let l = self.gen_expr(left, scope)?;
                    let r = self.gen_expr(right, scope)?;
                    return Ok(format!("{l} ++ {r}"));
                }
                Err(unsupported("string concatenation", left.span.merge(right.span))
                    .suggest("use `scriptum` or std.fmt formatting"))
            }
            BinaryOp::Eq | BinaryOp::NotEq if text => {
                self.require(ZigFeatures::STD);
                let l = self.gen_expr(left, scope)?;
                let r = self.gen_expr(right, scope)?;
                let not = if op == BinaryOp::NotEq { "!" } else { "" };
                Ok(format!("{not}std.mem.eql(u8, {l}, {r})"))
            }
            BinaryOp::Div | BinaryOp::Mod if expr_is_integer(left) && expr_is_integer(right) => {
                let l = self.gen_expr(left, scope)?;
                let r = self.gen_expr(right, scope)?;
                let builtin = if op == BinaryOp::Div { "@divTrunc" } else { "@mod" };
                Ok(format!("{builtin}({l}, {r})"))
            }
            _ => {
                let l = self.gen_operand(left, op, false, scope)?;
                let r = self.gen_operand(right, op, true, scope)?;
                let symbol = match op {
                    BinaryOp::And => "and",
                    BinaryOp::Or => "or",
                    BinaryOp::Coalesce => "orelse",
                    other => other.as_symbol(),
                };
                Ok(format!("{l} {symbol} {r}"))
            }
        }
    }

    /// `orelse` binds tighter than comparisons in Zig, so comparison
    /// operands of `vel` are parenthesized as well.
    fn gen_operand(
        &mut self,
        child: &Expr,
        parent: BinaryOp,
        right: bool,
        scope: Scope,
    ) -> Result<String> {
        let text = self.gen_expr(child, scope)?;
        let comparison_under_orelse = parent == BinaryOp::Coalesce
            && matches!(&child.kind, ExprKind::Binary { op, .. } if op.is_comparison());
        Ok(
            if comparison_under_orelse || operand_needs_parens(child, parent, right, RULES) {
                format!("({text})")
            } else {
                text
            },
        )
    }

    pub(super) fn gen_receiver(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(expr, scope)?;
        Ok(if receiver_needs_parens(expr) {
            format!("({text})")
        } else {
            text
        })
    }

    fn gen_args(&mut self, args: &[Expr], scope: Scope) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            if let ExprKind::Spread(_) = arg.kind {
                return Err(unsupported("spread arguments", arg.span)
                    .suggest("pass a `lista` argument instead"));
            }
            out.push(self.gen_expr(arg, scope)?);
        }
        Ok(out)
    }

    /// `{ .a = 1, .b = 2 }`.
    fn gen_fields(&mut self, fields: &[FieldInit], scope: Scope) -> Result<String> {
        if fields.is_empty() {
            return Ok("{}".to_string());
        }
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self.gen_expr(&field.value, scope)?;
            parts.push(format!(".{} = {value}", field.name));
        }
        Ok(format!("{{ {} }}", parts.join(", ")))
    }

    /// An empty hash map for a resolved `tabula` / `copia` type.
    fn empty_map(&mut self, ty: &ResolvedType, span: faber_ir::Span) -> Result<String> {
        let Some(map) = types::render_resolved(ty) else {
            return Err(unsupported("`decimus` values", span).suggest("use `fractus`"));
        };
        self.require(ZigFeatures::ALLOCATOR | ZigFeatures::STD);
        Ok(format!("{map}.init(allocator)"))
    }

    fn gen_array(&mut self, items: &[Expr], expr: &Expr, scope: Scope) -> Result<String> {
        let ty = expr.ty.as_ref();
        if let Some(ty) = ty.filter(|ty| matches!(ty.head_name(), "tabula" | "copia")) {
            if !items.is_empty() {
                return Err(unsupported(
                    &format!("a non-empty `{}` literal", ty.head_name()),
                    expr.span,
                )
                .suggest("start empty and add each element"));
            }
            return self.empty_map(ty, expr.span);
        }
        let element = match ty {
            Some(ResolvedType::Generic { name, args })
                if name == "lista"
                    && args
                        .first()
                        .is_some_and(|arg| !arg.is_primitive(Primitive::Ignotum)) =>
            {
                match types::render_resolved(&args[0]) {
                    Some(element) => Some(element),
                    None => {
                        return Err(unsupported("`decimus` values", expr.span)
                            .suggest("use `fractus`"));
                    }
                }
            }
            _ => literal_element_type(items).map(str::to_string),
        };
        let Some(element) = element else {
            return Err(unsupported("a list literal without an element type", expr.span)
                .suggest("annotate the declaration with its `lista` type"));
        };
        let items = self.gen_args(items, scope)?;
        self.require(ZigFeatures::ALLOCATOR | ZigFeatures::STD);
        if items.is_empty() {
            return Ok(format!("std.ArrayList({element}).init(allocator)"));
        }
        self.require(ZigFeatures::LIST_LITERAL);
        Ok(format!(
            "try faberLista({element}, &.{{ {} }})",
            items.join(", ")
        ))
    }

    fn gen_object(&mut self, entries: &[ObjectEntry], expr: &Expr, scope: Scope) -> Result<String> {
        if let Some(ty) = expr.ty.as_ref().filter(|ty| ty.head_name() == "tabula") {
            if !entries.is_empty() {
                return Err(unsupported("a non-empty `tabula` literal", expr.span)
                    .suggest("start empty and `pone` each entry"));
            }
            return self.empty_map(ty, expr.span);
        }
        if entries.is_empty() {
            return Ok(".{}".to_string());
        }
        let mut parts = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                ObjectEntry::Prop { key, value } => {
                    let value = self.gen_expr(value, scope)?;
                    parts.push(format!(".{key} = {value}"));
                }
                ObjectEntry::Spread(inner) => {
                    return Err(unsupported("spread inside an object literal", inner.span));
                }
            }
        }
        Ok(format!(".{{ {} }}", parts.join(", ")))
    }

    fn gen_call(&mut self, callee: &Expr, args: &[Expr], scope: Scope) -> Result<String> {
        match &callee.kind {
            ExprKind::Ident(name) if self.decls.is_function(name) => {
                let args = self.gen_args(args, scope)?;
                return Ok(format!("try {name}({})", args.join(", ")));
            }
            ExprKind::Ident(name) => {
                if let Some(def) = REGISTRY.intrinsic(name) {
                    self.require(def.requires);
                    let args = self.gen_args(args, scope)?;
                    return Ok(def.render_intrinsic(&args));
                }
            }
            ExprKind::Member {
                object, property, ..
            } => {
                if let Some(def) = REGISTRY.method(object.ty.as_ref(), property) {
                    self.require(def.requires);
                    let receiver = self.gen_receiver(object, scope)?;
                    let args = self.gen_args(args, scope)?;
                    return Ok(def.render(&receiver, &args));
                }
                let user_method = matches!(object.kind, ExprKind::Ego)
                    || object
                        .ty
                        .as_ref()
                        .is_some_and(|ty| self.decls.is_genus(ty.head_name()));
                if user_method {
                    let callee = self.gen_expr(callee, scope)?;
                    let args = self.gen_args(args, scope)?;
                    return Ok(format!("try {callee}({})", args.join(", ")));
                }
            }
            _ => {}
        }
        let callee = self.gen_receiver(callee, scope)?;
        let args = self.gen_args(args, scope)?;
        Ok(format!("{callee}({})", args.join(", ")))
    }

    fn gen_index(&mut self, object: &Expr, index: &Expr, access: Access, scope: Scope) -> Result<String> {
        let mut receiver = self.gen_receiver(object, scope)?;
        if access == Access::NonNull {
            receiver.push_str(".?");
        }
        let kind = known_kind(object);
        if kind == Some(ReceiverKind::Tabula) {
            let key = self.gen_expr(index, scope)?;
            return Ok(format!("{receiver}.get({key}).?"));
        }
        let items = if kind == Some(ReceiverKind::Lista) {
            format!("{receiver}.items")
        } else {
            receiver
        };

        if let ExprKind::Range {
            start,
            end,
            inclusive,
            step,
        } = &index.kind
        {
            if let Some(step) = step {
                return Err(unsupported("stepped slices", step.span)
                    .suggest("copy the elements in a counting loop"));
            }
            let start_text = match negative_index(start) {
                Some(n) => format!("{items}.len - {}", n.unsigned_abs()),
                None => {
                    let text = self.gen_expr(start, scope)?;
                    usize_index(start, text)
                }
            };
            let end_text = match slice_end(end, *inclusive) {
                SliceEnd::Open => String::new(),
                SliceEnd::Bound(EndBound::Folded(v)) if v < 0 => {
                    format!("{items}.len - {}", v.unsigned_abs())
                }
                SliceEnd::Bound(bound) => {
                    let text = self.gen_expr(end, scope)?;
                    let text = if bound_needs_parens(end) {
                        format!("({text})")
                    } else {
                        text
                    };
                    let rendered = bound.render(&text);
                    if end.as_int_literal().is_some_and(|v| v >= 0) {
                        rendered
                    } else {
                        format!("@intCast({rendered})")
                    }
                }
            };
            return Ok(format!("{items}[{start_text}..{end_text}]"));
        }

        if let Some(n) = negative_index(index) {
            return Ok(format!("{items}[{items}.len - {}]", n.unsigned_abs()));
        }
        let key = self.gen_expr(index, scope)?;
        Ok(format!("{items}[{}]", usize_index(index, key)))
    }

    fn gen_type_test(
        &mut self,
        subject: &Expr,
        ty: &TypeAnnotation,
        negated: bool,
        span: faber_ir::Span,
        scope: Scope,
    ) -> Result<String> {
        let eq = if negated { "!=" } else { "==" };
        let subject_text = self.gen_receiver(subject, scope)?;
        if let TypeAnnotation::Named { name, args } = ty {
            if args.is_empty() && (name == "nihil" || name == "vacuum") {
                return Ok(format!("{subject_text} {eq} null"));
            }
            if args.is_empty() && self.decls.variant(name).is_some() {
                return Ok(format!("{subject_text} {eq} .{name}"));
            }
        }
        if let TypeAnnotation::Function { .. } = ty {
            return Err(unsupported("`est` tests against function types", span));
        }
        let ty = self.ty(ty, span)?;
        Ok(format!("@TypeOf({subject_text}) {eq} {ty}"))
    }
}

fn const_literal(value: &ConstValue) -> String {
    match value {
        ConstValue::Int(v) => v.to_string(),
        ConstValue::Float(v) => float_literal(v.to_bits()),
        ConstValue::Str(s) => quote(s),
        ConstValue::Bool(b) => b.to_string(),
        ConstValue::Nihil => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_ir::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn indices_cast_unless_literal() {
        let n = Expr::ident("n", Span::DUMMY);
        assert_eq!(usize_index(&n, "n".into()), "@intCast(n)");
        let two = Expr::new(ExprKind::Int(2), Span::DUMMY);
        assert_eq!(usize_index(&two, "2".into()), "2");
    }

    #[test]
    fn element_type_from_the_first_literal() {
        let items = [Expr::float(1.5, Span::DUMMY)];
        assert_eq!(literal_element_type(&items), Some("f64"));
        assert_eq!(literal_element_type(&[]), None);
        assert_eq!(
            literal_element_type(&[Expr::ident("x", Span::DUMMY)]),
            None
        );
    }
}
