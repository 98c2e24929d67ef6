//! Expression lowering.

use faber_ir::{
    AssignOp, BinaryOp, Expr, ExprKind, FieldInit, Lambda, LambdaBody, NewInit,
    ObjectEntry, Param, Primitive, TypeAnnotation, UnaryOp,
};
use faber_stack::ensure_sufficient_stack;
use tracing::trace;

use super::PyGen;
use crate::consteval::{self, ConstValue};
use crate::emit::{
    bound_needs_parens, float_literal, operand_needs_parens, quote, receiver_needs_parens,
    OperandRules,
};
use crate::features::PyFeatures;
use crate::protocol::optional::split_chain;
use crate::protocol::range::{slice_end, SliceEnd};
use crate::protocol::verbs::{cede, CedeLowering, CedePosition};
use crate::registry::py::{REGISTRY, STATEMENT_ONLY};
use crate::scope::{FunctionMode, Scope};
use crate::{CodegenError, Target};

type Result<T> = std::result::Result<T, CodegenError>;

const RULES: OperandRules = OperandRules {
    comparisons_chain: true,
    coalesce_isolated: false,
};

fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        other => other.as_symbol(),
    }
}

fn has_primitive(expr: &Expr, prim: Primitive) -> bool {
    expr.ty.as_ref().is_some_and(|ty| ty.is_primitive(prim))
}

fn is_text(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Str(_) | ExprKind::Template(_))
        || has_primitive(expr, Primitive::Textus)
}

fn is_integer(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Int(_)) || has_primitive(expr, Primitive::Numerus)
}

/// A template body as an f-string: `${x}` becomes `{x}`, literal braces
/// are doubled.
fn f_string(raw: &str) -> String {
    let mut out = String::from("f\"");
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
                let mut depth = 1;
                for inner in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    out.push(inner);
                }
                out.push('}');
            }
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\\' if chars.peek() == Some(&'`') => {
                chars.next();
                out.push('`');
            }
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl PyGen {
    pub(super) fn gen_expr(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        trace!(kind = expr.kind.kind_name(), "py expr");
        ensure_sufficient_stack(|| {
            if let Some(guarded) = self.gen_guarded(expr, scope)? {
                return Ok(guarded);
            }
            self.gen_expr_kind(expr, scope)
        })
    }

    /// Python has no optional access, so every optional chain is guarded at
    /// its first optional receiver.
    fn gen_guarded(&mut self, expr: &Expr, scope: Scope) -> Result<Option<String>> {
        if !expr.has_optional_chain() {
            return Ok(None);
        }
        let Some(probe) = split_chain(expr, "_") else {
            return Ok(None);
        };
        let direct = match &probe.base.kind {
            ExprKind::Ident(name) => Some(name.clone()),
            ExprKind::Ego => Some("self".to_string()),
            _ => None,
        };
        if let Some(name) = direct {
            let Some(chain) = split_chain(expr, &name) else {
                return Ok(None);
            };
            let body = self.gen_expr(&chain.body, scope)?;
            return Ok(Some(format!("(None if {name} is None else {body})")));
        }
        let temp = self.fresh_temp();
        let Some(chain) = split_chain(expr, &temp) else {
            return Ok(None);
        };
        let base = self.gen_expr(&chain.base, scope)?;
        let body = self.gen_expr(&chain.body, scope)?;
        Ok(Some(format!(
            "(None if ({temp} := {base}) is None else {body})"
        )))
    }

    fn gen_expr_kind(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        match &expr.kind {
            ExprKind::Int(v) if has_primitive(expr, Primitive::Decimus) => {
                self.require(PyFeatures::DECIMAL);
                Ok(format!("Decimal(\"{v}\")"))
            }
            ExprKind::Int(v) => Ok(v.to_string()),
            ExprKind::Float(bits) if has_primitive(expr, Primitive::Decimus) => {
                self.require(PyFeatures::DECIMAL);
                Ok(format!("Decimal(\"{}\")", float_literal(*bits)))
            }
            ExprKind::Float(bits) => Ok(float_literal(*bits)),
            ExprKind::Str(s) => Ok(quote(s)),
            ExprKind::Template(raw) => Ok(f_string(raw)),
            ExprKind::Bool(true) => Ok("True".to_string()),
            ExprKind::Bool(false) => Ok("False".to_string()),
            ExprKind::Nihil => Ok("None".to_string()),
            ExprKind::Ego => Ok("self".to_string()),
            ExprKind::Ident(name) => Ok(name.clone()),
            ExprKind::Array(items) => {
                let items = self.gen_args(items, scope)?;
                Ok(match expr.ty.as_ref().map(|ty| ty.head_name()) {
                    Some("copia") if items.is_empty() => "set()".to_string(),
                    Some("copia") => format!("{{{}}}", items.join(", ")),
                    Some("tabula") => format!("dict([{}])", items.join(", ")),
                    _ => format!("[{}]", items.join(", ")),
                })
            }
            ExprKind::Object(entries) => self.gen_object(entries, expr, scope),
            ExprKind::Unary { op, operand } => {
                let operand_text = self.gen_unary_operand(operand, scope)?;
                Ok(match op {
                    UnaryOp::Neg if operand_text.starts_with('-') => format!("-({operand_text})"),
                    UnaryOp::Neg => format!("-{operand_text}"),
                    UnaryOp::Not => format!("not {operand_text}"),
                })
            }
            ExprKind::Binary { op, left, right } => self.gen_binary(*op, left, right, scope),
            ExprKind::Assign { op, target, value } => {
                if *op != AssignOp::Assign || !matches!(target.kind, ExprKind::Ident(_)) {
                    return Err(CodegenError::unsupported(
                        "assignment inside an expression",
                        Target::Python,
                        expr.span,
                    )
                    .suggest("move the assignment into its own statement"));
                }
                let target = self.gen_expr(target, scope)?;
                let value = self.gen_expr(value, scope)?;
                Ok(format!("({target} := {value})"))
            }
            ExprKind::Conditional {
                cond,
                then,
                otherwise,
            } => {
                let wrap = |e: &Expr, text: String| {
                    if matches!(
                        e.kind,
                        ExprKind::Conditional { .. } | ExprKind::Lambda(_) | ExprKind::Assign { .. }
                    ) {
                        format!("({text})")
                    } else {
                        text
                    }
                };
                let cond_text = self.gen_expr(cond, scope)?;
                let then_text = self.gen_expr(then, scope)?;
                let otherwise_text = self.gen_expr(otherwise, scope)?;
                Ok(format!(
                    "{} if {} else {otherwise_text}",
                    wrap(then, then_text),
                    wrap(cond, cond_text)
                ))
            }
            ExprKind::Call { callee, args, .. } => self.gen_call(callee, args, scope),
            ExprKind::Member {
                object, property, ..
            } => {
                let object = self.gen_receiver(object, scope)?;
                Ok(format!("{object}.{property}"))
            }
            ExprKind::Index { object, index, .. } => self.gen_index(object, index, scope),
            ExprKind::Range { .. } => Ok(format!("list({})", self.gen_range_call(expr, scope)?)),
            ExprKind::Lambda(lambda) => self.gen_lambda(lambda, scope),
            ExprKind::New { class, init } => match init {
                NewInit::Args(args) => {
                    let args = self.gen_args(args, scope)?;
                    Ok(format!("{class}({})", args.join(", ")))
                }
                NewInit::Fields(fields) => {
                    let fields = self.gen_fields(fields, scope)?;
                    Ok(format!("{class}({})", fields.join(", ")))
                }
            },
            ExprKind::Finge { variant, fields } => {
                let fields = self.gen_fields(fields, scope)?;
                Ok(format!("{variant}({})", fields.join(", ")))
            }
            ExprKind::Cede(value) => {
                if scope.mode == FunctionMode::TopLevel {
                    return Err(CodegenError::misplaced("cede", "at module level", expr.span));
                }
                let value_text = self.gen_expr(value, scope)?;
                match cede(scope.mode, CedePosition::Value) {
                    CedeLowering::Item => Ok(format!(
                        "(yield {{\"op\": \"item\", \"data\": {value_text}}})"
                    )),
                    CedeLowering::Yield => Ok(format!("(yield {value_text})")),
                    CedeLowering::Await => Ok(format!("await {value_text}")),
                    CedeLowering::Invalid(context) => {
                        Err(CodegenError::misplaced("cede", context, expr.span))
                    }
                }
            }
            ExprKind::Praefixum(inner) => match consteval::evaluate(inner) {
                Some(value) => Ok(const_literal(&value)),
                None => {
                    self.require(PyFeatures::PRAEFIXUM);
                    let inner = self.gen_expr(inner, scope)?;
                    Ok(format!("_praefixum(lambda: {inner})"))
                }
            },
            ExprKind::Cast { expr: inner, .. } => self.gen_expr(inner, scope),
            ExprKind::TypeTest {
                expr: inner,
                ty,
                negated,
            } => {
                let subject = self.gen_unary_operand(inner, scope)?;
                Ok(self.type_test(&subject, ty, *negated))
            }
            ExprKind::Spread(_) => Err(CodegenError::misplaced(
                "Spread",
                "outside an argument list or array literal",
                expr.span,
            )),
        }
    }

    fn gen_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, scope: Scope) -> Result<String> {
        if op == BinaryOp::Coalesce {
            let fallback = self.gen_operand(right, op, true, scope)?;
            let value = self.gen_expr(left, scope)?;
            if left.is_simple() {
                return Ok(format!("({value} if {value} is not None else {fallback})"));
            }
            let temp = self.fresh_temp();
            return Ok(format!(
                "({temp} if ({temp} := {value}) is not None else {fallback})"
            ));
        }
        let mut left_text = self.gen_operand(left, op, false, scope)?;
        let mut right_text = self.gen_operand(right, op, true, scope)?;
        let symbol = match op {
            BinaryOp::Div if is_integer(left) && is_integer(right) => "//",
            BinaryOp::Add => {
                let known = |e: &Expr| e.ty.is_some() || e.is_simple();
                if is_text(left) && !is_text(right) && known(right) {
                    right_text = format!("str({right_text})");
                } else if is_text(right) && !is_text(left) && known(left) {
                    left_text = format!("str({left_text})");
                }
                "+"
            }
            _ => binary_symbol(op),
        };
        Ok(format!("{left_text} {symbol} {right_text}"))
    }

    fn gen_operand(
        &mut self,
        child: &Expr,
        parent: BinaryOp,
        right: bool,
        scope: Scope,
    ) -> Result<String> {
        let text = self.gen_expr(child, scope)?;
        let negation = matches!(
            child.kind,
            ExprKind::Unary {
                op: UnaryOp::Not,
                ..
            }
        ) && !matches!(parent, BinaryOp::And | BinaryOp::Or);
        Ok(if negation || operand_needs_parens(child, parent, right, RULES) {
            format!("({text})")
        } else {
            text
        })
    }

    fn gen_unary_operand(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(expr, scope)?;
        Ok(if receiver_needs_parens(expr) {
            format!("({text})")
        } else {
            text
        })
    }

    fn gen_receiver(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(expr, scope)?;
        Ok(
            if receiver_needs_parens(expr) || matches!(expr.kind, ExprKind::Int(_)) {
                format!("({text})")
            } else {
                text
            },
        )
    }

    /// Arguments or list items; spreads unpack with `*`.
    pub(super) fn gen_args(&mut self, args: &[Expr], scope: Scope) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            out.push(match &arg.kind {
                ExprKind::Spread(inner) => format!("*{}", self.gen_receiver(inner, scope)?),
                _ => self.gen_expr(arg, scope)?,
            });
        }
        Ok(out)
    }

    fn gen_fields(&mut self, fields: &[FieldInit], scope: Scope) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self.gen_expr(&field.value, scope)?;
            out.push(format!("{}={value}", field.name));
        }
        Ok(out)
    }

    fn gen_object(&mut self, entries: &[ObjectEntry], expr: &Expr, scope: Scope) -> Result<String> {
        let mut parts = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                ObjectEntry::Prop { key, value } => {
                    let value = self.gen_expr(value, scope)?;
                    parts.push(format!("{}: {value}", quote(key)));
                }
                ObjectEntry::Spread(_) => {
                    return Err(CodegenError::unsupported(
                        "spread inside an object literal",
                        Target::Python,
                        expr.span,
                    )
                    .suggest("merge maps with `conflata`"));
                }
            }
        }
        Ok(format!("{{{}}}", parts.join(", ")))
    }

    fn gen_call(&mut self, callee: &Expr, args: &[Expr], scope: Scope) -> Result<String> {
        self.gen_call_in(callee, args, scope, false)
    }

    /// `statement` is set when the call is a whole expression statement,
    /// the only place a statement-only registry rewrite may appear.
    pub(super) fn gen_call_in(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        scope: Scope,
        statement: bool,
    ) -> Result<String> {
        match &callee.kind {
            ExprKind::Ident(name) if !self.decls.is_function(name) => {
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
                    if !statement && STATEMENT_ONLY.contains(&def.name) {
                        return Err(CodegenError::unsupported(
                            format!("`{property}` used as a value"),
                            Target::Python,
                            callee.span,
                        )
                        .suggest("call it as its own statement"));
                    }
                    self.require(def.requires);
                    let receiver = self.gen_receiver(object, scope)?;
                    let args = self.gen_args(args, scope)?;
                    return Ok(def.render(&receiver, &args));
                }
            }
            _ => {}
        }
        let callee = self.gen_receiver(callee, scope)?;
        let args = self.gen_args(args, scope)?;
        Ok(format!("{callee}({})", args.join(", ")))
    }

    fn gen_index(&mut self, object: &Expr, index: &Expr, scope: Scope) -> Result<String> {
        let receiver = self.gen_receiver(object, scope)?;
        let ExprKind::Range {
            start,
            end,
            inclusive,
            step,
        } = &index.kind
        else {
            let key = self.gen_expr(index, scope)?;
            return Ok(format!("{receiver}[{key}]"));
        };
        let start = self.gen_expr(start, scope)?;
        let end = match slice_end(end, *inclusive) {
            SliceEnd::Open => String::new(),
            SliceEnd::Bound(bound) => {
                let text = self.gen_expr(end, scope)?;
                let text = if bound_needs_parens(end) {
                    format!("({text})")
                } else {
                    text
                };
                bound.render(&text)
            }
        };
        Ok(match step {
            Some(step) => format!("{receiver}[{start}:{end}:{}]", self.gen_expr(step, scope)?),
            None => format!("{receiver}[{start}:{end}]"),
        })
    }

    /// Lambda parameters carry no hints.
    fn gen_lambda_params(&mut self, params: &[Param], scope: Scope) -> Result<String> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let mut text = if param.rest {
                format!("*{}", param.name)
            } else {
                param.name.clone()
            };
            if let Some(default) = &param.default {
                text.push_str(&format!("={}", self.gen_expr(default, scope)?));
            }
            out.push(text);
        }
        Ok(out.join(", "))
    }

    /// An inline `lambda` when the body is one synchronous expression,
    /// otherwise a hoisted local `def` referenced by name.
    fn gen_lambda(&mut self, lambda: &Lambda, scope: Scope) -> Result<String> {
        let mode = FunctionMode::for_lambda(lambda.is_async);
        if let (LambdaBody::Expr(body), false) = (&lambda.body, lambda.is_async) {
            let params = self.gen_lambda_params(&lambda.params, scope)?;
            let same_depth = Scope {
                depth: scope.depth,
                mode,
                in_loop: false,
            };
            let body = self.gen_expr(body, same_depth)?;
            return Ok(if params.is_empty() {
                format!("lambda: {body}")
            } else {
                format!("lambda {params}: {body}")
            });
        }

        let name = self.fresh_lambda();
        let params = self.gen_params(&lambda.params, scope)?.join(", ");
        let inner = scope.enter_function(mode);
        let body = match &lambda.body {
            LambdaBody::Block(block) => self.gen_suite(block, inner)?,
            LambdaBody::Expr(body) => {
                let outer = std::mem::take(&mut self.hoisted);
                let text = self.gen_expr(body, inner);
                let nested = std::mem::replace(&mut self.hoisted, outer);
                let mut out = nested.concat();
                out.push_str(&self.line(inner, &format!("return {}", text?)));
                out
            }
        };
        let prefix = if lambda.is_async { "async " } else { "" };
        let mut def = self.line(scope, &format!("{prefix}def {name}({params}):"));
        def.push_str(&body);
        self.hoisted.push(def);
        Ok(name)
    }

    fn type_test(&mut self, subject: &str, ty: &TypeAnnotation, negated: bool) -> String {
        let not = if negated { "not " } else { "" };
        let class = match ty {
            TypeAnnotation::Nullable(inner) => {
                let inner = self.type_test(subject, inner, false);
                return format!("{not}({subject} is None or {inner})");
            }
            TypeAnnotation::Function { .. } => return format!("{not}callable({subject})"),
            TypeAnnotation::Named { name, .. } => match name.as_str() {
                "nihil" | "vacuum" => {
                    let is = if negated { "is not" } else { "is" };
                    return format!("{subject} {is} None");
                }
                "numerus" | "magnus" => "int",
                "fractus" => "float",
                "decimus" => {
                    self.require(PyFeatures::DECIMAL);
                    "Decimal"
                }
                "textus" => "str",
                "bivalens" => "bool",
                "lista" => "list",
                "tabula" => "dict",
                "copia" => "set",
                other => other,
            },
        };
        format!("{not}isinstance({subject}, {class})")
    }
}

fn const_literal(value: &ConstValue) -> String {
    match value {
        ConstValue::Int(v) => v.to_string(),
        ConstValue::Float(v) => float_literal(v.to_bits()),
        ConstValue::Str(s) => quote(s),
        ConstValue::Bool(true) => "True".to_string(),
        ConstValue::Bool(false) => "False".to_string(),
        ConstValue::Nihil => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::f_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn templates_become_f_strings() {
        assert_eq!(f_string("Salve ${nomen}!"), "f\"Salve {nomen}!\"");
        assert_eq!(f_string("{x} \"q\" ${a + b}"), "f\"{{x}} \\\"q\\\" {a + b}\"");
        assert_eq!(f_string("a\\nb"), "f\"a\\nb\"");
    }
}
