//! Expression lowering.

use faber_ir::{
    Access, AssignOp, BinaryOp, Expr, ExprKind, FieldInit, Lambda, LambdaBody, NewInit,
    ObjectEntry, Primitive, TypeAnnotation, UnaryOp,
};
use faber_stack::ensure_sufficient_stack;
use tracing::trace;

use super::{types, TsGen};
use crate::consteval::{self, ConstValue};
use crate::emit::{
    bound_needs_parens, float_literal, is_identifier, operand_needs_parens, quote,
    receiver_needs_parens, OperandRules,
};
use crate::features::TsFeatures;
use crate::protocol::optional::{chain_any, split_chain};
use crate::protocol::range::{end_bound, negative_index, slice_end, step_direction, SliceEnd};
use crate::protocol::verbs::{cede, CedeLowering, CedePosition};
use crate::registry::ts::REGISTRY;
use crate::scope::{FunctionMode, Scope};
use crate::CodegenError;

type Result<T> = std::result::Result<T, CodegenError>;

const RULES: OperandRules = OperandRules {
    comparisons_chain: false,
    coalesce_isolated: true,
};

fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Eq => "===",
        BinaryOp::NotEq => "!==",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::Coalesce => "??",
        other => other.as_symbol(),
    }
}

fn is_tabula(expr: &Expr) -> bool {
    expr.ty.as_ref().is_some_and(|ty| ty.head_name() == "tabula")
}

impl TsGen {
    pub(super) fn gen_expr(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        trace!(kind = expr.kind.kind_name(), "ts expr");
        ensure_sufficient_stack(|| {
            if let Some(guarded) = self.gen_guarded(expr, scope)? {
                return Ok(guarded);
            }
            self.gen_expr_kind(expr, scope)
        })
    }

    /// Links of an optional chain that do not lower to plain member syntax,
    /// so `?.` cannot be kept as written.
    fn is_translated_link(&self, expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::Call { callee, .. } => match &callee.kind {
                ExprKind::Member {
                    object, property, ..
                } => REGISTRY.method(object.ty.as_ref(), property).is_some(),
                ExprKind::Ident(name) => {
                    !self.decls.is_function(name) && REGISTRY.intrinsic(name).is_some()
                }
                _ => false,
            },
            ExprKind::Index { object, index, .. } => {
                matches!(index.kind, ExprKind::Range { .. })
                    || negative_index(index).is_some()
                    || is_tabula(object)
            }
            _ => false,
        }
    }

    /// Guard an optional chain once at its first optional receiver when
    /// some link of it is rewritten.
    fn gen_guarded(&mut self, expr: &Expr, scope: Scope) -> Result<Option<String>> {
        if !expr.has_optional_chain() || !chain_any(expr, &mut |e| self.is_translated_link(e)) {
            return Ok(None);
        }
        let direct = |base: &Expr| match &base.kind {
            ExprKind::Ident(name) => Some(name.clone()),
            ExprKind::Ego => Some("this".to_string()),
            _ => None,
        };
        let probe = split_chain(expr, "_");
        let Some(probe) = probe else {
            return Ok(None);
        };
        if let Some(name) = direct(&probe.base) {
            let Some(chain) = split_chain(expr, &name) else {
                return Ok(None);
            };
            let body = self.gen_expr(&chain.body, scope)?;
            return Ok(Some(format!("({name} == null ? undefined : {body})")));
        }
        let temp = self.fresh_temp();
        let Some(chain) = split_chain(expr, &temp) else {
            return Ok(None);
        };
        let base = self.gen_expr(&chain.base, scope)?;
        let body = self.gen_expr(&chain.body, scope)?;
        Ok(Some(format!(
            "(({temp}) => ({temp} == null ? undefined : {body}))({base})"
        )))
    }

    fn gen_expr_kind(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        match &expr.kind {
            ExprKind::Int(v) => Ok(
                if expr
                    .ty
                    .as_ref()
                    .is_some_and(|ty| ty.is_primitive(Primitive::Magnus))
                {
                    format!("{v}n")
                } else {
                    v.to_string()
                },
            ),
            ExprKind::Float(bits) => Ok(float_literal(*bits)),
            ExprKind::Str(s) => Ok(quote(s)),
            ExprKind::Template(raw) => Ok(format!("`{raw}`")),
            ExprKind::Bool(b) => Ok(b.to_string()),
            ExprKind::Nihil => Ok("null".to_string()),
            ExprKind::Ego => Ok("this".to_string()),
            ExprKind::Ident(name) => Ok(name.clone()),
            ExprKind::Array(items) => {
                let items = self.gen_args(items, scope)?;
                let array = format!("[{}]", items.join(", "));
                Ok(match expr.ty.as_ref().map(|ty| ty.head_name()) {
                    Some("copia") => format!("new Set({array})"),
                    Some("tabula") => format!("new Map({array})"),
                    _ => array,
                })
            }
            ExprKind::Object(entries) => self.gen_object(entries, is_tabula(expr), scope),
            ExprKind::Unary { op, operand } => {
                let operand_text = self.gen_unary_operand(operand, scope)?;
                Ok(match op {
                    UnaryOp::Neg if operand_text.starts_with('-') => format!("-({operand_text})"),
                    UnaryOp::Neg => format!("-{operand_text}"),
                    UnaryOp::Not => format!("!{operand_text}"),
                })
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.gen_operand(left, *op, false, scope)?;
                let right = self.gen_operand(right, *op, true, scope)?;
                Ok(format!("{left} {} {right}", binary_symbol(*op)))
            }
            ExprKind::Assign { op, target, value } => self.gen_assign(*op, target, value, scope),
            ExprKind::Conditional {
                cond,
                then,
                otherwise,
            } => {
                let cond_text = self.gen_expr(cond, scope)?;
                let cond_text = if matches!(
                    cond.kind,
                    ExprKind::Conditional { .. } | ExprKind::Assign { .. } | ExprKind::Lambda(_)
                ) {
                    format!("({cond_text})")
                } else {
                    cond_text
                };
                let then = self.gen_expr(then, scope)?;
                let otherwise = self.gen_expr(otherwise, scope)?;
                Ok(format!("{cond_text} ? {then} : {otherwise}"))
            }
            ExprKind::Call {
                callee,
                args,
                optional,
            } => self.gen_call(callee, args, *optional, scope),
            ExprKind::Member {
                object,
                property,
                access,
            } => {
                let object = self.gen_receiver(object, scope)?;
                Ok(match access {
                    Access::Plain => format!("{object}.{property}"),
                    Access::Optional => format!("{object}?.{property}"),
                    Access::NonNull => format!("{object}!.{property}"),
                })
            }
            ExprKind::Index {
                object,
                index,
                access,
            } => self.gen_index(object, index, *access, scope),
            ExprKind::Range {
                start,
                end,
                inclusive,
                step,
            } => {
                self.require(TsFeatures::RANGE);
                let direction = step_direction(step.as_deref());
                let start = self.gen_expr(start, scope)?;
                let end_text = self.gen_bound_text(end, scope)?;
                let bound = end_bound(end, *inclusive, direction).render(&end_text);
                match step {
                    Some(step) => {
                        let step = self.gen_expr(step, scope)?;
                        Ok(format!("__range({start}, {bound}, {step})"))
                    }
                    None => Ok(format!("__range({start}, {bound})")),
                }
            }
            ExprKind::Lambda(lambda) => self.gen_lambda(lambda, scope),
            ExprKind::New { class, init } => match init {
                NewInit::Args(args) => {
                    let args = self.gen_args(args, scope)?;
                    Ok(format!("new {class}({})", args.join(", ")))
                }
                NewInit::Fields(fields) if fields.is_empty() => Ok(format!("new {class}()")),
                NewInit::Fields(fields) => {
                    let fields = self.gen_fields(fields, scope)?;
                    Ok(format!("new {class}({{ {} }})", fields.join(", ")))
                }
            },
            ExprKind::Finge { variant, fields } => {
                let mut members = vec![format!("tag: {}", quote(variant))];
                members.extend(self.gen_fields(fields, scope)?);
                Ok(format!("{{ {} }}", members.join(", ")))
            }
            ExprKind::Cede(value) => {
                let value_text = self.gen_expr(value, scope)?;
                match cede(scope.mode, CedePosition::Value) {
                    CedeLowering::Item => Ok(format!("yield {{ op: \"item\", data: {value_text} }}")),
                    CedeLowering::Yield => Ok(format!("yield {value_text}")),
                    CedeLowering::Await => Ok(format!("await {value_text}")),
                    CedeLowering::Invalid(context) => {
                        Err(CodegenError::misplaced("cede", context, expr.span))
                    }
                }
            }
            ExprKind::Praefixum(inner) => match consteval::evaluate(inner) {
                Some(value) => Ok(const_literal(&value)),
                None => {
                    self.require(TsFeatures::PRAEFIXUM);
                    let inner = self.gen_expr(inner, scope)?;
                    Ok(format!("__praefixum(() => {inner})"))
                }
            },
            ExprKind::Cast { expr: inner, ty } => {
                let inner = self.gen_unary_operand(inner, scope)?;
                Ok(format!("{inner} as {}", types::render(ty)))
            }
            ExprKind::TypeTest {
                expr: inner,
                ty,
                negated,
            } => {
                let subject = self.gen_unary_operand(inner, scope)?;
                let test = self.type_test(&subject, ty);
                Ok(if *negated { format!("!({test})") } else { test })
            }
            ExprKind::Spread(_) => Err(CodegenError::misplaced(
                "Spread",
                "outside an argument list or array literal",
                expr.span,
            )),
        }
    }

    fn gen_operand(
        &mut self,
        child: &Expr,
        parent: BinaryOp,
        right: bool,
        scope: Scope,
    ) -> Result<String> {
        let text = self.gen_expr(child, scope)?;
        Ok(if operand_needs_parens(child, parent, right, RULES) {
            format!("({text})")
        } else {
            text
        })
    }

    /// Operand of a prefix operator, parenthesized unless atomic.
    pub(super) fn gen_unary_operand(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(expr, scope)?;
        Ok(if receiver_needs_parens(expr) {
            format!("({text})")
        } else {
            text
        })
    }

    /// Receiver of `.`, `[` or `(`.
    pub(super) fn gen_receiver(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(expr, scope)?;
        Ok(
            if receiver_needs_parens(expr) || matches!(expr.kind, ExprKind::Int(_) | ExprKind::Float(_)) {
                format!("({text})")
            } else {
                text
            },
        )
    }

    fn gen_bound_text(&mut self, end: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(end, scope)?;
        Ok(if bound_needs_parens(end) {
            format!("({text})")
        } else {
            text
        })
    }

    /// Arguments or array items; spreads keep their `...`.
    pub(super) fn gen_args(&mut self, args: &[Expr], scope: Scope) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            out.push(match &arg.kind {
                ExprKind::Spread(inner) => format!("...{}", self.gen_receiver(inner, scope)?),
                _ => self.gen_expr(arg, scope)?,
            });
        }
        Ok(out)
    }

    fn gen_fields(&mut self, fields: &[FieldInit], scope: Scope) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self.gen_expr(&field.value, scope)?;
            out.push(format!("{}: {value}", field.name));
        }
        Ok(out)
    }

    fn gen_object(&mut self, entries: &[ObjectEntry], as_map: bool, scope: Scope) -> Result<String> {
        let mut parts = Vec::with_capacity(entries.len());
        for entry in entries {
            parts.push(match entry {
                ObjectEntry::Prop { key, value } => {
                    let value = self.gen_expr(value, scope)?;
                    if as_map {
                        format!("[{}, {value}]", quote(key))
                    } else if is_identifier(key) {
                        format!("{key}: {value}")
                    } else {
                        format!("{}: {value}", quote(key))
                    }
                }
                ObjectEntry::Spread(inner) => format!("...{}", self.gen_receiver(inner, scope)?),
            });
        }
        Ok(match (as_map, parts.is_empty()) {
            (true, true) => "new Map()".to_string(),
            (true, false) => format!("new Map([{}])", parts.join(", ")),
            (false, true) => "{}".to_string(),
            (false, false) => format!("{{ {} }}", parts.join(", ")),
        })
    }

    fn gen_assign(
        &mut self,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
        scope: Scope,
    ) -> Result<String> {
        if let ExprKind::Index { object, index, .. } = &target.kind {
            if is_tabula(object) {
                let map = self.gen_receiver(object, scope)?;
                let key = self.gen_expr(index, scope)?;
                let value_text = self.gen_expr(value, scope)?;
                return Ok(match op.binary_op() {
                    None => format!("{map}.set({key}, {value_text})"),
                    Some(bin) => format!(
                        "{map}.set({key}, {map}.get({key}) {} {value_text})",
                        binary_symbol(bin)
                    ),
                });
            }
            // `.at()` is not assignable.
            if let Some(n) = negative_index(index) {
                let items = self.gen_receiver(object, scope)?;
                let value = self.gen_expr(value, scope)?;
                return Ok(format!(
                    "{items}[{items}.length - {}] {} {value}",
                    n.unsigned_abs(),
                    op.as_symbol()
                ));
            }
        }
        let target = self.gen_expr(target, scope)?;
        let value = self.gen_expr(value, scope)?;
        Ok(format!("{target} {} {value}", op.as_symbol()))
    }

    fn gen_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        optional: bool,
        scope: Scope,
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
                object,
                property,
                access,
            } => {
                if let Some(def) = REGISTRY.method(object.ty.as_ref(), property) {
                    self.require(def.requires);
                    let receiver = self.gen_receiver(object, scope)?;
                    let receiver = if *access == Access::NonNull {
                        format!("{receiver}!")
                    } else {
                        receiver
                    };
                    let args = self.gen_args(args, scope)?;
                    return Ok(def.render(&receiver, &args));
                }
            }
            _ => {}
        }
        let callee = self.gen_receiver(callee, scope)?;
        let args = self.gen_args(args, scope)?;
        let link = if optional { "?." } else { "" };
        Ok(format!("{callee}{link}({})", args.join(", ")))
    }

    fn gen_index(
        &mut self,
        object: &Expr,
        index: &Expr,
        access: Access,
        scope: Scope,
    ) -> Result<String> {
        let receiver = self.gen_receiver(object, scope)?;
        let receiver = if access == Access::NonNull {
            format!("{receiver}!")
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
            let start = self.gen_expr(start, scope)?;
            let mut out = match slice_end(end, *inclusive) {
                SliceEnd::Open => format!("{receiver}.slice({start})"),
                SliceEnd::Bound(bound) => {
                    let end_text = self.gen_bound_text(end, scope)?;
                    format!("{receiver}.slice({start}, {})", bound.render(&end_text))
                }
            };
            if let Some(step) = step {
                let step = self.gen_expr(step, scope)?;
                out.push_str(&format!(".filter((_, i) => i % {step} === 0)"));
            }
            return Ok(out);
        }
        if let Some(n) = negative_index(index) {
            return Ok(format!("{receiver}.at({n})"));
        }
        let key = self.gen_expr(index, scope)?;
        if is_tabula(object) {
            return Ok(format!("{receiver}.get({key})"));
        }
        let link = if access == Access::Optional { "?." } else { "" };
        Ok(format!("{receiver}{link}[{key}]"))
    }

    fn gen_lambda(&mut self, lambda: &Lambda, scope: Scope) -> Result<String> {
        let params = self.gen_params(&lambda.params, scope)?;
        let prefix = if lambda.is_async { "async " } else { "" };
        let inner = scope.enter_function(FunctionMode::for_lambda(lambda.is_async));
        let body = match &lambda.body {
            LambdaBody::Expr(body) => {
                let text = self.gen_expr(body, inner)?;
                if matches!(body.kind, ExprKind::Object(_)) && !is_tabula(body) {
                    format!("({text})")
                } else {
                    text
                }
            }
            LambdaBody::Block(block) => {
                let text = self.gen_block(block, inner)?;
                format!("{{\n{text}{}}}", self.indent.pad(scope.depth))
            }
        };
        Ok(format!("{prefix}({params}) => {body}"))
    }

    fn type_test(&self, subject: &str, ty: &TypeAnnotation) -> String {
        let TypeAnnotation::Named { name, .. } = ty else {
            return match ty {
                TypeAnnotation::Nullable(inner) => {
                    format!("({subject} === null || {})", self.type_test(subject, inner))
                }
                _ => format!("typeof {subject} === \"function\""),
            };
        };
        match name.as_str() {
            "numerus" | "fractus" | "decimus" => format!("typeof {subject} === \"number\""),
            "magnus" => format!("typeof {subject} === \"bigint\""),
            "textus" => format!("typeof {subject} === \"string\""),
            "bivalens" => format!("typeof {subject} === \"boolean\""),
            "nihil" => format!("{subject} === null"),
            "lista" => format!("Array.isArray({subject})"),
            "tabula" => format!("{subject} instanceof Map"),
            "copia" => format!("{subject} instanceof Set"),
            _ if self.decls.variant(name).is_some() => {
                format!("{subject}.tag === {}", quote(name))
            }
            _ if self.decls.is_pactum(name) => {
                format!("(typeof {subject} === \"object\" && {subject} !== null)")
            }
            _ => format!("{subject} instanceof {name}"),
        }
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
