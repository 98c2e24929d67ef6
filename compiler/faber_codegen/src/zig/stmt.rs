//! Statement lowering. Every statement ends in `;` or a closing brace;
//! Zig has no optional semicolons.

use faber_ir::{
    AssignOp, Block, DiscerneStmt, DiscretioDecl, EligeStmt, Expr, ExprKind, FunctionDecl,
    GenusDecl, IfStmt, ImportDecl, OrdoDecl, Param, Primitive, ReturnVerb, ScribeLevel, Span, Stmt, StmtKind,
    TypeAnnotation, VarDecl,
};
use faber_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use super::{types, ZigGen};
use crate::consteval;
use crate::emit::{bound_needs_parens, retype_literal};
use crate::features::ZigFeatures;
use crate::protocol::range::{end_bound, step_direction, step_magnitude, StepDirection};
use crate::protocol::union::{plan_cases, Destructure};
use crate::protocol::verbs::{cede, CedeLowering, CedePosition};
use crate::registry::zig::REGISTRY;
use crate::registry::{receiver_kind, ReceiverKind};
use crate::scope::{FunctionMode, Scope};
use crate::{CodegenError, Target};

type Result<T> = std::result::Result<T, CodegenError>;

/// Registry methods whose Zig rendering yields `void`.
const VOID_METHODS: &[&str] = &["adde", "praepone", "inverte", "purga", "pone"];

impl ZigGen {
    pub(super) fn gen_stmt(&mut self, stmt: &Stmt, scope: Scope) -> Result<String> {
        trace!(kind = stmt.kind.kind_name(), depth = scope.depth, "zig stmt");
        ensure_sufficient_stack(|| self.gen_stmt_kind(stmt, scope))
    }

    fn gen_stmts(&mut self, block: &Block, scope: Scope) -> Result<String> {
        let mut out = String::new();
        for stmt in &block.stmts {
            out.push_str(&self.gen_stmt(stmt, scope)?);
        }
        Ok(out)
    }

    /// `header {`, the block one level deeper, then `}` + `close`.
    fn braced(
        &mut self,
        header: &str,
        block: &Block,
        scope: Scope,
        inner: Scope,
        close: &str,
    ) -> Result<String> {
        let mut out = self.line(scope, &format!("{header} {{"));
        out.push_str(&self.gen_stmts(block, inner)?);
        out.push_str(&self.line(scope, &format!("}}{close}")));
        Ok(out)
    }

    pub(super) fn ty(&mut self, ty: &TypeAnnotation, span: Span) -> Result<String> {
        let Some(text) = types::render(ty) else {
            let err = CodegenError::unsupported(format!("the type `{ty}`"), Target::Zig, span);
            return Err(if ty.to_string().contains("decimus") {
                err.suggest("use `fractus`")
            } else {
                err
            });
        };
        if text.contains("std.") {
            self.require(ZigFeatures::STD);
        }
        Ok(text)
    }

    fn gen_stmt_kind(&mut self, stmt: &Stmt, scope: Scope) -> Result<String> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.gen_expr_stmt(expr, scope),
            StmtKind::Var(var) => self.gen_var(var, stmt.span, scope),
            StmtKind::Function(function) => self.gen_function(function, scope, None),
            StmtKind::Genus(genus) => self.gen_genus(genus, stmt.span, scope),
            StmtKind::Pactum(pactum) => {
                debug!(name = %pactum.name, "pactum has no Zig counterpart; skipped");
                Ok(String::new())
            }
            StmtKind::Ordo(ordo) => self.gen_ordo(ordo, scope),
            StmtKind::Discretio(discretio) => self.gen_discretio(discretio, stmt.span, scope),
            StmtKind::TypeAlias { name, ty } => {
                let ty = self.ty(ty, stmt.span)?;
                Ok(self.line(scope, &format!("const {name} = {ty};")))
            }
            StmtKind::Import(import) => Ok(self.gen_import(import, scope)),
            StmtKind::If(if_stmt) => self.gen_if(if_stmt, scope),
            StmtKind::While { cond, body } => {
                let cond = self.gen_expr(cond, scope)?;
                self.braced(&format!("while ({cond})"), body, scope, scope.enter_loop(), "")
            }
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => self.gen_for_of(binding, iterable, body, scope),
            StmtKind::ForIn {
                binding,
                object,
                body,
            } => {
                let kind = receiver_kind(object.ty.as_ref()).filter(|_| object.ty.is_some());
                if !matches!(kind, Some(ReceiverKind::Tabula | ReceiverKind::Copia)) {
                    return Err(CodegenError::unsupported(
                        "`de` iteration over a value not known to be a map",
                        Target::Zig,
                        object.span,
                    )
                    .suggest("declare the object as a `tabula`"));
                }
                let object = self.gen_expr(object, scope)?;
                self.gen_iterator_loop(binding, &object, "keyIterator", body, scope)
            }
            StmtKind::Discerne(discerne) => self.gen_discerne(discerne, scope),
            StmtKind::Elige(elige) => self.gen_elige(elige, scope),
            StmtKind::Return(value) => {
                if scope.mode == FunctionMode::TopLevel {
                    return Err(CodegenError::misplaced("redde", "outside a function", stmt.span));
                }
                match value {
                    Some(value) => {
                        let value = self.gen_expr(value, scope)?;
                        Ok(self.line(scope, &format!("return {value};")))
                    }
                    None => Ok(self.line(scope, "return;")),
                }
            }
            StmtKind::Break | StmtKind::Continue => {
                let (keyword, source) = if matches!(stmt.kind, StmtKind::Break) {
                    ("break;", "rumpe")
                } else {
                    ("continue;", "perge")
                };
                if !scope.in_loop {
                    return Err(CodegenError::misplaced(source, "outside a loop", stmt.span));
                }
                Ok(self.line(scope, keyword))
            }
            StmtKind::Throw(value) => {
                self.require(ZigFeatures::STD);
                let spec = self.format_spec(value);
                let text = self.gen_expr(value, scope)?;
                let mut out = self.line(scope, &format!("std.log.err(\"{spec}\", .{{{text}}});"));
                out.push_str(&self.line(scope, "return error.Iace;"));
                Ok(out)
            }
            StmtKind::Panic(value) => {
                let value = self.gen_expr(value, scope)?;
                Ok(self.line(scope, &format!("@panic({value});")))
            }
            StmtKind::Try(_) => Err(CodegenError::unsupported(
                "`tempta` blocks",
                Target::Zig,
                stmt.span,
            )
            .suggest("propagate failures with `iace` and handle them at the call site")),
            StmtKind::Scribe { level, args } => self.gen_scribe(*level, args, scope),
            StmtKind::Assert { cond, .. } => {
                self.require(ZigFeatures::STD);
                let cond = self.gen_expr(cond, scope)?;
                Ok(self.line(scope, &format!("std.debug.assert({cond});")))
            }
            StmtKind::Block(block) => {
                let mut out = self.line(scope, "{");
                out.push_str(&self.gen_stmts(block, scope.nested())?);
                out.push_str(&self.line(scope, "}"));
                Ok(out)
            }
        }
    }

    fn gen_expr_stmt(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        match &expr.kind {
            ExprKind::Cede(_) => {
                if scope.mode == FunctionMode::TopLevel {
                    return Err(CodegenError::misplaced("cede", "at module level", expr.span));
                }
                match cede(scope.mode, CedePosition::Statement) {
                    CedeLowering::Invalid(context) => {
                        Err(CodegenError::misplaced("cede", context, expr.span))
                    }
                    _ => Err(CodegenError::unsupported("`cede`", Target::Zig, expr.span)),
                }
            }
            ExprKind::Assign { op, target, value } => self.gen_assign(*op, target, value, scope),
            ExprKind::Call { callee, .. } => {
                let text = self.gen_expr(expr, scope)?;
                if self.call_yields_value(callee) {
                    Ok(self.line(scope, &format!("_ = {text};")))
                } else {
                    Ok(self.line(scope, &format!("{text};")))
                }
            }
            _ => {
                let text = self.gen_expr(expr, scope)?;
                Ok(self.line(scope, &format!("_ = {text};")))
            }
        }
    }

    /// Whether a call statement's result must be discarded explicitly.
    /// Calls to unknown functions are assumed to return `void`.
    fn call_yields_value(&self, callee: &Expr) -> bool {
        match &callee.kind {
            ExprKind::Ident(name) if self.decls.is_function(name) => {
                self.returns_value.contains(name)
            }
            ExprKind::Ident(name) => REGISTRY.intrinsic(name).is_some(),
            ExprKind::Member {
                object, property, ..
            } => match REGISTRY.method(object.ty.as_ref(), property) {
                Some(def) => !VOID_METHODS.contains(&def.name),
                None => self.returns_value.contains(property),
            },
            _ => false,
        }
    }

    fn gen_assign(&mut self, op: AssignOp, target: &Expr, value: &Expr, scope: Scope) -> Result<String> {
        if let ExprKind::Index { object, index, .. } = &target.kind {
            if receiver_kind(object.ty.as_ref()) == Some(ReceiverKind::Tabula)
                && object.ty.is_some()
            {
                let map = self.gen_receiver(object, scope)?;
                let key = self.gen_expr(index, scope)?;
                let mut value_text = self.gen_expr(value, scope)?;
                if let Some(bin) = op.binary_op() {
                    value_text = format!("{map}.get({key}).? {} {value_text}", bin.as_symbol());
                }
                return Ok(self.line(scope, &format!("try {map}.put({key}, {value_text});")));
            }
        }
        if op == AssignOp::AddAssign && expr_is_text(target) {
            return Err(CodegenError::unsupported(
                "string concatenation",
                Target::Zig,
                target.span,
            )
            .suggest("use `scriptum` or std.fmt formatting"));
        }
        let target_text = self.gen_expr(target, scope)?;
        let value_text = self.gen_expr(value, scope)?;
        let text = match op {
            AssignOp::DivAssign if expr_is_integer(target) => {
                format!("{target_text} = @divTrunc({target_text}, {value_text});")
            }
            _ => format!("{target_text} {} {value_text};", op.as_symbol()),
        };
        Ok(self.line(scope, &text))
    }

    fn gen_var(&mut self, var: &VarDecl, span: Span, scope: Scope) -> Result<String> {
        let mutable = self.mutated.contains(&var.name);
        let keyword = if mutable { "var" } else { "const" };
        let declared = match &var.ty {
            Some(ty) => Some(self.ty(ty, span)?),
            None => None,
        };
        let init = var
            .init
            .as_ref()
            .map(|init| retype_literal(init, var.ty.as_ref().map(TypeAnnotation::to_resolved)));
        // Comptime literals cannot back a runtime `var`.
        let annotation = declared.or_else(|| match &init {
            Some(init) if mutable && init.as_int_literal().is_some() => Some("i64".to_string()),
            Some(Expr {
                kind: ExprKind::Float(_),
                ..
            }) if mutable => Some("f64".to_string()),
            _ => None,
        });
        let value = match (&init, &annotation) {
            (Some(init), _) => self.gen_expr(init, scope)?,
            (None, Some(_)) => "undefined".to_string(),
            (None, None) => {
                return Err(CodegenError::unsupported(
                    "a declaration without a type or a value",
                    Target::Zig,
                    span,
                )
                .suggest("annotate the declaration with its type"));
            }
        };
        let text = match annotation {
            Some(ty) => format!("{keyword} {}: {ty} = {value};", var.name),
            None => format!("{keyword} {} = {value};", var.name),
        };
        Ok(self.line(scope, &text))
    }

    fn gen_params(&mut self, params: &[Param]) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            if param.rest {
                return Err(CodegenError::unsupported(
                    "rest parameters",
                    Target::Zig,
                    param.span,
                )
                .suggest("take a `lista` parameter"));
            }
            if param.default.is_some() {
                return Err(CodegenError::unsupported(
                    "default parameter values",
                    Target::Zig,
                    param.span,
                )
                .suggest("pass the value explicitly at each call site"));
            }
            let ty = match &param.ty {
                Some(ty) => self.ty(ty, param.span)?,
                None => "anytype".to_string(),
            };
            out.push(format!("{}: {ty}", param.name));
        }
        Ok(out)
    }

    /// A container-level function, or a method of `owner`.
    fn gen_function(
        &mut self,
        function: &FunctionDecl,
        scope: Scope,
        owner: Option<&str>,
    ) -> Result<String> {
        let mode = FunctionMode::for_function(function.verb, function.modifiers);
        match mode {
            FunctionMode::Verb(ReturnVerb::Fit)
            | FunctionMode::Native {
                is_async: false,
                is_generator: false,
            } => {}
            FunctionMode::Verb(verb) => {
                return Err(CodegenError::unsupported(
                    format!("`{}` functions", verb.keyword()),
                    Target::Zig,
                    function.span,
                )
                .suggest("return a `lista` from a `fit` function"));
            }
            _ => {
                return Err(CodegenError::unsupported(
                    "`futura` and `cursor` functions",
                    Target::Zig,
                    function.span,
                ));
            }
        }
        let Some(body) = &function.body else {
            return Ok(String::new());
        };
        let mut params = self.gen_params(&function.params)?;
        if let Some(owner) = owner {
            let pointer = if self.mutating_methods.contains(&function.name) {
                "*"
            } else {
                "*const "
            };
            params.insert(0, format!("self: {pointer}{owner}"));
        }
        let ret = match &function.ret {
            Some(ret) => self.ty(ret, function.span)?,
            None => "void".to_string(),
        };
        let visibility = if owner.is_some() { "pub " } else { "" };
        let header = format!(
            "{visibility}fn {}({}) !{ret}",
            function.name,
            params.join(", ")
        );
        self.braced(&header, body, scope, scope.enter_function(mode), "")
    }

    fn gen_genus(&mut self, genus: &GenusDecl, span: Span, scope: Scope) -> Result<String> {
        if genus.base.is_some() {
            return Err(CodegenError::unsupported("`sub` inheritance", Target::Zig, span)
                .suggest("embed the base genus as a field"));
        }
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("const {} = struct {{", genus.name));
        for field in &genus.fields {
            let ty = self.ty(&field.ty, field.span)?;
            let text = match &field.default {
                Some(default) => {
                    if consteval::evaluate(default).is_none() {
                        return Err(CodegenError::unsupported(
                            "a field default computed at run time",
                            Target::Zig,
                            field.span,
                        )
                        .suggest("set the field in `novum`"));
                    }
                    let default = self.gen_expr(default, inner)?;
                    format!("{}: {ty} = {default},", field.name)
                }
                None => format!("{}: {ty},", field.name),
            };
            out.push_str(&self.line(inner, &text));
        }
        for (i, method) in genus.methods.iter().enumerate() {
            if i > 0 || !genus.fields.is_empty() {
                out.push('\n');
            }
            out.push_str(&self.gen_function(method, inner, Some(&genus.name))?);
        }
        out.push_str(&self.line(scope, "};"));
        Ok(out)
    }

    fn gen_ordo(&mut self, ordo: &OrdoDecl, scope: Scope) -> Result<String> {
        let explicit = ordo.members.iter().any(|m| m.value.is_some());
        let tag = if explicit { "enum(i64)" } else { "enum" };
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("const {} = {tag} {{", ordo.name));
        for member in &ordo.members {
            let text = match &member.value {
                Some(value) if value.as_int_literal().is_some() => {
                    format!("{} = {},", member.name, self.gen_expr(value, inner)?)
                }
                Some(_) => {
                    return Err(CodegenError::unsupported(
                        "non-integer `ordo` values",
                        Target::Zig,
                        member.span,
                    )
                    .suggest("give the member an integer value"));
                }
                None => format!("{},", member.name),
            };
            out.push_str(&self.line(inner, &text));
        }
        out.push_str(&self.line(scope, "};"));
        Ok(out)
    }

    /// A tagged union; each variant's payload is an anonymous struct.
    fn gen_discretio(&mut self, discretio: &DiscretioDecl, span: Span, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("const {} = union(enum) {{", discretio.name));
        for variant in &discretio.variants {
            let payload = if variant.fields.is_empty() {
                "void".to_string()
            } else {
                let mut fields = Vec::with_capacity(variant.fields.len());
                for field in &variant.fields {
                    fields.push(format!("{}: {}", field.name, self.ty(&field.ty, span)?));
                }
                format!("struct {{ {} }}", fields.join(", "))
            };
            out.push_str(&self.line(inner, &format!("{}: {payload},", variant.name)));
        }
        out.push_str(&self.line(scope, "};"));
        Ok(out)
    }

    fn gen_import(&self, import: &ImportDecl, scope: Scope) -> String {
        let path = import.path.strip_suffix(".fab").unwrap_or(&import.path);
        let module = module_name(path);
        let mut out = self.line(scope, &format!("const {module} = @import(\"{path}.zig\");"));
        for item in &import.items {
            let local = item.alias.as_deref().unwrap_or(&item.name);
            out.push_str(&self.line(scope, &format!("const {local} = {module}.{};", item.name)));
        }
        out
    }

    fn gen_if(&mut self, if_stmt: &IfStmt, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = String::new();
        for (i, branch) in if_stmt.branches.iter().enumerate() {
            let cond = self.gen_expr(&branch.cond, scope)?;
            let header = if i == 0 {
                format!("if ({cond}) {{")
            } else {
                format!("}} else if ({cond}) {{")
            };
            out.push_str(&self.line(scope, &header));
            out.push_str(&self.gen_stmts(&branch.body, inner)?);
        }
        if let Some(otherwise) = &if_stmt.otherwise {
            out.push_str(&self.line(scope, "} else {"));
            out.push_str(&self.gen_stmts(otherwise, inner)?);
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_for_of(&mut self, binding: &str, iterable: &Expr, body: &Block, scope: Scope) -> Result<String> {
        if let ExprKind::Range {
            start,
            end,
            inclusive,
            step,
        } = &iterable.kind
        {
            return self.gen_range_loop(binding, (start, end, *inclusive, step.as_deref()), body, scope);
        }
        let kind = iterable
            .ty
            .as_ref()
            .and_then(|ty| receiver_kind(Some(ty)));
        let text = self.gen_receiver(iterable, scope)?;
        match kind {
            Some(ReceiverKind::Copia) => {
                self.gen_iterator_loop(binding, &text, "keyIterator", body, scope)
            }
            Some(ReceiverKind::Tabula) => {
                self.gen_iterator_loop(binding, &text, "valueIterator", body, scope)
            }
            Some(ReceiverKind::Lista) => self.braced(
                &format!("for ({text}.items) |{binding}|"),
                body,
                scope,
                scope.enter_loop(),
                "",
            ),
            _ => self.braced(
                &format!("for ({text}) |{binding}|"),
                body,
                scope,
                scope.enter_loop(),
                "",
            ),
        }
    }

    /// A counting `while` in its own block so the counter stays local.
    fn gen_range_loop(
        &mut self,
        binding: &str,
        (start, end, inclusive, step): (&Expr, &Expr, bool, Option<&Expr>),
        body: &Block,
        scope: Scope,
    ) -> Result<String> {
        let direction = step_direction(step);
        let start = self.gen_expr(start, scope)?;
        let mut end_text = self.gen_expr(end, scope)?;
        if bound_needs_parens(end) {
            end_text = format!("({end_text})");
        }
        let bound = end_bound(end, inclusive, direction).render(&end_text);
        let (compare, advance) = match (direction, step) {
            (StepDirection::Descending, Some(step)) => {
                let magnitude = match step_magnitude(step) {
                    Some(m) => m.to_string(),
                    None => self.gen_expr(step, scope)?,
                };
                (">", format!("{binding} -= {magnitude}"))
            }
            (StepDirection::Ascending, Some(step)) => {
                ("<", format!("{binding} += {}", self.gen_expr(step, scope)?))
            }
            (_, None) => ("<", format!("{binding} += 1")),
        };
        let outer = scope.nested();
        let mut out = self.line(scope, "{");
        out.push_str(&self.line(outer, &format!("var {binding}: i64 = {start};")));
        out.push_str(&self.braced(
            &format!("while ({binding} {compare} {bound}) : ({advance})"),
            body,
            outer,
            outer.enter_loop(),
            "",
        )?);
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    /// Iterate a hash map through one of its pointer iterators.
    fn gen_iterator_loop(
        &mut self,
        binding: &str,
        map: &str,
        iterator: &str,
        body: &Block,
        scope: Scope,
    ) -> Result<String> {
        let it = self.fresh_temp();
        let item = self.fresh_temp();
        let outer = scope.nested();
        let inner = outer.enter_loop();
        let mut out = self.line(scope, "{");
        out.push_str(&self.line(outer, &format!("var {it} = {map}.{iterator}();")));
        out.push_str(&self.line(outer, &format!("while ({it}.next()) |{item}| {{")));
        out.push_str(&self.line(inner, &format!("const {binding} = {item}.*;")));
        out.push_str(&self.gen_stmts(body, inner)?);
        out.push_str(&self.line(outer, "}"));
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_discerne(&mut self, discerne: &DiscerneStmt, scope: Scope) -> Result<String> {
        let union = discerne.subject.ty.as_ref().and_then(|ty| ty.as_union());
        let plans = plan_cases(&discerne.cases, union);
        if plans.is_empty() {
            return match &discerne.otherwise {
                Some(otherwise) => self.gen_stmts(otherwise, scope),
                None => Ok(String::new()),
            };
        }
        let union_name = union.map(|u| u.name.clone()).or_else(|| {
            self.decls
                .variant(plans[0].variant)
                .map(|info| info.union.clone())
        });
        let complete = union_name
            .as_deref()
            .and_then(|name| self.decls.union_variants(name))
            .is_some_and(|variants| {
                variants
                    .iter()
                    .all(|v| plans.iter().any(|plan| plan.variant == v.as_str()))
            });

        let subject = self.gen_expr(&discerne.subject, scope)?;
        let arm = scope.nested();
        let body = arm.nested();
        let mut out = self.line(scope, &format!("switch ({subject}) {{"));
        for plan in &plans {
            let variant = plan.variant;
            let (capture, bindings) = match &plan.destructure {
                Destructure::None => (String::new(), Vec::new()),
                Destructure::Whole(name) => (format!(" |{name}|"), Vec::new()),
                Destructure::ByPosition(pairs) => {
                    let payload = self.fresh_temp();
                    let lines = pairs
                        .iter()
                        .map(|(binder, field)| format!("const {binder} = {payload}.{field};"))
                        .collect();
                    (format!(" |{payload}|"), lines)
                }
                Destructure::ByName(names) => {
                    let payload = self.fresh_temp();
                    let lines = names
                        .iter()
                        .map(|name| format!("const {name} = {payload}.{name};"))
                        .collect();
                    (format!(" |{payload}|"), lines)
                }
            };
            out.push_str(&self.line(arm, &format!(".{variant} =>{capture} {{")));
            for binding in bindings {
                out.push_str(&self.line(body, &binding));
            }
            out.push_str(&self.gen_stmts(plan.body, body)?);
            out.push_str(&self.line(arm, "},"));
        }
        match &discerne.otherwise {
            Some(otherwise) => {
                out.push_str(&self.braced("else =>", otherwise, arm, body, ",")?);
            }
            None if !complete => out.push_str(&self.line(arm, "else => {},")),
            None => {}
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_elige(&mut self, elige: &EligeStmt, scope: Scope) -> Result<String> {
        let strings = expr_is_text(&elige.subject)
            || elige
                .cases
                .iter()
                .any(|case| case.values.iter().any(expr_is_text));
        if strings {
            return Err(CodegenError::unsupported(
                "`elige` over strings",
                Target::Zig,
                elige.subject.span,
            )
            .suggest("compare with `si` chains"));
        }
        if elige.cases.is_empty() {
            return match &elige.otherwise {
                Some(otherwise) => self.gen_stmts(otherwise, scope),
                None => Ok(String::new()),
            };
        }
        let subject = self.gen_expr(&elige.subject, scope)?;
        let arm = scope.nested();
        let body = arm.nested();
        let mut out = self.line(scope, &format!("switch ({subject}) {{"));
        for case in &elige.cases {
            let mut values = Vec::with_capacity(case.values.len());
            for value in &case.values {
                values.push(self.gen_expr(value, scope)?);
            }
            out.push_str(&self.braced(&format!("{} =>", values.join(", ")), &case.body, arm, body, ",")?);
        }
        match &elige.otherwise {
            Some(otherwise) => out.push_str(&self.braced("else =>", otherwise, arm, body, ",")?),
            None => out.push_str(&self.line(arm, "else => {},")),
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_scribe(&mut self, level: ScribeLevel, args: &[Expr], scope: Scope) -> Result<String> {
        self.require(ZigFeatures::STD);
        let mut specs = Vec::with_capacity(args.len());
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            specs.push(self.format_spec(arg));
            values.push(self.gen_expr(arg, scope)?);
        }
        let format = specs.join(" ");
        let tuple = if values.is_empty() {
            ".{}".to_string()
        } else {
            format!(".{{ {} }}", values.join(", "))
        };
        let text = match level {
            ScribeLevel::Scribe => format!("std.debug.print(\"{format}\\n\", {tuple});"),
            ScribeLevel::Vide => format!("std.log.debug(\"{format}\", {tuple});"),
            ScribeLevel::Mone => format!("std.log.warn(\"{format}\", {tuple});"),
        };
        Ok(self.line(scope, &text))
    }

    /// `std.fmt` placeholder for one printed value.
    fn format_spec(&self, expr: &Expr) -> &'static str {
        if expr_is_text(expr) {
            "{s}"
        } else if expr_is_number(expr) {
            "{d}"
        } else {
            "{any}"
        }
    }
}

pub(super) fn expr_is_text(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Str(_) | ExprKind::Template(_))
        || expr
            .ty
            .as_ref()
            .is_some_and(|ty| ty.is_primitive(Primitive::Textus))
}

pub(super) fn expr_is_integer(expr: &Expr) -> bool {
    expr.as_int_literal().is_some()
        || expr.ty.as_ref().is_some_and(|ty| {
            ty.is_primitive(Primitive::Numerus) || ty.is_primitive(Primitive::Magnus)
        })
}

fn expr_is_number(expr: &Expr) -> bool {
    expr_is_integer(expr)
        || matches!(expr.kind, ExprKind::Float(_))
        || expr
            .ty
            .as_ref()
            .is_some_and(|ty| ty.is_primitive(Primitive::Fractus))
}

/// Container name for an imported file: its last path segment.
fn module_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    last.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::module_name;

    #[test]
    fn import_paths_name_their_container() {
        assert_eq!(module_name("norma/textus"), "textus");
        assert_eq!(module_name("./util-io"), "util_io");
    }
}
