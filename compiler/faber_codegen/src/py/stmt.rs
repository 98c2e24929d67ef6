//! Statement lowering.

use faber_ir::{
    Access, Block, DiscerneStmt, DiscretioDecl, EligeStmt, Expr, ExprKind, FunctionDecl, GenusDecl,
    IfStmt, ImportDecl, OrdoDecl, PactumDecl, Param, Primitive, ResolvedType, ScribeLevel, Stmt,
    StmtKind, TryStmt, TypeAnnotation, UnaryOp, VarDecl,
};
use faber_stack::ensure_sufficient_stack;
use tracing::trace;

use super::{types, PyGen};
use crate::emit::{bound_needs_parens, retype_literal};
use crate::features::PyFeatures;
use crate::protocol::range::{end_bound, step_direction};
use crate::protocol::union::{plan_cases, Destructure};
use crate::protocol::verbs::{
    cede, iace, redde, wrapping, CedeLowering, CedePosition, ReturnLowering, ThrowLowering,
    Wrapping,
};
use crate::registry::receiver_kind;
use crate::scope::{FunctionMode, Scope};
use crate::{CodegenError, Target};

type Result<T> = std::result::Result<T, CodegenError>;

impl PyGen {
    /// One statement, preceded by any definitions hoisted out of it.
    pub(super) fn gen_stmt(&mut self, stmt: &Stmt, scope: Scope) -> Result<String> {
        trace!(kind = stmt.kind.kind_name(), depth = scope.depth, "py stmt");
        ensure_sufficient_stack(|| {
            let outer = std::mem::take(&mut self.hoisted);
            let text = self.gen_stmt_kind(stmt, scope);
            let hoisted = std::mem::replace(&mut self.hoisted, outer);
            let mut out = hoisted.concat();
            out.push_str(&text?);
            Ok(out)
        })
    }

    fn gen_stmts(&mut self, block: &Block, scope: Scope) -> Result<String> {
        let mut out = String::new();
        for stmt in &block.stmts {
            out.push_str(&self.gen_stmt(stmt, scope)?);
        }
        Ok(out)
    }

    /// An indented suite; `pass` when it would otherwise be empty.
    pub(super) fn gen_suite(&mut self, block: &Block, scope: Scope) -> Result<String> {
        let out = self.gen_stmts(block, scope)?;
        if out.is_empty() {
            return Ok(self.line(scope, "pass"));
        }
        Ok(out)
    }

    /// `header:` followed by its suite one level deeper.
    fn compound(&mut self, header: &str, block: &Block, scope: Scope, inner: Scope) -> Result<String> {
        let mut out = self.line(scope, &format!("{header}:"));
        out.push_str(&self.gen_suite(block, inner)?);
        Ok(out)
    }

    pub(super) fn ty(&mut self, ty: &TypeAnnotation) -> String {
        types::render(ty, &mut self.features)
    }

    fn gen_stmt_kind(&mut self, stmt: &Stmt, scope: Scope) -> Result<String> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.gen_expr_stmt(expr, scope),
            StmtKind::Var(var) => self.gen_var(var, scope),
            StmtKind::Function(function) => self.gen_function(function, scope, false),
            StmtKind::Genus(genus) => self.gen_genus(genus, scope),
            StmtKind::Pactum(pactum) => self.gen_pactum(pactum, scope),
            StmtKind::Ordo(ordo) => self.gen_ordo(ordo, scope),
            StmtKind::Discretio(discretio) => self.gen_discretio(discretio, scope),
            StmtKind::TypeAlias { name, ty } => {
                let ty = self.ty(ty);
                Ok(self.line(scope, &format!("{name} = {ty}")))
            }
            StmtKind::Import(import) => Ok(self.gen_import(import, scope)),
            StmtKind::If(if_stmt) => self.gen_if(if_stmt, scope),
            StmtKind::While { cond, body } => {
                let cond = self.gen_expr(cond, scope)?;
                self.compound(&format!("while {cond}"), body, scope, scope.enter_loop())
            }
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => {
                let iterable = match &iterable.kind {
                    ExprKind::Range { .. } => self.gen_range_call(iterable, scope)?,
                    _ => self.gen_expr(iterable, scope)?,
                };
                self.compound(
                    &format!("for {binding} in {iterable}"),
                    body,
                    scope,
                    scope.enter_loop(),
                )
            }
            StmtKind::ForIn {
                binding,
                object,
                body,
            } => {
                let object_text = self.gen_expr(object, scope)?;
                let is_record = receiver_kind(object.ty.as_ref()).is_none()
                    && object
                        .ty
                        .as_ref()
                        .is_some_and(|ty| self.decls.is_genus(ty.head_name()));
                let header = if is_record {
                    format!("for {binding} in vars({object_text})")
                } else {
                    format!("for {binding} in {object_text}")
                };
                self.compound(&header, body, scope, scope.enter_loop())
            }
            StmtKind::Discerne(discerne) => self.gen_discerne(discerne, scope),
            StmtKind::Elige(elige) => self.gen_elige(elige, scope),
            StmtKind::Return(value) => self.gen_return(value.as_ref(), stmt, scope),
            StmtKind::Break | StmtKind::Continue => {
                let (keyword, source) = if matches!(stmt.kind, StmtKind::Break) {
                    ("break", "rumpe")
                } else {
                    ("continue", "perge")
                };
                if !scope.in_loop {
                    return Err(CodegenError::misplaced(source, "outside a loop", stmt.span));
                }
                Ok(self.line(scope, keyword))
            }
            StmtKind::Throw(value) => self.gen_throw(value, scope),
            StmtKind::Panic(value) => {
                let value = self.gen_expr(value, scope)?;
                Ok(self.line(scope, &format!("raise SystemExit({value})")))
            }
            StmtKind::Try(try_stmt) => self.gen_try(try_stmt, scope),
            StmtKind::Scribe { level, args } => {
                let mut args = self.gen_args(args, scope)?;
                if *level != ScribeLevel::Scribe {
                    self.require(PyFeatures::SYS);
                    args.push("file=sys.stderr".to_string());
                }
                Ok(self.line(scope, &format!("print({})", args.join(", "))))
            }
            StmtKind::Assert { cond, message } => {
                let cond = self.gen_expr(cond, scope)?;
                let text = match message {
                    Some(message) => format!("assert {cond}, {}", self.gen_expr(message, scope)?),
                    None => format!("assert {cond}"),
                };
                Ok(self.line(scope, &text))
            }
            StmtKind::Block(block) => self.gen_stmts(block, scope),
        }
    }

    fn gen_expr_stmt(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        match &expr.kind {
            ExprKind::Cede(value) => {
                if scope.mode == FunctionMode::TopLevel {
                    return Err(CodegenError::misplaced("cede", "at module level", expr.span));
                }
                let value_text = self.gen_expr(value, scope)?;
                let text = match cede(scope.mode, CedePosition::Statement) {
                    CedeLowering::Item => format!("yield {{\"op\": \"item\", \"data\": {value_text}}}"),
                    CedeLowering::Yield => format!("yield {value_text}"),
                    CedeLowering::Await => format!("await {value_text}"),
                    CedeLowering::Invalid(context) => {
                        return Err(CodegenError::misplaced("cede", context, expr.span));
                    }
                };
                Ok(self.line(scope, &text))
            }
            ExprKind::Assign { op, target, value } => {
                let target = self.gen_expr(target, scope)?;
                let value = self.gen_expr(value, scope)?;
                Ok(self.line(scope, &format!("{target} {} {value}", op.as_symbol())))
            }
            ExprKind::Call { callee, args, .. } if !expr.has_optional_chain() => {
                let text = self.gen_call_in(callee, args, scope, true)?;
                Ok(self.line(scope, &text))
            }
            _ => {
                let text = self.gen_expr(expr, scope)?;
                Ok(self.line(scope, &text))
            }
        }
    }

    fn gen_var(&mut self, var: &VarDecl, scope: Scope) -> Result<String> {
        let annotation = match &var.ty {
            Some(ty) => format!(": {}", self.ty(ty)),
            None => String::new(),
        };
        let value = match &var.init {
            Some(init) => {
                let init = retype_literal(init, var.ty.as_ref().map(TypeAnnotation::to_resolved));
                self.gen_expr(&init, scope)?
            }
            None => "None".to_string(),
        };
        Ok(self.line(scope, &format!("{}{annotation} = {value}", var.name)))
    }

    /// Parameters with hints; a rest parameter's hint is its element type.
    pub(super) fn gen_params(&mut self, params: &[Param], scope: Scope) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let mut text = if param.rest {
                format!("*{}", param.name)
            } else {
                param.name.clone()
            };
            if let Some(ty) = &param.ty {
                text.push_str(&format!(": {}", self.ty(ty)));
            }
            if let Some(default) = &param.default {
                let default = self.gen_expr(default, scope)?;
                text.push_str(&format!(" = {default}"));
            }
            out.push(text);
        }
        Ok(out)
    }

    /// A function, or a method taking `self` when `method` is set. A missing
    /// body declares a protocol member.
    fn gen_function(&mut self, function: &FunctionDecl, scope: Scope, method: bool) -> Result<String> {
        let mode = FunctionMode::for_function(function.verb, function.modifiers);
        let mut params = self.gen_params(&function.params, scope)?;
        if method {
            params.insert(0, "self".to_string());
        }
        let params = params.join(", ");
        let ret = self.return_annotation(function, mode);
        let name = &function.name;
        let Some(body) = &function.body else {
            return Ok(self.line(scope, &format!("def {name}({params}){ret}: ...")));
        };

        let (helper, corpus) = match wrapping(mode) {
            Wrapping::None => {
                let prefix = if mode.is_async() { "async " } else { "" };
                return self.compound(
                    &format!("{prefix}def {name}({params}){ret}"),
                    body,
                    scope,
                    scope.enter_function(mode),
                );
            }
            Wrapping::Stream => {
                self.require(PyFeatures::FIUNT);
                ("_fiunt", "def __corpus():")
            }
            Wrapping::AsyncStream => {
                self.require(PyFeatures::FIENT);
                ("_fient", "async def __corpus():")
            }
        };
        let outer = scope.nested();
        let inner = scope.enter_function(mode).nested();
        let mut out = self.line(scope, &format!("def {name}({params}):"));
        out.push_str(&self.line(outer, corpus));
        out.push_str(&self.gen_stmts(body, inner)?);
        out.push_str(&self.line(inner, "yield {\"op\": \"done\"}"));
        out.push_str(&self.line(outer, &format!("return {helper}(__corpus())")));
        Ok(out)
    }

    /// ` -> T`, omitted for generators: their hint would need `Iterator`.
    fn return_annotation(&mut self, function: &FunctionDecl, mode: FunctionMode) -> String {
        let Some(ret) = &function.ret else {
            return String::new();
        };
        let generator = mode.stream_verb().is_some()
            || matches!(
                mode,
                FunctionMode::Native {
                    is_generator: true,
                    ..
                }
            );
        if generator {
            return String::new();
        }
        format!(" -> {}", self.ty(ret))
    }

    fn field_default(&mut self, default: Option<&Expr>, ty: &TypeAnnotation, scope: Scope) -> Result<String> {
        let Some(default) = default else {
            return Ok(types::zero_value(ty, &mut self.features));
        };
        let default = retype_literal(default, Some(ty.to_resolved()));
        let text = self.gen_expr(&default, scope)?;
        if matches!(default.kind, ExprKind::Array(_) | ExprKind::Object(_)) {
            self.require(PyFeatures::FIELD);
            return Ok(format!("field(default_factory=lambda: {text})"));
        }
        Ok(text)
    }

    fn gen_genus(&mut self, genus: &GenusDecl, scope: Scope) -> Result<String> {
        self.require(PyFeatures::DATACLASS);
        let bases: Vec<&str> = genus
            .base
            .iter()
            .chain(&genus.implements)
            .map(String::as_str)
            .collect();
        let header = if bases.is_empty() {
            format!("class {}:", genus.name)
        } else {
            format!("class {}({}):", genus.name, bases.join(", "))
        };
        let inner = scope.nested();
        let mut out = self.line(scope, "@dataclass");
        out.push_str(&self.line(scope, &header));
        for field in &genus.fields {
            let ty = self.ty(&field.ty);
            let default = self.field_default(field.default.as_ref(), &field.ty, inner)?;
            out.push_str(&self.line(inner, &format!("{}: {ty} = {default}", field.name)));
        }
        for (i, method) in genus.methods.iter().enumerate() {
            if i > 0 || !genus.fields.is_empty() {
                out.push('\n');
            }
            out.push_str(&self.gen_function(method, inner, true)?);
        }
        if genus.fields.is_empty() && genus.methods.is_empty() {
            out.push_str(&self.line(inner, "pass"));
        }
        Ok(out)
    }

    fn gen_pactum(&mut self, pactum: &PactumDecl, scope: Scope) -> Result<String> {
        self.require(PyFeatures::PROTOCOL);
        let inner = scope.nested();
        let mut out = self.line(scope, "@runtime_checkable");
        out.push_str(&self.line(scope, &format!("class {}(Protocol):", pactum.name)));
        for method in &pactum.methods {
            let mut declaration = method.clone();
            declaration.body = None;
            out.push_str(&self.gen_function(&declaration, inner, true)?);
        }
        if pactum.methods.is_empty() {
            out.push_str(&self.line(inner, "pass"));
        }
        Ok(out)
    }

    fn gen_ordo(&mut self, ordo: &OrdoDecl, scope: Scope) -> Result<String> {
        self.require(PyFeatures::ENUM);
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("class {}(Enum):", ordo.name));
        let mut next = Some(0_i64);
        for member in &ordo.members {
            let value = match &member.value {
                Some(value) => {
                    next = value.as_int_literal().and_then(|v| v.checked_add(1));
                    self.gen_expr(value, inner)?
                }
                None => {
                    let Some(n) = next else {
                        return Err(CodegenError::unsupported(
                            "an implicit `ordo` value after a non-integer member",
                            Target::Python,
                            member.span,
                        )
                        .suggest("give the member an explicit value"));
                    };
                    next = n.checked_add(1);
                    n.to_string()
                }
            };
            out.push_str(&self.line(inner, &format!("{} = {value}", member.name)));
        }
        if ordo.members.is_empty() {
            out.push_str(&self.line(inner, "pass"));
        }
        Ok(out)
    }

    /// One dataclass per variant, then the union alias.
    fn gen_discretio(&mut self, discretio: &DiscretioDecl, scope: Scope) -> Result<String> {
        if discretio.variants.is_empty() {
            return Ok(self.line(scope, &format!("{} = None", discretio.name)));
        }
        self.require(PyFeatures::DATACLASS);
        let inner = scope.nested();
        let mut out = String::new();
        for variant in &discretio.variants {
            out.push_str(&self.line(scope, "@dataclass"));
            out.push_str(&self.line(scope, &format!("class {}:", variant.name)));
            for field in &variant.fields {
                let ty = self.ty(&field.ty);
                out.push_str(&self.line(inner, &format!("{}: {ty}", field.name)));
            }
            if variant.fields.is_empty() {
                out.push_str(&self.line(inner, "pass"));
            }
            out.push('\n');
        }
        let names: Vec<&str> = discretio.variants.iter().map(|v| v.name.as_str()).collect();
        out.push_str(&self.line(
            scope,
            &format!("{} = {}", discretio.name, names.join(" | ")),
        ));
        Ok(out)
    }

    fn gen_import(&self, import: &ImportDecl, scope: Scope) -> String {
        let items: Vec<String> = import
            .items
            .iter()
            .map(|item| match &item.alias {
                Some(alias) => format!("{} as {alias}", item.name),
                None => item.name.clone(),
            })
            .collect();
        self.line(
            scope,
            &format!("from {} import {}", module_path(&import.path), items.join(", ")),
        )
    }

    fn gen_if(&mut self, if_stmt: &IfStmt, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = String::new();
        for (i, branch) in if_stmt.branches.iter().enumerate() {
            let cond = self.gen_expr(&branch.cond, scope)?;
            let keyword = if i == 0 { "if" } else { "elif" };
            out.push_str(&self.compound(&format!("{keyword} {cond}"), &branch.body, scope, inner)?);
        }
        if let Some(otherwise) = &if_stmt.otherwise {
            out.push_str(&self.compound("else", otherwise, scope, inner)?);
        }
        Ok(out)
    }

    /// `range(start, end[, step])` for a range expression.
    pub(super) fn gen_range_call(&mut self, range: &Expr, scope: Scope) -> Result<String> {
        let ExprKind::Range {
            start,
            end,
            inclusive,
            step,
        } = &range.kind
        else {
            return self.gen_expr(range, scope);
        };
        let direction = step_direction(step.as_deref());
        let start = self.gen_expr(start, scope)?;
        let mut end_text = self.gen_expr(end, scope)?;
        if bound_needs_parens(end) {
            end_text = format!("({end_text})");
        }
        let bound = end_bound(end, *inclusive, direction).render(&end_text);
        Ok(match step {
            Some(step) => format!("range({start}, {bound}, {})", self.gen_expr(step, scope)?),
            None => format!("range({start}, {bound})"),
        })
    }

    fn gen_discerne(&mut self, discerne: &DiscerneStmt, scope: Scope) -> Result<String> {
        let union = discerne.subject.ty.as_ref().and_then(ResolvedType::as_union);
        let plans = plan_cases(&discerne.cases, union);
        if plans.is_empty() {
            return match &discerne.otherwise {
                Some(otherwise) => self.gen_stmts(otherwise, scope),
                None => Ok(String::new()),
            };
        }
        let subject = self.gen_expr(&discerne.subject, scope)?;
        let arm = scope.nested();
        let body = arm.nested();
        let mut out = self.line(scope, &format!("match {subject}:"));
        for plan in &plans {
            let variant = plan.variant;
            let pattern = match &plan.destructure {
                Destructure::None => format!("{variant}()"),
                Destructure::Whole(name) => format!("{variant}() as {name}"),
                Destructure::ByPosition(pairs) => {
                    let fields: Vec<String> = pairs
                        .iter()
                        .map(|(binder, field)| format!("{field}={binder}"))
                        .collect();
                    format!("{variant}({})", fields.join(", "))
                }
                Destructure::ByName(names) => {
                    let fields: Vec<String> =
                        names.iter().map(|name| format!("{name}={name}")).collect();
                    format!("{variant}({})", fields.join(", "))
                }
            };
            out.push_str(&self.compound(&format!("case {pattern}"), plan.body, arm, body)?);
        }
        if let Some(otherwise) = &discerne.otherwise {
            out.push_str(&self.compound("case _", otherwise, arm, body)?);
        }
        Ok(out)
    }

    fn gen_elige(&mut self, elige: &EligeStmt, scope: Scope) -> Result<String> {
        if elige.cases.is_empty() {
            return match &elige.otherwise {
                Some(otherwise) => self.gen_stmts(otherwise, scope),
                None => Ok(String::new()),
            };
        }
        let patterns = elige
            .cases
            .iter()
            .all(|case| case.values.iter().all(is_value_pattern));
        if patterns {
            return self.gen_elige_match(elige, scope);
        }

        let subject_text = self.gen_expr(&elige.subject, scope)?;
        let mut out = String::new();
        let subject = if elige.subject.is_simple() {
            subject_text
        } else {
            let temp = self.fresh_temp();
            out.push_str(&self.line(scope, &format!("{temp} = {subject_text}")));
            temp
        };
        let inner = scope.nested();
        for (i, case) in elige.cases.iter().enumerate() {
            let mut tests = Vec::with_capacity(case.values.len());
            for value in &case.values {
                tests.push(format!("{subject} == {}", self.gen_expr(value, scope)?));
            }
            let keyword = if i == 0 { "if" } else { "elif" };
            let header = format!("{keyword} {}", tests.join(" or "));
            out.push_str(&self.compound(&header, &case.body, scope, inner)?);
        }
        if let Some(otherwise) = &elige.otherwise {
            out.push_str(&self.compound("else", otherwise, scope, inner)?);
        }
        Ok(out)
    }

    fn gen_elige_match(&mut self, elige: &EligeStmt, scope: Scope) -> Result<String> {
        let subject = self.gen_expr(&elige.subject, scope)?;
        let arm = scope.nested();
        let body = arm.nested();
        let mut out = self.line(scope, &format!("match {subject}:"));
        for case in &elige.cases {
            let mut values = Vec::with_capacity(case.values.len());
            for value in &case.values {
                values.push(self.gen_expr(value, scope)?);
            }
            out.push_str(&self.compound(
                &format!("case {}", values.join(" | ")),
                &case.body,
                arm,
                body,
            )?);
        }
        if let Some(otherwise) = &elige.otherwise {
            out.push_str(&self.compound("case _", otherwise, arm, body)?);
        }
        Ok(out)
    }

    fn gen_return(&mut self, value: Option<&Expr>, stmt: &Stmt, scope: Scope) -> Result<String> {
        if scope.mode == FunctionMode::TopLevel {
            return Err(CodegenError::misplaced("redde", "outside a function", stmt.span));
        }
        match (redde(scope.mode), value) {
            (ReturnLowering::ItemThenStop, Some(value)) => {
                let value = self.gen_expr(value, scope)?;
                let mut out =
                    self.line(scope, &format!("yield {{\"op\": \"item\", \"data\": {value}}}"));
                out.push_str(&self.line(scope, "return"));
                Ok(out)
            }
            (_, None) => Ok(self.line(scope, "return")),
            (ReturnLowering::Return, Some(value)) => {
                let value = self.gen_expr(value, scope)?;
                Ok(self.line(scope, &format!("return {value}")))
            }
        }
    }

    fn gen_throw(&mut self, value: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(value, scope)?;
        match iace(scope.mode) {
            ThrowLowering::Raise => {
                let is_message = matches!(value.kind, ExprKind::Str(_) | ExprKind::Template(_))
                    || value
                        .ty
                        .as_ref()
                        .is_some_and(|ty| ty.is_primitive(Primitive::Textus));
                let raised = if is_message {
                    format!("Exception({text})")
                } else {
                    text
                };
                Ok(self.line(scope, &format!("raise {raised}")))
            }
            ThrowLowering::ErrorThenStop => {
                let message = if value.is_str_literal() {
                    text
                } else {
                    format!("str({text})")
                };
                let mut out = self.line(
                    scope,
                    &format!("yield {{\"op\": \"error\", \"message\": {message}}}"),
                );
                out.push_str(&self.line(scope, "return"));
                Ok(out)
            }
        }
    }

    fn gen_try(&mut self, try_stmt: &TryStmt, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = self.compound("try", &try_stmt.body, scope, inner)?;
        if let Some(catch) = &try_stmt.catch {
            let header = match &catch.binding {
                Some(name) => format!("except Exception as {name}"),
                None => "except Exception".to_string(),
            };
            out.push_str(&self.compound(&header, &catch.body, scope, inner)?);
        }
        match &try_stmt.finally {
            Some(finally) => out.push_str(&self.compound("finally", finally, scope, inner)?),
            None if try_stmt.catch.is_none() => {
                out.push_str(&self.line(scope, "finally:"));
                out.push_str(&self.line(inner, "pass"));
            }
            None => {}
        }
        Ok(out)
    }
}

/// Literals and dotted names are value patterns in a `match`; anything else
/// needs an equality test.
fn is_value_pattern(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_)
        | ExprKind::Bool(_)
        | ExprKind::Nihil => true,
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } => matches!(operand.kind, ExprKind::Int(_) | ExprKind::Float(_)),
        ExprKind::Member { object, access, .. } => {
            *access == Access::Plain && is_dotted_name(object)
        }
        _ => false,
    }
}

fn is_dotted_name(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Ident(_) => true,
        ExprKind::Member { object, access, .. } => {
            *access == Access::Plain && is_dotted_name(object)
        }
        _ => false,
    }
}

/// `norma/textus` to `norma.textus`; leading `./` and `../` become
/// relative-import dots.
fn module_path(path: &str) -> String {
    let mut rest = path;
    let mut dots = 0;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            dots = dots.max(1);
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            dots = dots.max(1) + 1;
            rest = stripped;
        } else {
            break;
        }
    }
    let rest = rest.strip_suffix(".fab").unwrap_or(rest);
    format!("{}{}", ".".repeat(dots), rest.replace('/', "."))
}
