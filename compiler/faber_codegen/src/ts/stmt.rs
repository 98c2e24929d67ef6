//! Statement lowering.

use faber_ir::{
    Block, DiscerneStmt, DiscretioDecl, EligeStmt, Expr, ExprKind, FunctionDecl, GenusDecl,
    IfStmt, ImportDecl, OrdoDecl, PactumDecl, Primitive, ResolvedType, ReturnVerb, ScribeLevel,
    Stmt, StmtKind, TryStmt, TypeAnnotation, VarDecl,
};
use faber_stack::ensure_sufficient_stack;
use tracing::trace;

use super::{types, TsGen};
use crate::emit::{bound_needs_parens, quote, retype_literal};
use crate::features::TsFeatures;
use crate::protocol::range::{end_bound, step_direction, step_magnitude, StepDirection};
use crate::protocol::union::{plan_cases, Destructure};
use crate::protocol::verbs::{
    cede, iace, redde, wrapping, CedeLowering, CedePosition, ReturnLowering, ThrowLowering,
    Wrapping,
};
use crate::registry::{receiver_kind, ReceiverKind};
use crate::scope::{FunctionMode, Scope};
use crate::CodegenError;

type Result<T> = std::result::Result<T, CodegenError>;

impl TsGen {
    pub(super) fn gen_stmt(&mut self, stmt: &Stmt, scope: Scope) -> Result<String> {
        trace!(kind = stmt.kind.kind_name(), depth = scope.depth, "ts stmt");
        ensure_sufficient_stack(|| self.gen_stmt_kind(stmt, scope))
    }

    pub(super) fn gen_block(&mut self, block: &Block, scope: Scope) -> Result<String> {
        let mut out = String::new();
        for stmt in &block.stmts {
            out.push_str(&self.gen_stmt(stmt, scope)?);
        }
        Ok(out)
    }

    /// `header {` body `}` with the body one level deeper.
    fn braced(&mut self, header: &str, block: &Block, scope: Scope, inner: Scope) -> Result<String> {
        let mut out = self.line(scope, &format!("{header} {{"));
        out.push_str(&self.gen_block(block, inner)?);
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_stmt_kind(&mut self, stmt: &Stmt, scope: Scope) -> Result<String> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.gen_expr_stmt(expr, scope),
            StmtKind::Var(var) => self.gen_var(var, scope),
            StmtKind::Function(function) => self.gen_function(function, scope, None),
            StmtKind::Genus(genus) => self.gen_genus(genus, scope),
            StmtKind::Pactum(pactum) => self.gen_pactum(pactum, scope),
            StmtKind::Ordo(ordo) => self.gen_ordo(ordo, scope),
            StmtKind::Discretio(discretio) => Ok(self.gen_discretio(discretio, scope)),
            StmtKind::TypeAlias { name, ty } => {
                let ty = types::render(ty);
                Ok(self.stmt_line(scope, &format!("type {name} = {ty}")))
            }
            StmtKind::Import(import) => Ok(self.gen_import(import, scope)),
            StmtKind::If(if_stmt) => self.gen_if(if_stmt, scope),
            StmtKind::While { cond, body } => {
                let cond = self.gen_expr(cond, scope)?;
                self.braced(&format!("while ({cond})"), body, scope, scope.enter_loop())
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
                let object_text = self.gen_receiver(object, scope)?;
                let header = if receiver_kind(object.ty.as_ref()) == Some(ReceiverKind::Tabula) {
                    format!("for (const {binding} of {object_text}.keys())")
                } else {
                    format!("for (const {binding} in {object_text})")
                };
                self.braced(&header, body, scope, scope.enter_loop())
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
                Ok(self.stmt_line(scope, keyword))
            }
            StmtKind::Throw(value) => self.gen_throw(value, scope),
            StmtKind::Panic(value) => {
                let value = self.error_value(value, scope)?;
                Ok(self.stmt_line(scope, &format!("throw {value}")))
            }
            StmtKind::Try(try_stmt) => self.gen_try(try_stmt, scope),
            StmtKind::Scribe { level, args } => {
                let method = match level {
                    ScribeLevel::Scribe => "log",
                    ScribeLevel::Vide => "debug",
                    ScribeLevel::Mone => "warn",
                };
                let args = self.gen_args(args, scope)?;
                Ok(self.stmt_line(scope, &format!("console.{method}({})", args.join(", "))))
            }
            StmtKind::Assert { cond, message } => {
                let cond = self.gen_unary_operand(cond, scope)?;
                let message = match message {
                    Some(message) => self.gen_expr(message, scope)?,
                    None => quote("assertion failed"),
                };
                Ok(self.stmt_line(
                    scope,
                    &format!("if (!{cond}) throw new Error({message})"),
                ))
            }
            StmtKind::Block(block) => {
                let mut out = self.line(scope, "{");
                out.push_str(&self.gen_block(block, scope.nested())?);
                out.push_str(&self.line(scope, "}"));
                Ok(out)
            }
        }
    }

    fn gen_expr_stmt(&mut self, expr: &Expr, scope: Scope) -> Result<String> {
        if let ExprKind::Cede(value) = &expr.kind {
            let value_text = self.gen_expr(value, scope)?;
            let text = match cede(scope.mode, CedePosition::Statement) {
                CedeLowering::Item => format!("yield {{ op: \"item\", data: {value_text} }}"),
                CedeLowering::Yield => format!("yield {value_text}"),
                CedeLowering::Await => format!("await {value_text}"),
                CedeLowering::Invalid(context) => {
                    return Err(CodegenError::misplaced("cede", context, expr.span));
                }
            };
            return Ok(self.stmt_line(scope, &text));
        }
        let text = self.gen_expr(expr, scope)?;
        let text = if matches!(expr.kind, ExprKind::Object(_) | ExprKind::Lambda(_)) {
            format!("({text})")
        } else {
            text
        };
        Ok(self.stmt_line(scope, &text))
    }

    fn gen_var(&mut self, var: &VarDecl, scope: Scope) -> Result<String> {
        let keyword = if var.mutable { "let" } else { "const" };
        let annotation = var
            .ty
            .as_ref()
            .map(|ty| format!(": {}", types::render(ty)))
            .unwrap_or_default();
        let text = match &var.init {
            Some(init) => {
                let init = retype_literal(init, var.ty.as_ref().map(TypeAnnotation::to_resolved));
                let value = self.gen_expr(&init, scope)?;
                format!("{keyword} {}{annotation} = {value}", var.name)
            }
            None => format!("let {}{annotation}", var.name),
        };
        Ok(self.stmt_line(scope, &text))
    }

    pub(super) fn gen_params(
        &mut self,
        params: &[faber_ir::Param],
        scope: Scope,
    ) -> Result<String> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let mut text = if param.rest {
                format!("...{}", param.name)
            } else {
                param.name.clone()
            };
            if let Some(ty) = &param.ty {
                let ty = types::render(ty);
                if param.rest {
                    text.push_str(&format!(": {}[]", types::array_element(&ty)));
                } else {
                    text.push_str(&format!(": {ty}"));
                }
            }
            if let Some(default) = &param.default {
                let default = self.gen_expr(default, scope)?;
                text.push_str(&format!(" = {default}"));
            }
            out.push(text);
        }
        Ok(out.join(", "))
    }

    /// A function declaration, or a class method when `owner` names the class.
    pub(super) fn gen_function(
        &mut self,
        function: &FunctionDecl,
        scope: Scope,
        owner: Option<&str>,
    ) -> Result<String> {
        let mode = FunctionMode::for_function(function.verb, function.modifiers);
        let params = self.gen_params(&function.params, scope)?;
        let ret = return_annotation(function, mode);
        let name = &function.name;
        let Some(body) = &function.body else {
            return Ok(self.stmt_line(scope, &format!("{name}({params}){ret}")));
        };
        let keyword = if owner.is_some() { "" } else { "function" };

        let (wrapper, generator) = match wrapping(mode) {
            Wrapping::None => {
                let is_generator = matches!(
                    mode,
                    FunctionMode::Native {
                        is_generator: true,
                        ..
                    }
                );
                let prefix = if mode.is_async() { "async " } else { "" };
                let header = match (owner, is_generator) {
                    (Some(_), true) => format!("{prefix}*{name}({params}){ret}"),
                    (Some(_), false) => format!("{prefix}{name}({params}){ret}"),
                    (None, true) => format!("{prefix}{keyword}* {name}({params}){ret}"),
                    (None, false) => format!("{prefix}{keyword} {name}({params}){ret}"),
                };
                return self.braced(&header, body, scope, scope.enter_function(mode));
            }
            Wrapping::Stream => {
                self.require(TsFeatures::RESPONSUM | TsFeatures::FIUNT);
                ("__fiunt", "function*")
            }
            Wrapping::AsyncStream => {
                self.require(TsFeatures::RESPONSUM | TsFeatures::FIENT);
                ("__fient", "async function*")
            }
        };

        let header = match owner {
            Some(_) => format!("{name}({params}){ret}"),
            None => format!("{keyword} {name}({params}){ret}"),
        };
        let outer = scope.nested();
        let inner = scope.enter_function(mode).nested();
        let this_param = owner.map(|class| format!("this: {class}")).unwrap_or_default();
        let mut out = self.line(scope, &format!("{header} {{"));
        out.push_str(&self.line(
            outer,
            &format!("return {wrapper}(({generator} ({this_param}) {{"),
        ));
        out.push_str(&self.gen_block(body, inner)?);
        out.push_str(&self.stmt_line(inner, "yield { op: \"done\" }"));
        out.push_str(&self.stmt_line(outer, "}).call(this))"));
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_genus(&mut self, genus: &GenusDecl, scope: Scope) -> Result<String> {
        let mut header = format!("class {}", genus.name);
        if let Some(base) = &genus.base {
            header.push_str(&format!(" extends {base}"));
        }
        if !genus.implements.is_empty() {
            header.push_str(&format!(" implements {}", genus.implements.join(", ")));
        }
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("{header} {{"));
        for field in &genus.fields {
            let ty = types::render(&field.ty);
            let text = match &field.default {
                Some(default) => {
                    let default =
                        retype_literal(default, Some(field.ty.to_resolved()));
                    let value = self.gen_expr(&default, inner)?;
                    format!("{}: {ty} = {value}", field.name)
                }
                None => format!("{}!: {ty}", field.name),
            };
            out.push_str(&self.stmt_line(inner, &text));
        }

        if !genus.fields.is_empty() {
            out.push('\n');
        }
        let body = inner.nested();
        out.push_str(&self.line(
            inner,
            &format!("constructor(init: Partial<{}> = {{}}) {{", genus.name),
        ));
        if genus.base.is_some() {
            out.push_str(&self.stmt_line(body, "super(init)"));
        }
        out.push_str(&self.stmt_line(body, "Object.assign(this, init)"));
        out.push_str(&self.line(inner, "}"));

        for method in &genus.methods {
            out.push('\n');
            out.push_str(&self.gen_function(method, inner, Some(&genus.name))?);
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_pactum(&mut self, pactum: &PactumDecl, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("interface {} {{", pactum.name));
        for method in &pactum.methods {
            let params = self.gen_params(&method.params, inner)?;
            let mode = FunctionMode::for_function(method.verb, method.modifiers);
            let ret = match return_annotation(method, mode) {
                ret if ret.is_empty() => ": void".to_string(),
                ret => ret,
            };
            out.push_str(&self.line(inner, &format!("{}({params}){ret};", method.name)));
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_ordo(&mut self, ordo: &OrdoDecl, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("enum {} {{", ordo.name));
        for member in &ordo.members {
            let text = match &member.value {
                Some(value) => format!("{} = {},", member.name, self.gen_expr(value, inner)?),
                None => format!("{},", member.name),
            };
            out.push_str(&self.line(inner, &text));
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_discretio(&mut self, discretio: &DiscretioDecl, scope: Scope) -> String {
        if discretio.variants.is_empty() {
            return self.stmt_line(scope, &format!("type {} = never", discretio.name));
        }
        let inner = scope.nested();
        let mut out = self.line(scope, &format!("type {} =", discretio.name));
        let last = discretio.variants.len() - 1;
        for (i, variant) in discretio.variants.iter().enumerate() {
            let mut members = vec![format!("tag: {}", quote(&variant.name))];
            for field in &variant.fields {
                members.push(format!("{}: {}", field.name, types::render(&field.ty)));
            }
            let end = if i == last { self.semi() } else { "" };
            out.push_str(&self.line(inner, &format!("| {{ {} }}{end}", members.join("; "))));
        }
        out
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
        self.stmt_line(
            scope,
            &format!("import {{ {} }} from {}", items.join(", "), quote(&import.path)),
        )
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
            out.push_str(&self.gen_block(&branch.body, inner)?);
        }
        if let Some(otherwise) = &if_stmt.otherwise {
            out.push_str(&self.line(scope, "} else {"));
            out.push_str(&self.gen_block(otherwise, inner)?);
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_for_of(
        &mut self,
        binding: &str,
        iterable: &Expr,
        body: &Block,
        scope: Scope,
    ) -> Result<String> {
        let ExprKind::Range {
            start,
            end,
            inclusive,
            step,
        } = &iterable.kind
        else {
            let iterable = self.gen_expr(iterable, scope)?;
            return self.braced(
                &format!("for (const {binding} of {iterable})"),
                body,
                scope,
                scope.enter_loop(),
            );
        };

        let direction = step_direction(step.as_deref());
        let start = self.gen_expr(start, scope)?;
        let mut end_text = self.gen_expr(end, scope)?;
        if bound_needs_parens(end) {
            end_text = format!("({end_text})");
        }
        let bound = end_bound(end, *inclusive, direction).render(&end_text);
        let (cmp, update) = match (direction, step) {
            (StepDirection::Ascending, None) => ("<", format!("{binding}++")),
            (StepDirection::Ascending, Some(step)) => {
                ("<", format!("{binding} += {}", self.gen_expr(step, scope)?))
            }
            (StepDirection::Descending, Some(step)) => match step_magnitude(step) {
                Some(m) => (">", format!("{binding} -= {m}")),
                None => (">", format!("{binding} += {}", self.gen_expr(step, scope)?)),
            },
            (StepDirection::Descending, None) => (">", format!("{binding}--")),
        };
        self.braced(
            &format!("for (let {binding} = {start}; {binding} {cmp} {bound}; {update})"),
            body,
            scope,
            scope.enter_loop(),
        )
    }

    /// Bind a non-trivial subject to a temporary so it is evaluated once.
    fn bind_subject(&mut self, subject: &Expr, scope: Scope) -> Result<(String, String)> {
        let text = self.gen_expr(subject, scope)?;
        if subject.is_simple() {
            return Ok((String::new(), text));
        }
        let temp = self.fresh_temp();
        let prefix = self.stmt_line(scope, &format!("const {temp} = {text}"));
        Ok((prefix, temp))
    }

    fn gen_discerne(&mut self, discerne: &DiscerneStmt, scope: Scope) -> Result<String> {
        let (mut out, subject) = self.bind_subject(&discerne.subject, scope)?;
        let union = discerne.subject.ty.as_ref().and_then(ResolvedType::as_union);
        let plans = plan_cases(&discerne.cases, union);
        let inner = scope.nested();

        if plans.is_empty() {
            return match &discerne.otherwise {
                Some(otherwise) => {
                    out.push_str(&self.line(scope, "{"));
                    out.push_str(&self.gen_block(otherwise, inner)?);
                    out.push_str(&self.line(scope, "}"));
                    Ok(out)
                }
                None => Ok(out),
            };
        }

        for (i, plan) in plans.iter().enumerate() {
            let test = format!("{subject}.tag === {}", quote(plan.variant));
            let header = if i == 0 {
                format!("if ({test}) {{")
            } else {
                format!("}} else if ({test}) {{")
            };
            out.push_str(&self.line(scope, &header));
            match &plan.destructure {
                Destructure::None => {}
                Destructure::Whole(name) => {
                    out.push_str(&self.stmt_line(inner, &format!("const {name} = {subject}")));
                }
                Destructure::ByPosition(pairs) => {
                    for (binder, field) in pairs {
                        out.push_str(
                            &self.stmt_line(inner, &format!("const {binder} = {subject}.{field}")),
                        );
                    }
                }
                Destructure::ByName(names) => {
                    out.push_str(&self.stmt_line(
                        inner,
                        &format!("const {{ {} }} = {subject}", names.join(", ")),
                    ));
                }
            }
            out.push_str(&self.gen_block(plan.body, inner)?);
        }
        if let Some(otherwise) = &discerne.otherwise {
            out.push_str(&self.line(scope, "} else {"));
            out.push_str(&self.gen_block(otherwise, inner)?);
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }

    fn gen_elige(&mut self, elige: &EligeStmt, scope: Scope) -> Result<String> {
        let (mut out, subject) = self.bind_subject(&elige.subject, scope)?;
        let inner = scope.nested();
        for (i, case) in elige.cases.iter().enumerate() {
            let mut tests = Vec::with_capacity(case.values.len());
            for value in &case.values {
                tests.push(format!("{subject} === {}", self.gen_expr(value, scope)?));
            }
            let test = tests.join(" || ");
            let header = if i == 0 {
                format!("if ({test}) {{")
            } else {
                format!("}} else if ({test}) {{")
            };
            out.push_str(&self.line(scope, &header));
            out.push_str(&self.gen_block(&case.body, inner)?);
        }
        match (&elige.otherwise, elige.cases.is_empty()) {
            (Some(otherwise), true) => {
                out.push_str(&self.line(scope, "{"));
                out.push_str(&self.gen_block(otherwise, inner)?);
                out.push_str(&self.line(scope, "}"));
            }
            (Some(otherwise), false) => {
                out.push_str(&self.line(scope, "} else {"));
                out.push_str(&self.gen_block(otherwise, inner)?);
                out.push_str(&self.line(scope, "}"));
            }
            (None, false) => out.push_str(&self.line(scope, "}")),
            (None, true) => {}
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
                    self.stmt_line(scope, &format!("yield {{ op: \"item\", data: {value} }}"));
                out.push_str(&self.stmt_line(scope, "return"));
                Ok(out)
            }
            (_, None) => Ok(self.stmt_line(scope, "return")),
            (ReturnLowering::Return, Some(value)) => {
                let value = self.gen_expr(value, scope)?;
                Ok(self.stmt_line(scope, &format!("return {value}")))
            }
        }
    }

    /// `new Error(..)` for message-like values, the value itself otherwise.
    fn error_value(&mut self, value: &Expr, scope: Scope) -> Result<String> {
        let text = self.gen_expr(value, scope)?;
        let is_message = matches!(value.kind, ExprKind::Str(_) | ExprKind::Template(_))
            || value
                .ty
                .as_ref()
                .is_some_and(|ty| ty.is_primitive(Primitive::Textus));
        Ok(if is_message {
            format!("new Error({text})")
        } else {
            text
        })
    }

    fn gen_throw(&mut self, value: &Expr, scope: Scope) -> Result<String> {
        match iace(scope.mode) {
            ThrowLowering::Raise => {
                let value = self.error_value(value, scope)?;
                Ok(self.stmt_line(scope, &format!("throw {value}")))
            }
            ThrowLowering::ErrorThenStop => {
                let text = self.gen_expr(value, scope)?;
                let message = if value.is_str_literal() {
                    text
                } else {
                    format!("String({text})")
                };
                let mut out = self.stmt_line(
                    scope,
                    &format!("yield {{ op: \"error\", message: {message} }}"),
                );
                out.push_str(&self.stmt_line(scope, "return"));
                Ok(out)
            }
        }
    }

    fn gen_try(&mut self, try_stmt: &TryStmt, scope: Scope) -> Result<String> {
        let inner = scope.nested();
        let mut out = self.line(scope, "try {");
        out.push_str(&self.gen_block(&try_stmt.body, inner)?);
        if let Some(catch) = &try_stmt.catch {
            let header = match &catch.binding {
                Some(name) => format!("}} catch ({name}) {{"),
                None => "} catch {".to_string(),
            };
            out.push_str(&self.line(scope, &header));
            out.push_str(&self.gen_block(&catch.body, inner)?);
        }
        match &try_stmt.finally {
            Some(finally) => {
                out.push_str(&self.line(scope, "} finally {"));
                out.push_str(&self.gen_block(finally, inner)?);
            }
            None if try_stmt.catch.is_none() => out.push_str(&self.line(scope, "} finally {")),
            None => {}
        }
        out.push_str(&self.line(scope, "}"));
        Ok(out)
    }
}

/// `: T` for the declared result, wrapped per the function's protocol.
fn return_annotation(function: &FunctionDecl, mode: FunctionMode) -> String {
    let Some(ret) = &function.ret else {
        return String::new();
    };
    let inner = types::render(ret);
    let head = ret.head_name();
    let text = match mode {
        FunctionMode::Verb(ReturnVerb::Fit) | FunctionMode::TopLevel => inner,
        FunctionMode::Verb(ReturnVerb::Fiunt) => format!("Generator<{inner}>"),
        FunctionMode::Verb(ReturnVerb::Fiet) => format!("Promise<{inner}>"),
        FunctionMode::Verb(ReturnVerb::Fient) => format!("AsyncGenerator<{inner}>"),
        FunctionMode::Native {
            is_async,
            is_generator,
        } => match (is_async, is_generator) {
            (true, true) => format!("AsyncGenerator<{inner}>"),
            (false, true) if head != Some("cursor") => format!("Generator<{inner}>"),
            (true, false) if head != Some("promissum") => format!("Promise<{inner}>"),
            _ => inner,
        },
    };
    format!(": {text}")
}
