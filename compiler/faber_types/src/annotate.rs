//! The annotating fold: scoped symbol table plus local type inference.

use faber_ir::fold::{fold_expr, fold_function, fold_stmt};
use faber_ir::{
    BinaryOp, Block, CaseBinding, CatchClause, DiscerneCase, DiscerneStmt, Expr, ExprKind,
    Folder, FunctionDecl, Primitive, ResolvedType, Stmt, StmtKind, UnaryOp, VarDecl,
};
use rustc_hash::FxHashMap;

use crate::decls::Declarations;

/// `None` entries shadow outer bindings whose type is known.
type Scope = FxHashMap<String, Option<ResolvedType>>;

pub(crate) struct Annotator {
    decls: Declarations,
    scopes: Vec<Scope>,
    current_genus: Option<String>,
    pub(crate) annotated: usize,
}

const fn prim(p: Primitive) -> ResolvedType {
    ResolvedType::Primitive(p)
}

fn lista(elem: ResolvedType) -> ResolvedType {
    ResolvedType::generic("lista", vec![elem])
}

/// Element type of a collection, used by `ex .. pro` bindings and indexing.
fn element_type(ty: &ResolvedType) -> Option<ResolvedType> {
    match ty {
        ResolvedType::Generic { name, args } => match (name.as_str(), args.as_slice()) {
            ("lista" | "copia" | "cursor", [elem]) => Some(elem.clone()),
            _ => None,
        },
        ResolvedType::Primitive(Primitive::Textus) => Some(prim(Primitive::Textus)),
        _ => None,
    }
}

fn type_args(ty: &ResolvedType) -> (&str, &[ResolvedType]) {
    match ty {
        ResolvedType::Generic { name, args } => (name, args),
        other => (other.head_name(), &[]),
    }
}

impl Annotator {
    pub(crate) fn new(decls: Declarations) -> Self {
        Annotator {
            decls,
            scopes: vec![Scope::default()],
            current_genus: None,
            annotated: 0,
        }
    }

    fn push(&mut self) {
        self.scopes.push(Scope::default());
    }

    fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn declare(&mut self, name: &str, ty: Option<ResolvedType>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    fn lookup(&self, name: &str) -> Option<ResolvedType> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
            .flatten()
    }

    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push();
        let out = f(self);
        self.pop();
        out
    }

    fn fold_var(&mut self, decl: VarDecl) -> VarDecl {
        let declared = decl.ty.as_ref().map(|ann| self.decls.resolve(ann));
        let mut init = decl.init.map(|e| self.fold_expr(e));
        // Empty collection literals take their type from the annotation.
        if let (Some(init), Some(declared)) = (init.as_mut(), declared.as_ref()) {
            if matches!(init.kind, ExprKind::Array(_) | ExprKind::Object(_))
                && matches!(declared.head_name(), "lista" | "tabula" | "copia")
            {
                init.ty = Some(declared.clone());
            }
        }
        let ty = declared.or_else(|| init.as_ref().and_then(|e| e.ty.clone()));
        self.declare(&decl.name, ty);
        VarDecl { init, ..decl }
    }

    fn fold_discerne(&mut self, discerne: DiscerneStmt) -> DiscerneStmt {
        let subject = self.fold_expr(discerne.subject);
        let union = subject.ty.as_ref().and_then(|t| t.as_union()).cloned();
        let cases = discerne
            .cases
            .into_iter()
            .map(|case| {
                self.with_scope(|this| {
                    let variant = union.as_ref().and_then(|u| u.variant(&case.variant));
                    match &case.binding {
                        CaseBinding::None => {}
                        CaseBinding::Alias(name) => this.declare(name, subject.ty.clone()),
                        CaseBinding::Positional(names) => {
                            for (i, name) in names.iter().enumerate() {
                                let field_ty = variant
                                    .and_then(|v| v.fields.get(i))
                                    .map(|(_, ty)| ty.clone());
                                this.declare(name, field_ty);
                            }
                        }
                    }
                    DiscerneCase {
                        body: this.fold_block(case.body),
                        ..case
                    }
                })
            })
            .collect();
        let otherwise = discerne.otherwise.map(|b| self.fold_block(b));
        DiscerneStmt {
            subject,
            cases,
            otherwise,
        }
    }

    fn declare_params(&mut self, params: &[faber_ir::Param]) {
        for param in params {
            let ty = param.ty.as_ref().map(|ann| {
                let resolved = self.decls.resolve(ann);
                if param.rest {
                    lista(resolved)
                } else {
                    resolved
                }
            });
            self.declare(&param.name, ty);
        }
    }

    fn infer(&self, expr: &Expr) -> Option<ResolvedType> {
        match &expr.kind {
            ExprKind::Int(_) => Some(prim(Primitive::Numerus)),
            ExprKind::Float(_) => Some(prim(Primitive::Fractus)),
            ExprKind::Str(_) | ExprKind::Template(_) => Some(prim(Primitive::Textus)),
            ExprKind::Bool(_) | ExprKind::TypeTest { .. } => Some(prim(Primitive::Bivalens)),
            ExprKind::Nihil => Some(prim(Primitive::Nihil)),
            ExprKind::Ego => self.current_genus.as_deref().map(ResolvedType::named),
            ExprKind::Ident(name) => self.lookup(name),
            ExprKind::Array(items) => {
                let elem = items
                    .first()
                    .and_then(|first| match &first.kind {
                        ExprKind::Spread(inner) => inner.ty.as_ref().and_then(element_type),
                        _ => first.ty.clone(),
                    })
                    .unwrap_or(prim(Primitive::Ignotum));
                Some(lista(elem))
            }
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Not => Some(prim(Primitive::Bivalens)),
                UnaryOp::Neg => operand.ty.clone(),
            },
            ExprKind::Binary { op, left, right } => binary_type(*op, left, right),
            ExprKind::Assign { value, .. } => value.ty.clone(),
            ExprKind::Conditional { then, .. } => then.ty.clone(),
            ExprKind::Call { callee, .. } => match &callee.kind {
                ExprKind::Ident(name) => self.decls.function_return(name),
                ExprKind::Member {
                    object, property, ..
                } => self.method_result(object.ty.as_ref()?, property),
                _ => None,
            },
            ExprKind::Member {
                object, property, ..
            } => {
                let (head, _) = type_args(object.ty.as_ref()?);
                self.decls.field_type(head, property)
            }
            ExprKind::Index { object, index, .. } => {
                let object_ty = object.ty.as_ref()?;
                if matches!(index.kind, ExprKind::Range { .. }) {
                    return Some(object_ty.clone());
                }
                match type_args(object_ty) {
                    ("tabula", [_, value]) => Some(value.clone()),
                    _ => element_type(object_ty),
                }
            }
            ExprKind::Range { .. } => Some(lista(prim(Primitive::Numerus))),
            ExprKind::New { class, .. } => Some(ResolvedType::named(class.clone())),
            ExprKind::Finge { variant, .. } => self.decls.union_of_variant(variant),
            ExprKind::Cast { ty, .. } => Some(self.decls.resolve(ty)),
            ExprKind::Praefixum(inner) => inner.ty.clone(),
            ExprKind::Cede(inner) => match type_args(inner.ty.as_ref()?) {
                ("promissum", [value]) => Some(value.clone()),
                _ => None,
            },
            ExprKind::Object(_) | ExprKind::Lambda(_) | ExprKind::Spread(_) => None,
        }
    }

    /// Result type of `receiver.method(..)` for the methods whose result
    /// type follows from the receiver alone.
    fn method_result(&self, receiver: &ResolvedType, method: &str) -> Option<ResolvedType> {
        let (head, args) = type_args(receiver);
        match (head, method) {
            (_, "longitudo" | "indiceDe" | "inveniIndicem") => Some(prim(Primitive::Numerus)),
            (
                _,
                "vacua" | "continet" | "habet" | "incipit" | "desinit" | "omnes" | "aliquis"
                | "subcopia" | "supercopia" | "dele",
            ) => Some(prim(Primitive::Bivalens)),
            (
                "lista",
                "addita" | "praeposita" | "filtrata" | "ordinata" | "inversa" | "unica" | "sectio"
                | "prima" | "ultima" | "omitte" | "miscita" | "specimina",
            )
            | (
                "copia",
                "unio" | "intersectio" | "differentia" | "symmetrica",
            )
            | ("tabula", "conflata" | "selecta" | "omissa") => Some(receiver.clone()),
            (
                "lista",
                "primus" | "ultimus" | "accipe" | "decapita" | "remove" | "specimen" | "inveni",
            ) => args.first().cloned(),
            ("lista", "fragmenta") => Some(lista(receiver.clone())),
            ("copia", "inLista") => args.first().cloned().map(lista),
            ("tabula", "accipe") => args.get(1).cloned(),
            ("tabula", "claves") => args.first().cloned().map(lista),
            ("tabula", "valores") => args.get(1).cloned().map(lista),
            (
                "textus",
                "maiuscula" | "minuscula" | "recide" | "substitue",
            ) => Some(prim(Primitive::Textus)),
            ("textus", "divide") => Some(lista(prim(Primitive::Textus))),
            (genus, method) => self.decls.method_return(genus, method),
        }
    }
}

fn binary_type(op: BinaryOp, left: &Expr, right: &Expr) -> Option<ResolvedType> {
    if op.is_comparison() || matches!(op, BinaryOp::And | BinaryOp::Or) {
        return Some(prim(Primitive::Bivalens));
    }
    if op == BinaryOp::Coalesce {
        return left.ty.clone().or_else(|| right.ty.clone());
    }
    let (l, r) = (left.ty.as_ref()?, right.ty.as_ref()?);
    let is = |p| l.is_primitive(p) || r.is_primitive(p);
    if op == BinaryOp::Add && is(Primitive::Textus) {
        return Some(prim(Primitive::Textus));
    }
    let numeric = |t: &ResolvedType| {
        matches!(
            t,
            ResolvedType::Primitive(
                Primitive::Numerus | Primitive::Fractus | Primitive::Decimus | Primitive::Magnus
            )
        )
    };
    if !numeric(l) || !numeric(r) {
        return None;
    }
    Some(if is(Primitive::Decimus) {
        prim(Primitive::Decimus)
    } else if is(Primitive::Fractus) {
        prim(Primitive::Fractus)
    } else if is(Primitive::Magnus) {
        prim(Primitive::Magnus)
    } else {
        prim(Primitive::Numerus)
    })
}

impl Folder for Annotator {
    fn fold_block(&mut self, block: Block) -> Block {
        self.with_scope(|this| Block {
            stmts: block.stmts.into_iter().map(|s| this.fold_stmt(s)).collect(),
            span: block.span,
        })
    }

    fn fold_function(&mut self, function: FunctionDecl) -> FunctionDecl {
        self.with_scope(|this| {
            this.declare_params(&function.params);
            fold_function(this, function)
        })
    }

    fn fold_stmt(&mut self, stmt: Stmt) -> Stmt {
        let span = stmt.span;
        let kind = match stmt.kind {
            StmtKind::Var(decl) => StmtKind::Var(self.fold_var(decl)),
            StmtKind::Genus(genus) => {
                let outer = self.current_genus.replace(genus.name.clone());
                let folded = fold_stmt(self, Stmt::new(StmtKind::Genus(genus), span));
                self.current_genus = outer;
                return folded;
            }
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => {
                let iterable = self.fold_expr(iterable);
                let elem = iterable.ty.as_ref().and_then(element_type);
                self.with_scope(|this| {
                    this.declare(&binding, elem);
                    StmtKind::ForOf {
                        body: this.fold_block(body),
                        binding,
                        iterable,
                    }
                })
            }
            StmtKind::ForIn {
                binding,
                object,
                body,
            } => {
                let object = self.fold_expr(object);
                let key = match object.ty.as_ref().map(type_args) {
                    Some(("tabula", [key, _])) => Some(key.clone()),
                    _ => Some(prim(Primitive::Textus)),
                };
                self.with_scope(|this| {
                    this.declare(&binding, key);
                    StmtKind::ForIn {
                        body: this.fold_block(body),
                        binding,
                        object,
                    }
                })
            }
            StmtKind::Discerne(discerne) => StmtKind::Discerne(self.fold_discerne(discerne)),
            StmtKind::Try(mut try_stmt) => {
                try_stmt.body = self.fold_block(try_stmt.body);
                try_stmt.catch = try_stmt.catch.map(|c| {
                    self.with_scope(|this| {
                        if let Some(binding) = &c.binding {
                            this.declare(binding, None);
                        }
                        CatchClause {
                            body: this.fold_block(c.body),
                            binding: c.binding,
                        }
                    })
                });
                try_stmt.finally = try_stmt.finally.map(|b| self.fold_block(b));
                StmtKind::Try(try_stmt)
            }
            kind => return fold_stmt(self, Stmt::new(kind, span)),
        };
        Stmt::new(kind, span)
    }

    fn fold_expr(&mut self, expr: Expr) -> Expr {
        let mut expr = if let ExprKind::Lambda(lambda) = &expr.kind {
            let params = lambda.params.clone();
            self.with_scope(|this| {
                this.declare_params(&params);
                fold_expr(this, expr)
            })
        } else {
            fold_expr(self, expr)
        };
        if expr.ty.is_none() {
            expr.ty = self.infer(&expr);
            if expr.ty.is_some() {
                self.annotated += 1;
            }
        }
        expr
    }
}
