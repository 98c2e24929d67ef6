//! Zig backend.
//!
//! Declarations stay at container level; every other top-level statement
//! moves into `pub fn main() !void`. Functions return inferred error
//! unions so `iace` can become `return error.Iace` and calls into user code
//! are prefixed with `try`.
//!
//! Zig rejects a `var` that is never mutated, so a pre-pass collects the
//! bindings that are assigned or receive a mutating call; only those are
//! declared `var`.

mod expr;
mod preamble;
mod stmt;
mod types;

use faber_ir::visitor::{walk_expr, walk_function};
use faber_ir::{Expr, ExprKind, FunctionDecl, Primitive, Program, StmtKind, Visitor};
use rustc_hash::FxHashSet;

use crate::consteval;
use crate::decls::DeclIndex;
use crate::emit::{self, Indent};
use crate::features::ZigFeatures;
use crate::registry::zig::REGISTRY;
use crate::scope::{FunctionMode, Scope};
use crate::{Backend, CodegenError, CodegenOptions};

pub(crate) struct ZigGen {
    indent: Indent,
    decls: DeclIndex,
    features: ZigFeatures,
    temps: usize,
    /// Bindings that must be declared `var`.
    mutated: FxHashSet<String>,
    /// Functions and methods whose result must be discarded with `_ =`.
    returns_value: FxHashSet<String>,
    /// Methods that assign through `ego` and take `self: *T`.
    mutating_methods: FxHashSet<String>,
}

/// Root binding of an assignment target or method receiver.
fn root_name(expr: &Expr) -> Option<&str> {
    match &expr.kind {
        ExprKind::Ident(name) => Some(name),
        ExprKind::Ego => Some("self"),
        ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => root_name(object),
        _ => None,
    }
}

struct MutationScan<'a> {
    mutating_methods: &'a FxHashSet<String>,
    found: FxHashSet<String>,
}

impl<'ast> Visitor<'ast> for MutationScan<'_> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match &expr.kind {
            ExprKind::Assign { target, .. } => {
                if let Some(name) = root_name(target) {
                    self.found.insert(name.to_string());
                }
            }
            ExprKind::Call { callee, .. } => {
                if let ExprKind::Member {
                    object, property, ..
                } = &callee.kind
                {
                    let mutates = match REGISTRY.method(object.ty.as_ref(), property) {
                        Some(def) => def.mutates,
                        None => self.mutating_methods.contains(property.as_str()),
                    };
                    if let (true, Some(name)) = (mutates, root_name(object)) {
                        self.found.insert(name.to_string());
                    }
                }
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}

fn scan(program: &Program, mutating_methods: &FxHashSet<String>) -> FxHashSet<String> {
    let mut scan = MutationScan {
        mutating_methods,
        found: FxHashSet::default(),
    };
    scan.visit_program(program);
    scan.found
}

fn scan_function(function: &FunctionDecl) -> bool {
    let none = FxHashSet::default();
    let mut scan = MutationScan {
        mutating_methods: &none,
        found: FxHashSet::default(),
    };
    walk_function(&mut scan, function);
    scan.found.contains("self")
}

fn yields_value(function: &FunctionDecl) -> bool {
    function
        .ret
        .as_ref()
        .is_some_and(|ret| !ret.is_primitive(Primitive::Vacuum))
}

impl ZigGen {
    pub(crate) fn new(program: &Program, options: &CodegenOptions) -> Self {
        let mut returns_value = FxHashSet::default();
        let mut mutating_methods = FxHashSet::default();
        for stmt in &program.body {
            match &stmt.kind {
                StmtKind::Function(function) if yields_value(function) => {
                    returns_value.insert(function.name.clone());
                }
                StmtKind::Genus(genus) => {
                    for method in &genus.methods {
                        if yields_value(method) {
                            returns_value.insert(method.name.clone());
                        }
                        if scan_function(method) {
                            mutating_methods.insert(method.name.clone());
                        }
                    }
                }
                _ => {}
            }
        }
        ZigGen {
            indent: Indent::new(&options.indent),
            decls: DeclIndex::build(program),
            features: ZigFeatures::empty(),
            temps: 0,
            mutated: scan(program, &mutating_methods),
            returns_value,
            mutating_methods,
        }
    }

    fn fresh_temp(&mut self) -> String {
        let name = format!("_tmp{}", self.temps);
        self.temps += 1;
        name
    }

    fn require(&mut self, features: ZigFeatures) {
        self.features |= features;
    }

    fn line(&self, scope: Scope, text: &str) -> String {
        self.indent.line(scope.depth, text)
    }
}

/// Statements that stay at container level. A `fixum` stays only when its
/// value is known at compile time and nothing mutates it.
fn is_container_level(kind: &StmtKind, mutated: &FxHashSet<String>) -> bool {
    match kind {
        StmtKind::Function(_)
        | StmtKind::Genus(_)
        | StmtKind::Pactum(_)
        | StmtKind::Ordo(_)
        | StmtKind::Discretio(_)
        | StmtKind::TypeAlias { .. }
        | StmtKind::Import(_) => true,
        StmtKind::Var(var) => {
            !var.mutable
                && !mutated.contains(&var.name)
                && var.init.as_ref().is_some_and(|init| {
                    !matches!(init.kind, ExprKind::Template(_))
                        && consteval::evaluate(init).is_some()
                })
        }
        _ => false,
    }
}

impl Backend for ZigGen {
    fn gen_body(&mut self, program: &Program) -> Result<String, CodegenError> {
        let top = Scope::top();
        let main = Scope {
            depth: 1,
            mode: FunctionMode::TopLevel,
            in_loop: false,
        };
        let mut items = Vec::with_capacity(program.body.len());
        let mut main_body = String::new();
        for stmt in &program.body {
            if is_container_level(&stmt.kind, &self.mutated) {
                let text = self.gen_stmt(stmt, top)?;
                items.push((emit::is_block_declaration(&stmt.kind), text));
            } else {
                main_body.push_str(&self.gen_stmt(stmt, main)?);
            }
        }
        if !main_body.is_empty() {
            items.push((true, format!("pub fn main() !void {{\n{main_body}}}\n")));
        }
        Ok(emit::join_module(items))
    }

    fn into_preamble(self) -> String {
        preamble::render(self.features, self.indent.unit())
    }
}
