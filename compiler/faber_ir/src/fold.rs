//! Rebuilding AST traversal.
//!
//! A `Folder` consumes a tree and produces a new one. The default methods
//! rebuild every node unchanged; override `fold_expr` to rewrite expressions,
//! `fold_span` to rewrite positions, and so on.

use faber_stack::ensure_sufficient_stack;

use crate::ast::{
    Block, CatchClause, DiscerneCase, DiscerneStmt, EligeCase, EligeStmt, Expr, ExprKind,
    FieldDecl, FieldInit, FunctionDecl, GenusDecl, IfBranch, IfStmt, Lambda, LambdaBody, NewInit,
    ObjectEntry, OrdoDecl, OrdoMember, PactumDecl, Param, Program, Stmt, StmtKind, TryStmt,
    VarDecl, VariantDecl,
};
use crate::Span;

pub trait Folder {
    fn fold_span(&mut self, span: Span) -> Span {
        span
    }

    fn fold_program(&mut self, program: Program) -> Program {
        Program {
            body: program
                .body
                .into_iter()
                .map(|s| self.fold_stmt(s))
                .collect(),
            span: self.fold_span(program.span),
        }
    }

    fn fold_stmt(&mut self, stmt: Stmt) -> Stmt {
        fold_stmt(self, stmt)
    }

    fn fold_block(&mut self, block: Block) -> Block {
        Block {
            stmts: block.stmts.into_iter().map(|s| self.fold_stmt(s)).collect(),
            span: self.fold_span(block.span),
        }
    }

    fn fold_function(&mut self, function: FunctionDecl) -> FunctionDecl {
        fold_function(self, function)
    }

    fn fold_param(&mut self, param: Param) -> Param {
        Param {
            default: param.default.map(|d| self.fold_expr(d)),
            span: self.fold_span(param.span),
            ..param
        }
    }

    fn fold_expr(&mut self, expr: Expr) -> Expr {
        fold_expr(self, expr)
    }
}

pub fn fold_function<F: Folder + ?Sized>(folder: &mut F, function: FunctionDecl) -> FunctionDecl {
    FunctionDecl {
        params: function
            .params
            .into_iter()
            .map(|p| folder.fold_param(p))
            .collect(),
        body: function.body.map(|b| folder.fold_block(b)),
        span: folder.fold_span(function.span),
        ..function
    }
}

fn fold_field<F: Folder + ?Sized>(folder: &mut F, field: FieldDecl) -> FieldDecl {
    FieldDecl {
        default: field.default.map(|d| folder.fold_expr(d)),
        span: folder.fold_span(field.span),
        ..field
    }
}

fn fold_opt_block<F: Folder + ?Sized>(folder: &mut F, block: Option<Block>) -> Option<Block> {
    block.map(|b| folder.fold_block(b))
}

pub fn fold_stmt<F: Folder + ?Sized>(folder: &mut F, stmt: Stmt) -> Stmt {
    ensure_sufficient_stack(|| {
        let kind = match stmt.kind {
            StmtKind::Expr(expr) => StmtKind::Expr(folder.fold_expr(expr)),
            StmtKind::Var(decl) => StmtKind::Var(VarDecl {
                init: decl.init.map(|e| folder.fold_expr(e)),
                ..decl
            }),
            StmtKind::Function(function) => StmtKind::Function(folder.fold_function(function)),
            StmtKind::Genus(genus) => StmtKind::Genus(GenusDecl {
                fields: genus
                    .fields
                    .into_iter()
                    .map(|f| fold_field(folder, f))
                    .collect(),
                methods: genus
                    .methods
                    .into_iter()
                    .map(|m| folder.fold_function(m))
                    .collect(),
                ..genus
            }),
            StmtKind::Pactum(pactum) => StmtKind::Pactum(PactumDecl {
                methods: pactum
                    .methods
                    .into_iter()
                    .map(|m| folder.fold_function(m))
                    .collect(),
                ..pactum
            }),
            StmtKind::Ordo(ordo) => StmtKind::Ordo(OrdoDecl {
                members: ordo
                    .members
                    .into_iter()
                    .map(|m| OrdoMember {
                        value: m.value.map(|v| folder.fold_expr(v)),
                        span: folder.fold_span(m.span),
                        ..m
                    })
                    .collect(),
                ..ordo
            }),
            StmtKind::Discretio(mut discretio) => {
                discretio.variants = discretio
                    .variants
                    .into_iter()
                    .map(|v| VariantDecl {
                        fields: v.fields.into_iter().map(|f| fold_field(folder, f)).collect(),
                        span: folder.fold_span(v.span),
                        ..v
                    })
                    .collect();
                StmtKind::Discretio(discretio)
            }
            kind @ (StmtKind::TypeAlias { .. }
            | StmtKind::Import(_)
            | StmtKind::Break
            | StmtKind::Continue) => kind,
            StmtKind::If(if_stmt) => StmtKind::If(IfStmt {
                branches: if_stmt
                    .branches
                    .into_iter()
                    .map(|b| IfBranch {
                        cond: folder.fold_expr(b.cond),
                        body: folder.fold_block(b.body),
                    })
                    .collect(),
                otherwise: fold_opt_block(folder, if_stmt.otherwise),
            }),
            StmtKind::While { cond, body } => StmtKind::While {
                cond: folder.fold_expr(cond),
                body: folder.fold_block(body),
            },
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => StmtKind::ForOf {
                binding,
                iterable: folder.fold_expr(iterable),
                body: folder.fold_block(body),
            },
            StmtKind::ForIn {
                binding,
                object,
                body,
            } => StmtKind::ForIn {
                binding,
                object: folder.fold_expr(object),
                body: folder.fold_block(body),
            },
            StmtKind::Discerne(discerne) => StmtKind::Discerne(DiscerneStmt {
                subject: folder.fold_expr(discerne.subject),
                cases: discerne
                    .cases
                    .into_iter()
                    .map(|c| DiscerneCase {
                        body: folder.fold_block(c.body),
                        span: folder.fold_span(c.span),
                        ..c
                    })
                    .collect(),
                otherwise: fold_opt_block(folder, discerne.otherwise),
            }),
            StmtKind::Elige(elige) => StmtKind::Elige(EligeStmt {
                subject: folder.fold_expr(elige.subject),
                cases: elige
                    .cases
                    .into_iter()
                    .map(|c| EligeCase {
                        values: c.values.into_iter().map(|v| folder.fold_expr(v)).collect(),
                        body: folder.fold_block(c.body),
                        span: folder.fold_span(c.span),
                    })
                    .collect(),
                otherwise: fold_opt_block(folder, elige.otherwise),
            }),
            StmtKind::Return(value) => StmtKind::Return(value.map(|v| folder.fold_expr(v))),
            StmtKind::Throw(expr) => StmtKind::Throw(folder.fold_expr(expr)),
            StmtKind::Panic(expr) => StmtKind::Panic(folder.fold_expr(expr)),
            StmtKind::Try(try_stmt) => StmtKind::Try(TryStmt {
                body: folder.fold_block(try_stmt.body),
                catch: try_stmt.catch.map(|c| CatchClause {
                    binding: c.binding,
                    body: folder.fold_block(c.body),
                }),
                finally: fold_opt_block(folder, try_stmt.finally),
            }),
            StmtKind::Scribe { level, args } => StmtKind::Scribe {
                level,
                args: args.into_iter().map(|a| folder.fold_expr(a)).collect(),
            },
            StmtKind::Assert { cond, message } => StmtKind::Assert {
                cond: folder.fold_expr(cond),
                message: message.map(|m| folder.fold_expr(m)),
            },
            StmtKind::Block(block) => StmtKind::Block(folder.fold_block(block)),
        };
        Stmt {
            kind,
            span: folder.fold_span(stmt.span),
        }
    })
}

fn fold_box<F: Folder + ?Sized>(folder: &mut F, expr: Box<Expr>) -> Box<Expr> {
    Box::new(folder.fold_expr(*expr))
}

fn fold_inits<F: Folder + ?Sized>(folder: &mut F, fields: Vec<FieldInit>) -> Vec<FieldInit> {
    fields
        .into_iter()
        .map(|f| FieldInit {
            name: f.name,
            value: folder.fold_expr(f.value),
        })
        .collect()
}

pub fn fold_expr<F: Folder + ?Sized>(folder: &mut F, expr: Expr) -> Expr {
    ensure_sufficient_stack(|| {
        let kind = match expr.kind {
            kind @ (ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Str(_)
            | ExprKind::Template(_)
            | ExprKind::Bool(_)
            | ExprKind::Nihil
            | ExprKind::Ego
            | ExprKind::Ident(_)) => kind,
            ExprKind::Array(items) => {
                ExprKind::Array(items.into_iter().map(|e| folder.fold_expr(e)).collect())
            }
            ExprKind::Object(entries) => ExprKind::Object(
                entries
                    .into_iter()
                    .map(|entry| match entry {
                        ObjectEntry::Prop { key, value } => ObjectEntry::Prop {
                            key,
                            value: folder.fold_expr(value),
                        },
                        ObjectEntry::Spread(value) => ObjectEntry::Spread(folder.fold_expr(value)),
                    })
                    .collect(),
            ),
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: fold_box(folder, operand),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op,
                left: fold_box(folder, left),
                right: fold_box(folder, right),
            },
            ExprKind::Assign { op, target, value } => ExprKind::Assign {
                op,
                target: fold_box(folder, target),
                value: fold_box(folder, value),
            },
            ExprKind::Conditional {
                cond,
                then,
                otherwise,
            } => ExprKind::Conditional {
                cond: fold_box(folder, cond),
                then: fold_box(folder, then),
                otherwise: fold_box(folder, otherwise),
            },
            ExprKind::Call {
                callee,
                args,
                optional,
            } => ExprKind::Call {
                callee: fold_box(folder, callee),
                args: args.into_iter().map(|a| folder.fold_expr(a)).collect(),
                optional,
            },
            ExprKind::Member {
                object,
                property,
                access,
            } => ExprKind::Member {
                object: fold_box(folder, object),
                property,
                access,
            },
            ExprKind::Index {
                object,
                index,
                access,
            } => ExprKind::Index {
                object: fold_box(folder, object),
                index: fold_box(folder, index),
                access,
            },
            ExprKind::Range {
                start,
                end,
                inclusive,
                step,
            } => ExprKind::Range {
                start: fold_box(folder, start),
                end: fold_box(folder, end),
                inclusive,
                step: step.map(|s| fold_box(folder, s)),
            },
            ExprKind::Lambda(lambda) => ExprKind::Lambda(Lambda {
                params: lambda
                    .params
                    .into_iter()
                    .map(|p| folder.fold_param(p))
                    .collect(),
                body: match lambda.body {
                    LambdaBody::Expr(body) => LambdaBody::Expr(fold_box(folder, body)),
                    LambdaBody::Block(body) => LambdaBody::Block(folder.fold_block(body)),
                },
                is_async: lambda.is_async,
            }),
            ExprKind::New { class, init } => ExprKind::New {
                class,
                init: match init {
                    NewInit::Args(args) => {
                        NewInit::Args(args.into_iter().map(|a| folder.fold_expr(a)).collect())
                    }
                    NewInit::Fields(fields) => NewInit::Fields(fold_inits(folder, fields)),
                },
            },
            ExprKind::Finge { variant, fields } => ExprKind::Finge {
                variant,
                fields: fold_inits(folder, fields),
            },
            ExprKind::Cede(inner) => ExprKind::Cede(fold_box(folder, inner)),
            ExprKind::Praefixum(inner) => ExprKind::Praefixum(fold_box(folder, inner)),
            ExprKind::Spread(inner) => ExprKind::Spread(fold_box(folder, inner)),
            ExprKind::Cast { expr, ty } => ExprKind::Cast {
                expr: fold_box(folder, expr),
                ty,
            },
            ExprKind::TypeTest { expr, ty, negated } => ExprKind::TypeTest {
                expr: fold_box(folder, expr),
                ty,
                negated,
            },
        };
        Expr {
            kind,
            span: folder.fold_span(expr.span),
            ty: expr.ty,
        }
    })
}

struct StripSpans;

impl Folder for StripSpans {
    fn fold_span(&mut self, _span: Span) -> Span {
        Span::DUMMY
    }

    fn fold_expr(&mut self, expr: Expr) -> Expr {
        let mut expr = fold_expr(self, expr);
        expr.ty = None;
        expr
    }
}

/// Replace every span with `Span::DUMMY` and drop resolved types.
///
/// Two parses of semantically equal text compare equal after stripping, which
/// is how round-trip tests compare trees.
pub fn strip_spans(program: Program) -> Program {
    StripSpans.fold_program(program)
}
