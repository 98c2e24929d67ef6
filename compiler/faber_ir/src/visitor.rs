//! Read-only AST traversal.
//!
//! Default `visit_*` implementations call the matching `walk_*` function,
//! which visits children. Override a `visit_*` method to act at a node and
//! call `walk_*` from it to keep descending.
//!
//! ```text
//! struct CountCede(usize);
//!
//! impl<'ast> Visitor<'ast> for CountCede {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if matches!(expr.kind, ExprKind::Cede(_)) {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use faber_stack::ensure_sufficient_stack;

use crate::ast::{
    Block, Expr, ExprKind, FunctionDecl, LambdaBody, NewInit, ObjectEntry, Param, Program, Stmt,
    StmtKind,
};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_function(&mut self, function: &'ast FunctionDecl) {
        walk_function(self, function);
    }

    fn visit_param(&mut self, param: &'ast Param) {
        if let Some(default) = &param.default {
            self.visit_expr(default);
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, program: &'ast Program) {
    for stmt in &program.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    function: &'ast FunctionDecl,
) {
    for param in &function.params {
        visitor.visit_param(param);
    }
    if let Some(body) = &function.body {
        visitor.visit_block(body);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    ensure_sufficient_stack(|| match &stmt.kind {
        StmtKind::Expr(expr) | StmtKind::Throw(expr) | StmtKind::Panic(expr) => {
            visitor.visit_expr(expr);
        }
        StmtKind::Var(decl) => {
            if let Some(init) = &decl.init {
                visitor.visit_expr(init);
            }
        }
        StmtKind::Function(function) => visitor.visit_function(function),
        StmtKind::Genus(genus) => {
            for field in &genus.fields {
                if let Some(default) = &field.default {
                    visitor.visit_expr(default);
                }
            }
            for method in &genus.methods {
                visitor.visit_function(method);
            }
        }
        StmtKind::Pactum(pactum) => {
            for method in &pactum.methods {
                visitor.visit_function(method);
            }
        }
        StmtKind::Ordo(ordo) => {
            for member in &ordo.members {
                if let Some(value) = &member.value {
                    visitor.visit_expr(value);
                }
            }
        }
        StmtKind::Discretio(_)
        | StmtKind::TypeAlias { .. }
        | StmtKind::Import(_)
        | StmtKind::Break
        | StmtKind::Continue => {}
        StmtKind::If(if_stmt) => {
            for branch in &if_stmt.branches {
                visitor.visit_expr(&branch.cond);
                visitor.visit_block(&branch.body);
            }
            if let Some(otherwise) = &if_stmt.otherwise {
                visitor.visit_block(otherwise);
            }
        }
        StmtKind::While { cond, body } => {
            visitor.visit_expr(cond);
            visitor.visit_block(body);
        }
        StmtKind::ForOf { iterable, body, .. } => {
            visitor.visit_expr(iterable);
            visitor.visit_block(body);
        }
        StmtKind::ForIn { object, body, .. } => {
            visitor.visit_expr(object);
            visitor.visit_block(body);
        }
        StmtKind::Discerne(discerne) => {
            visitor.visit_expr(&discerne.subject);
            for case in &discerne.cases {
                visitor.visit_block(&case.body);
            }
            if let Some(otherwise) = &discerne.otherwise {
                visitor.visit_block(otherwise);
            }
        }
        StmtKind::Elige(elige) => {
            visitor.visit_expr(&elige.subject);
            for case in &elige.cases {
                for value in &case.values {
                    visitor.visit_expr(value);
                }
                visitor.visit_block(&case.body);
            }
            if let Some(otherwise) = &elige.otherwise {
                visitor.visit_block(otherwise);
            }
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::Try(try_stmt) => {
            visitor.visit_block(&try_stmt.body);
            if let Some(catch) = &try_stmt.catch {
                visitor.visit_block(&catch.body);
            }
            if let Some(finally) = &try_stmt.finally {
                visitor.visit_block(finally);
            }
        }
        StmtKind::Scribe { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        StmtKind::Assert { cond, message } => {
            visitor.visit_expr(cond);
            if let Some(message) = message {
                visitor.visit_expr(message);
            }
        }
        StmtKind::Block(block) => visitor.visit_block(block),
    });
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    ensure_sufficient_stack(|| match &expr.kind {
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_)
        | ExprKind::Template(_)
        | ExprKind::Bool(_)
        | ExprKind::Nihil
        | ExprKind::Ego
        | ExprKind::Ident(_) => {}
        ExprKind::Array(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        ExprKind::Object(entries) => {
            for entry in entries {
                match entry {
                    ObjectEntry::Prop { value, .. } | ObjectEntry::Spread(value) => {
                        visitor.visit_expr(value);
                    }
                }
            }
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Assign { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::Conditional {
            cond,
            then,
            otherwise,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then);
            visitor.visit_expr(otherwise);
        }
        ExprKind::Call { callee, args, .. } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Member { object, .. } => visitor.visit_expr(object),
        ExprKind::Index { object, index, .. } => {
            visitor.visit_expr(object);
            visitor.visit_expr(index);
        }
        ExprKind::Range {
            start, end, step, ..
        } => {
            visitor.visit_expr(start);
            visitor.visit_expr(end);
            if let Some(step) = step {
                visitor.visit_expr(step);
            }
        }
        ExprKind::Lambda(lambda) => {
            for param in &lambda.params {
                visitor.visit_param(param);
            }
            match &lambda.body {
                LambdaBody::Expr(body) => visitor.visit_expr(body),
                LambdaBody::Block(body) => visitor.visit_block(body),
            }
        }
        ExprKind::New { init, .. } => match init {
            NewInit::Args(args) => {
                for arg in args {
                    visitor.visit_expr(arg);
                }
            }
            NewInit::Fields(fields) => {
                for field in fields {
                    visitor.visit_expr(&field.value);
                }
            }
        },
        ExprKind::Finge { fields, .. } => {
            for field in fields {
                visitor.visit_expr(&field.value);
            }
        }
        ExprKind::Cede(inner)
        | ExprKind::Praefixum(inner)
        | ExprKind::Spread(inner)
        | ExprKind::Cast { expr: inner, .. }
        | ExprKind::TypeTest { expr: inner, .. } => visitor.visit_expr(inner),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    struct Idents(Vec<String>);

    impl<'ast> Visitor<'ast> for Idents {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            if let ExprKind::Ident(name) = &expr.kind {
                self.0.push(name.clone());
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn visits_nested_expressions_in_order() {
        let call = Expr::new(
            ExprKind::Call {
                callee: Box::new(Expr::ident("f", Span::DUMMY)),
                args: vec![Expr::ident("a", Span::DUMMY), Expr::ident("b", Span::DUMMY)],
                optional: false,
            },
            Span::DUMMY,
        );
        let program = Program {
            body: vec![Stmt::new(StmtKind::Expr(call), Span::DUMMY)],
            span: Span::DUMMY,
        };
        let mut idents = Idents(Vec::new());
        idents.visit_program(&program);
        assert_eq!(idents.0, vec!["f", "a", "b"]);
    }
}
