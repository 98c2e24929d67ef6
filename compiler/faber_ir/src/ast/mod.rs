//! Syntax tree.
//!
//! The tree is owned and immutable once built: passes that need a modified
//! tree (type annotation, span stripping) rebuild it through
//! [`Folder`](crate::fold::Folder).

mod expr;
mod operators;
mod stmt;
mod types;


pub use expr::{Expr, ExprKind, FieldInit, Lambda, LambdaBody, NewInit, ObjectEntry};
pub use operators::{
    Access, AssignOp, BinaryOp, UnaryOp, CONDITIONAL_PRECEDENCE, RANGE_PRECEDENCE,
    TYPE_TEST_PRECEDENCE,
};
pub use stmt::{
    Block, CaseBinding, CatchClause, DiscerneCase, DiscerneStmt, DiscretioDecl, EligeCase,
    EligeStmt, FieldDecl, FnModifiers, FunctionDecl, GenusDecl, IfBranch, IfStmt, ImportDecl,
    ImportItem, OrdoDecl, OrdoMember, PactumDecl, Param, Program, ReturnVerb, ScribeLevel, Stmt,
    StmtKind, TryStmt, VarDecl, VariantDecl,
};
pub use types::TypeAnnotation;

impl StmtKind {
    /// Discriminant name used in diagnostics and traces.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            StmtKind::Expr(_) => "Expr",
            StmtKind::Var(_) => "Var",
            StmtKind::Function(_) => "Function",
            StmtKind::Genus(_) => "Genus",
            StmtKind::Pactum(_) => "Pactum",
            StmtKind::Ordo(_) => "Ordo",
            StmtKind::Discretio(_) => "Discretio",
            StmtKind::TypeAlias { .. } => "TypeAlias",
            StmtKind::Import(_) => "Import",
            StmtKind::If(_) => "If",
            StmtKind::While { .. } => "While",
            StmtKind::ForOf { .. } => "ForOf",
            StmtKind::ForIn { .. } => "ForIn",
            StmtKind::Discerne(_) => "Discerne",
            StmtKind::Elige(_) => "Elige",
            StmtKind::Return(_) => "Return",
            StmtKind::Break => "Break",
            StmtKind::Continue => "Continue",
            StmtKind::Throw(_) => "Throw",
            StmtKind::Panic(_) => "Panic",
            StmtKind::Try(_) => "Try",
            StmtKind::Scribe { .. } => "Scribe",
            StmtKind::Assert { .. } => "Assert",
            StmtKind::Block(_) => "Block",
        }
    }
}
