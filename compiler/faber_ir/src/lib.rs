//! Faber IR - syntax tree shared by every compiler stage.
//!
//! This crate contains:
//! - Spans for source locations
//! - AST nodes (`Program`, `Stmt`, `Expr`, declarations, type annotations)
//! - Resolved types attached to expressions by the analyzer
//! - Comments and the comment map used by the canonical printer
//! - `Visitor` (read-only) and `Folder` (rebuilding) traversals
//!
//! The tree is plain owned data (`Box` children, `String` names). Floats are
//! stored as `u64` bits so every node is `Eq + Hash`, which round-trip tests
//! rely on.

pub mod ast;
pub mod comment;
pub mod fold;
pub mod resolved;
mod span;
pub mod visitor;

pub use ast::{
    Access, AssignOp, BinaryOp, Block, CaseBinding, CatchClause, DiscerneCase, DiscerneStmt,
    DiscretioDecl, EligeCase, EligeStmt, Expr, ExprKind, FieldDecl, FieldInit, FnModifiers,
    FunctionDecl, GenusDecl, IfBranch, IfStmt, ImportDecl, ImportItem, Lambda, LambdaBody,
    NewInit, ObjectEntry, OrdoDecl, OrdoMember, PactumDecl, Param, Program, ReturnVerb,
    ScribeLevel, Stmt, StmtKind, TryStmt, TypeAnnotation, UnaryOp, VarDecl, VariantDecl,
    CONDITIONAL_PRECEDENCE, RANGE_PRECEDENCE, TYPE_TEST_PRECEDENCE,
};
pub use comment::{Comment, CommentMap, Placement};
pub use fold::{strip_spans, Folder};
pub use resolved::{Primitive, ResolvedType, UnionType, VariantType};
pub use span::{Span, SpanError, Spanned};
pub use visitor::Visitor;
