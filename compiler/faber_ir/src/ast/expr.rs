//! Expression nodes.

use super::operators::{Access, AssignOp, BinaryOp, UnaryOp};
use super::stmt::{Block, Param};
use super::types::TypeAnnotation;
use crate::resolved::ResolvedType;
use crate::{Span, Spanned};

/// An expression with its source span and, once analyzed, its resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Option<ResolvedType>,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            ty: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: ResolvedType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Float literal helper; floats are stored as bits so `Expr` stays `Eq + Hash`.
    pub fn float(value: f64, span: Span) -> Self {
        Expr::new(ExprKind::Float(value.to_bits()), span)
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Expr::new(ExprKind::Ident(name.into()), span)
    }

    /// Integer value of a literal, including a negated literal (`-1`).
    pub fn as_int_literal(&self) -> Option<i64> {
        match &self.kind {
            ExprKind::Int(v) => Some(*v),
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => match operand.kind {
                ExprKind::Int(v) => v.checked_neg(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether this is a string literal (plain, not template).
    pub fn is_str_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Str(_))
    }

    /// Identifiers, `ego` and literals can be repeated in output without
    /// re-evaluating anything observable.
    pub fn is_simple(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ident(_)
                | ExprKind::Ego
                | ExprKind::Int(_)
                | ExprKind::Float(_)
                | ExprKind::Str(_)
                | ExprKind::Bool(_)
                | ExprKind::Nihil
        )
    }

    /// Whether the expression contains an optional access (`?.`, `?[`, `?(`)
    /// anywhere along its receiver chain.
    pub fn has_optional_chain(&self) -> bool {
        match &self.kind {
            ExprKind::Member { object, access, .. } | ExprKind::Index { object, access, .. } => {
                *access == Access::Optional || object.has_optional_chain()
            }
            ExprKind::Call {
                callee, optional, ..
            } => *optional || callee.has_optional_chain(),
            _ => false,
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Int(i64),
    /// Float literal stored as `f64::to_bits`.
    Float(u64),
    /// String literal with escapes already processed.
    Str(String),
    /// Template literal body between the backticks, kept raw.
    Template(String),
    Bool(bool),
    /// `nihil`
    Nihil,
    /// `ego`
    Ego,
    Ident(String),
    Array(Vec<Expr>),
    Object(Vec<ObjectEntry>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `cond sic then secus otherwise`
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        /// `f?(..)`
        optional: bool,
    },
    Member {
        object: Box<Expr>,
        property: String,
        access: Access,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        access: Access,
    },
    /// `start..end` (exclusive) or `start usque end` (inclusive), optional `per step`.
    Range {
        start: Box<Expr>,
        end: Box<Expr>,
        inclusive: bool,
        step: Option<Box<Expr>>,
    },
    Lambda(Lambda),
    /// `novum Class(args)` or `novum Class { field: value }`
    New {
        class: String,
        init: NewInit,
    },
    /// `finge Variant { field: value }`
    Finge {
        variant: String,
        fields: Vec<FieldInit>,
    },
    Cede(Box<Expr>),
    Praefixum(Box<Expr>),
    /// `expr qua Type`
    Cast {
        expr: Box<Expr>,
        ty: TypeAnnotation,
    },
    /// `expr est Type` / `expr non est Type`
    TypeTest {
        expr: Box<Expr>,
        ty: TypeAnnotation,
        negated: bool,
    },
    /// `...expr`, only valid inside argument lists and array literals.
    Spread(Box<Expr>),
}

impl ExprKind {
    /// Discriminant name used in diagnostics and traces.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ExprKind::Int(_) => "Int",
            ExprKind::Float(_) => "Float",
            ExprKind::Str(_) => "Str",
            ExprKind::Template(_) => "Template",
            ExprKind::Bool(_) => "Bool",
            ExprKind::Nihil => "Nihil",
            ExprKind::Ego => "Ego",
            ExprKind::Ident(_) => "Ident",
            ExprKind::Array(_) => "Array",
            ExprKind::Object(_) => "Object",
            ExprKind::Unary { .. } => "Unary",
            ExprKind::Binary { .. } => "Binary",
            ExprKind::Assign { .. } => "Assign",
            ExprKind::Conditional { .. } => "Conditional",
            ExprKind::Call { .. } => "Call",
            ExprKind::Member { .. } => "Member",
            ExprKind::Index { .. } => "Index",
            ExprKind::Range { .. } => "Range",
            ExprKind::Lambda(_) => "Lambda",
            ExprKind::New { .. } => "New",
            ExprKind::Finge { .. } => "Finge",
            ExprKind::Cede(_) => "Cede",
            ExprKind::Praefixum(_) => "Praefixum",
            ExprKind::Cast { .. } => "Cast",
            ExprKind::TypeTest { .. } => "TypeTest",
            ExprKind::Spread(_) => "Spread",
        }
    }
}

/// Entry of an object literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectEntry {
    Prop { key: String, value: Expr },
    Spread(Expr),
}

/// `name: value` inside `novum C { .. }` or `finge V { .. }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldInit {
    pub name: String,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NewInit {
    Args(Vec<Expr>),
    Fields(Vec<FieldInit>),
}

/// `pro a, b: expr`, `pro a { .. }`, `futura pro a: expr`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lambda {
    pub params: Vec<Param>,
    pub body: LambdaBody,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}
