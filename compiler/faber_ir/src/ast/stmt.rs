//! Statements and declarations.

use super::expr::Expr;
use super::types::TypeAnnotation;
use crate::{Span, Spanned};

/// Root of a parsed file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// `{ .. }`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Expr(Expr),
    Var(VarDecl),
    Function(FunctionDecl),
    Genus(GenusDecl),
    Pactum(PactumDecl),
    Ordo(OrdoDecl),
    Discretio(DiscretioDecl),
    TypeAlias {
        name: String,
        ty: TypeAnnotation,
    },
    Import(ImportDecl),
    If(IfStmt),
    While {
        cond: Expr,
        body: Block,
    },
    /// `ex iterable pro binding { .. }`
    ForOf {
        binding: String,
        iterable: Expr,
        body: Block,
    },
    /// `de object pro binding { .. }`
    ForIn {
        binding: String,
        object: Expr,
        body: Block,
    },
    Discerne(DiscerneStmt),
    Elige(EligeStmt),
    Return(Option<Expr>),
    Break,
    Continue,
    /// `iace expr`
    Throw(Expr),
    /// `mori expr`
    Panic(Expr),
    Try(TryStmt),
    Scribe {
        level: ScribeLevel,
        args: Vec<Expr>,
    },
    Assert {
        cond: Expr,
        message: Option<Expr>,
    },
    Block(Block),
}

/// `fixum` / `varia`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarDecl {
    pub mutable: bool,
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub init: Option<Expr>,
}

/// One of the four return verbs selecting a value-production protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnVerb {
    /// Synchronous, single value.
    Fit,
    /// Synchronous, multiple values (stream).
    Fiunt,
    /// Asynchronous, single value.
    Fiet,
    /// Asynchronous, multiple values.
    Fient,
}

impl ReturnVerb {
    pub const fn keyword(self) -> &'static str {
        match self {
            ReturnVerb::Fit => "fit",
            ReturnVerb::Fiunt => "fiunt",
            ReturnVerb::Fiet => "fiet",
            ReturnVerb::Fient => "fient",
        }
    }

    pub const fn is_async(self) -> bool {
        matches!(self, ReturnVerb::Fiet | ReturnVerb::Fient)
    }

    pub const fn is_stream(self) -> bool {
        matches!(self, ReturnVerb::Fiunt | ReturnVerb::Fient)
    }
}

/// `futura` / `cursor` prefixes on a function declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct FnModifiers {
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub default: Option<Expr>,
    /// `...Type rest`
    pub rest: bool,
    pub span: Span,
}

impl Param {
    pub fn simple(name: impl Into<String>, span: Span) -> Self {
        Param {
            name: name.into(),
            ty: None,
            default: None,
            rest: false,
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionDecl {
    pub name: String,
    pub modifiers: FnModifiers,
    pub params: Vec<Param>,
    /// `None` with `ret: Some(_)` is the `-> T` form.
    pub verb: Option<ReturnVerb>,
    pub ret: Option<TypeAnnotation>,
    /// `None` for `pactum` method signatures.
    pub body: Option<Block>,
    pub span: Span,
}

/// Field of a `genus` or a `discretio` variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeAnnotation,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenusDecl {
    pub name: String,
    pub base: Option<String>,
    pub implements: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<FunctionDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PactumDecl {
    pub name: String,
    pub methods: Vec<FunctionDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrdoMember {
    pub name: String,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrdoDecl {
    pub name: String,
    pub members: Vec<OrdoMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiscretioDecl {
    pub name: String,
    pub variants: Vec<VariantDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
}

/// `ex "path" importa a, b ut c`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportDecl {
    pub path: String,
    pub items: Vec<ImportItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfBranch {
    pub cond: Expr,
    pub body: Block,
}

/// `si c {} sin c {} secus {}`; `branches` is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfStmt {
    pub branches: Vec<IfBranch>,
    pub otherwise: Option<Block>,
}

/// How a `discerne` case binds the matched value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CaseBinding {
    /// `si Variant { }`
    None,
    /// `si Variant ut v { }`
    Alias(String),
    /// `si Variant pro a, b { }`: binds fields in declaration order.
    Positional(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiscerneCase {
    pub variant: String,
    pub binding: CaseBinding,
    pub body: Block,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiscerneStmt {
    pub subject: Expr,
    pub cases: Vec<DiscerneCase>,
    /// `ceterum { }`, always matched last.
    pub otherwise: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EligeCase {
    pub values: Vec<Expr>,
    pub body: Block,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EligeStmt {
    pub subject: Expr,
    pub cases: Vec<EligeCase>,
    pub otherwise: Option<Block>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CatchClause {
    pub binding: Option<String>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TryStmt {
    pub body: Block,
    pub catch: Option<CatchClause>,
    pub finally: Option<Block>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScribeLevel {
    /// `scribe`: standard output.
    Scribe,
    /// `vide`: debug output.
    Vide,
    /// `mone`: warning output.
    Mone,
}

impl ScribeLevel {
    pub const fn keyword(self) -> &'static str {
        match self {
            ScribeLevel::Scribe => "scribe",
            ScribeLevel::Vide => "vide",
            ScribeLevel::Mone => "mone",
        }
    }
}
