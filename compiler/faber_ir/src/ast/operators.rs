//! Binary, unary and assignment operators.
//!
//! All types are `Copy` and carry their source spelling so that error messages
//! and the canonical printer agree on one table.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    /// `vel`: null-coalescing.
    Coalesce,
}

impl BinaryOp {
    /// Returns the source-level spelling of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "et",
            Self::Or => "aut",
            Self::Coalesce => "vel",
        }
    }

    /// Binding strength. Higher number = binds tighter.
    ///
    /// - 1: `vel`
    /// - 2: `aut`
    /// - 3: `et`
    /// - 4: `==` `!=` (and `est` type tests)
    /// - 5: `<` `<=` `>` `>=`
    /// - 6: ranges (not a `BinaryOp`, see [`RANGE_PRECEDENCE`])
    /// - 7: `+` `-`
    /// - 8: `*` `/` `%`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Coalesce => 1,
            Self::Or => 2,
            Self::And => 3,
            Self::Eq | Self::NotEq => 4,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 5,
            Self::Add | Self::Sub => 7,
            Self::Mul | Self::Div | Self::Mod => 8,
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }
}

/// Precedence of `..` / `usque` ranges, between comparison and additive.
pub const RANGE_PRECEDENCE: u8 = 6;

/// Precedence of `est` / `non est` type tests, same level as equality.
pub const TYPE_TEST_PRECEDENCE: u8 = 4;

/// Precedence of the `sic ... secus` conditional.
pub const CONDITIONAL_PRECEDENCE: u8 = 0;

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `non x`
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "non",
        }
    }
}

/// Assignment operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
        }
    }

    /// The arithmetic operator a compound assignment applies, if any.
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::Assign => None,
            Self::AddAssign => Some(BinaryOp::Add),
            Self::SubAssign => Some(BinaryOp::Sub),
            Self::MulAssign => Some(BinaryOp::Mul),
            Self::DivAssign => Some(BinaryOp::Div),
        }
    }
}

/// How a member or index access treats a null receiver.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Access {
    /// `a.b`, `a[i]`
    #[default]
    Plain,
    /// `a?.b`, `a?[i]`: yields null when the receiver is null.
    Optional,
    /// `a!.b`, `a![i]`: asserts the receiver is non-null.
    NonNull,
}

impl Access {
    /// Prefix printed before `.` or `[` in source syntax.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Optional => "?",
            Self::NonNull => "!",
        }
    }
}
