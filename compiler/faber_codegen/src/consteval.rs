//! Restricted constant evaluation for `praefixum(..)`.
//!
//! Folds literal arithmetic, string concatenation, boolean logic and
//! comparisons. Anything else (identifiers, calls, overflow, division by
//! zero) is not constant and the caller falls back to a runtime helper.

use faber_ir::{BinaryOp, Expr, ExprKind, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nihil,
}

pub fn evaluate(expr: &Expr) -> Option<ConstValue> {
    faber_stack::ensure_sufficient_stack(|| eval(expr))
}

fn eval(expr: &Expr) -> Option<ConstValue> {
    match &expr.kind {
        ExprKind::Int(v) => Some(ConstValue::Int(*v)),
        ExprKind::Float(bits) => Some(ConstValue::Float(f64::from_bits(*bits))),
        ExprKind::Str(s) => Some(ConstValue::Str(s.clone())),
        ExprKind::Bool(b) => Some(ConstValue::Bool(*b)),
        ExprKind::Nihil => Some(ConstValue::Nihil),
        ExprKind::Praefixum(inner) => evaluate(inner),
        ExprKind::Unary { op, operand } => match (op, evaluate(operand)?) {
            (UnaryOp::Neg, ConstValue::Int(v)) => v.checked_neg().map(ConstValue::Int),
            (UnaryOp::Neg, ConstValue::Float(v)) => Some(ConstValue::Float(-v)),
            (UnaryOp::Not, ConstValue::Bool(b)) => Some(ConstValue::Bool(!b)),
            _ => None,
        },
        ExprKind::Conditional {
            cond,
            then,
            otherwise,
        } => match evaluate(cond)? {
            ConstValue::Bool(true) => evaluate(then),
            ConstValue::Bool(false) => evaluate(otherwise),
            _ => None,
        },
        ExprKind::Binary { op, left, right } => binary(*op, evaluate(left)?, evaluate(right)?),
        _ => None,
    }
}

fn binary(op: BinaryOp, left: ConstValue, right: ConstValue) -> Option<ConstValue> {
    use ConstValue::{Bool, Float, Int, Nihil, Str};

    match (op, left, right) {
        (BinaryOp::Add, Int(a), Int(b)) => a.checked_add(b).map(Int),
        (BinaryOp::Sub, Int(a), Int(b)) => a.checked_sub(b).map(Int),
        (BinaryOp::Mul, Int(a), Int(b)) => a.checked_mul(b).map(Int),
        (BinaryOp::Div, Int(a), Int(b)) => exact_quotient(a, b).map(Int),
        (BinaryOp::Mod, Int(a), Int(b)) => unsigned_remainder(a, b).map(Int),
        (BinaryOp::Add, Str(a), Str(b)) => Some(Str(a + &b)),
        (BinaryOp::Add, Str(a), Int(b)) => Some(Str(format!("{a}{b}"))),
        (BinaryOp::Add, Int(a), Str(b)) => Some(Str(format!("{a}{b}"))),
        (BinaryOp::And, Bool(a), Bool(b)) => Some(Bool(a && b)),
        (BinaryOp::Or, Bool(a), Bool(b)) => Some(Bool(a || b)),
        (BinaryOp::Coalesce, Nihil, other) => Some(other),
        (BinaryOp::Coalesce, value, _) => Some(value),
        (op, Str(a), Str(b)) if op.is_comparison() => Some(Bool(compare(op, a.cmp(&b)))),
        (op, Bool(a), Bool(b)) if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) => {
            Some(Bool((a == b) == (op == BinaryOp::Eq)))
        }
        (op, a, b) => {
            let (a, b) = (as_float(&a)?, as_float(&b)?);
            if op.is_comparison() {
                return a.partial_cmp(&b).map(|ord| Bool(compare(op, ord)));
            }
            let value = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div if b != 0.0 => a / b,
                _ => return None,
            };
            value.is_finite().then_some(Float(value))
        }
    }
}

/// Targets disagree on integer division: TypeScript yields a fraction,
/// Python floors, Zig truncates. Only an exact quotient means the same
/// everywhere.
fn exact_quotient(a: i64, b: i64) -> Option<i64> {
    if a.checked_rem(b)? == 0 {
        a.checked_div(b)
    } else {
        None
    }
}

/// Truncated and floored remainders agree when neither operand is negative
/// or when the division is exact.
fn unsigned_remainder(a: i64, b: i64) -> Option<i64> {
    let rem = a.checked_rem(b)?;
    (rem == 0 || (a >= 0 && b > 0)).then_some(rem)
}

#[allow(clippy::cast_precision_loss)]
fn as_float(value: &ConstValue) -> Option<f64> {
    match value {
        ConstValue::Int(v) => Some(*v as f64),
        ConstValue::Float(v) => Some(*v),
        _ => None,
    }
}

fn compare(op: BinaryOp, ord: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};
    match op {
        BinaryOp::Eq => ord == Equal,
        BinaryOp::NotEq => ord != Equal,
        BinaryOp::Lt => ord == Less,
        BinaryOp::LtEq => ord != Greater,
        BinaryOp::Gt => ord == Greater,
        BinaryOp::GtEq => ord != Less,
        _ => false,
    }
}
