//! Range and slice bounds.
//!
//! `a..b` excludes `b`, `a usque b` includes it. Every target iterates and
//! slices exclusive of the end, so an inclusive end moves one step further.
//! Literal ends are adjusted here; anything else gets a runtime `+ 1`
//! (or `- 1` for a descending range).

use faber_ir::Expr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Ascending,
    Descending,
}

/// Direction of a range. Only a literal negative step descends; a runtime
/// step is assumed positive.
pub fn step_direction(step: Option<&Expr>) -> StepDirection {
    match step.and_then(Expr::as_int_literal) {
        Some(v) if v < 0 => StepDirection::Descending,
        _ => StepDirection::Ascending,
    }
}

/// Exclusive end bound a target should emit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndBound {
    /// Literal end, already adjusted.
    Folded(i64),
    /// Emit the end expression followed by this adjustment (0, +1 or -1).
    Runtime { adjust: i64 },
}

impl EndBound {
    /// Render the bound given the generated end expression.
    pub fn render(self, end_text: &str) -> String {
        match self {
            EndBound::Folded(v) => v.to_string(),
            EndBound::Runtime { adjust: 0 } => end_text.to_string(),
            EndBound::Runtime { adjust } if adjust > 0 => format!("{end_text} + {adjust}"),
            EndBound::Runtime { adjust } => format!("{end_text} - {}", -adjust),
        }
    }
}

pub fn end_bound(end: &Expr, inclusive: bool, direction: StepDirection) -> EndBound {
    let adjust = match (inclusive, direction) {
        (false, _) => 0,
        (true, StepDirection::Ascending) => 1,
        (true, StepDirection::Descending) => -1,
    };
    match end.as_int_literal().and_then(|v| v.checked_add(adjust)) {
        Some(v) => EndBound::Folded(v),
        None => EndBound::Runtime { adjust },
    }
}

/// End of a slice `items[a..b]` / `items[a usque b]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SliceEnd {
    /// Slice to the end of the sequence (`usque -1`).
    Open,
    Bound(EndBound),
}

pub fn slice_end(end: &Expr, inclusive: bool) -> SliceEnd {
    if inclusive && end.as_int_literal() == Some(-1) {
        return SliceEnd::Open;
    }
    SliceEnd::Bound(end_bound(end, inclusive, StepDirection::Ascending))
}

/// A literal negative index (`items[-1]`), counted from the end.
pub fn negative_index(index: &Expr) -> Option<i64> {
    index.as_int_literal().filter(|v| *v < 0)
}

/// Absolute value of a literal step, for `-=` style descending loops.
pub fn step_magnitude(step: &Expr) -> Option<u64> {
    step.as_int_literal().map(i64::unsigned_abs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_ir::{ExprKind, Span, UnaryOp};

    fn int(v: i64) -> Expr {
        if v < 0 {
            Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(Expr::new(ExprKind::Int(-v), Span::DUMMY)),
                },
                Span::DUMMY,
            )
        } else {
            Expr::new(ExprKind::Int(v), Span::DUMMY)
        }
    }

    #[test]
    fn literal_ends_fold() {
        let ten = int(10);
        assert_eq!(
            end_bound(&ten, false, StepDirection::Ascending),
            EndBound::Folded(10)
        );
        assert_eq!(
            end_bound(&ten, true, StepDirection::Ascending),
            EndBound::Folded(11)
        );
        assert_eq!(
            end_bound(&int(-3), true, StepDirection::Descending),
            EndBound::Folded(-4)
        );
    }

    #[test]
    fn runtime_ends_adjust() {
        let n = Expr::ident("n", Span::DUMMY);
        let bound = end_bound(&n, true, StepDirection::Ascending);
        assert_eq!(bound, EndBound::Runtime { adjust: 1 });
        assert_eq!(bound.render("n"), "n + 1");
        assert_eq!(
            end_bound(&n, true, StepDirection::Descending).render("n"),
            "n - 1"
        );
        assert_eq!(end_bound(&n, false, StepDirection::Ascending).render("n"), "n");
    }

    #[test]
    fn inclusive_count_is_one_more() {
        for (start, end) in [(0i64, 10i64), (3, 3), (-5, 2)] {
            let exclusive = match end_bound(&int(end), false, StepDirection::Ascending) {
                EndBound::Folded(v) => v,
                EndBound::Runtime { .. } => unreachable!(),
            };
            let inclusive = match end_bound(&int(end), true, StepDirection::Ascending) {
                EndBound::Folded(v) => v,
                EndBound::Runtime { .. } => unreachable!(),
            };
            assert_eq!((inclusive - start) - (exclusive - start), 1);
        }
    }

    #[test]
    fn steps_and_indices() {
        assert_eq!(step_direction(Some(&int(-2))), StepDirection::Descending);
        assert_eq!(step_direction(Some(&int(2))), StepDirection::Ascending);
        assert_eq!(step_direction(None), StepDirection::Ascending);
        assert_eq!(negative_index(&int(-1)), Some(-1));
        assert_eq!(negative_index(&int(0)), None);
        assert_eq!(slice_end(&int(-1), true), SliceEnd::Open);
        assert_eq!(
            slice_end(&int(3), true),
            SliceEnd::Bound(EndBound::Folded(4))
        );
    }
}
