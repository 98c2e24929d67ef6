//! Property-based tests for the canonical printer.
//!
//! Random expression trees are printed, re-parsed and compared with spans
//! stripped, which checks that parentheses are reintroduced wherever binding
//! strength needs them. Printing the re-parsed text again must not change it.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use faber_fmt::{format_source, print_program, FormatOptions};
use faber_ir::{
    strip_spans, Access, BinaryOp, Expr, ExprKind, Lambda, LambdaBody, Param, Program,
    ScribeLevel, Span, Stmt, StmtKind, TypeAnnotation, UnaryOp, VarDecl,
};
use proptest::prelude::*;

fn e(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

fn name_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "b", "alpha", "beta", "gamma"])
}

fn type_strategy() -> impl Strategy<Value = TypeAnnotation> {
    prop::sample::select(vec!["numerus", "textus", "bivalens"]).prop_map(TypeAnnotation::named)
}

fn access_strategy() -> impl Strategy<Value = Access> {
    prop::sample::select(vec![Access::Plain, Access::Optional, Access::NonNull])
}

fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Coalesce,
    ])
}

fn leaf_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (0i64..1000).prop_map(|n| e(ExprKind::Int(n))),
        prop::sample::select(vec![0.5, 2.25, 3.0, 1e21]).prop_map(|f| Expr::float(f, Span::DUMMY)),
        "[a-z #]{0,6}".prop_map(|s| e(ExprKind::Str(s))),
        any::<bool>().prop_map(|b| e(ExprKind::Bool(b))),
        Just(e(ExprKind::Nihil)),
        name_strategy().prop_map(|n| Expr::ident(n, Span::DUMMY)),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            (binary_op_strategy(), inner.clone(), inner.clone()).prop_map(|(op, l, r)| {
                e(ExprKind::Binary {
                    op,
                    left: Box::new(l),
                    right: Box::new(r),
                })
            }),
            (
                prop::sample::select(vec![UnaryOp::Neg, UnaryOp::Not]),
                inner.clone()
            )
                .prop_map(|(op, operand)| e(ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                })),
            (inner.clone(), inner.clone(), inner.clone()).prop_map(|(c, t, o)| {
                e(ExprKind::Conditional {
                    cond: Box::new(c),
                    then: Box::new(t),
                    otherwise: Box::new(o),
                })
            }),
            (
                inner.clone(),
                inner.clone(),
                any::<bool>(),
                prop::option::of(inner.clone())
            )
                .prop_map(|(start, end, inclusive, step)| e(ExprKind::Range {
                    start: Box::new(start),
                    end: Box::new(end),
                    inclusive,
                    step: step.map(Box::new),
                })),
            (inner.clone(), type_strategy()).prop_map(|(x, ty)| e(ExprKind::Cast {
                expr: Box::new(x),
                ty,
            })),
            (inner.clone(), type_strategy(), any::<bool>()).prop_map(|(x, ty, negated)| {
                e(ExprKind::TypeTest {
                    expr: Box::new(x),
                    ty,
                    negated,
                })
            }),
            (inner.clone(), access_strategy()).prop_map(|(object, access)| e(ExprKind::Member {
                object: Box::new(object),
                property: "x".to_string(),
                access,
            })),
            (inner.clone(), inner.clone(), access_strategy()).prop_map(|(object, index, access)| {
                e(ExprKind::Index {
                    object: Box::new(object),
                    index: Box::new(index),
                    access,
                })
            }),
            (prop::collection::vec(inner.clone(), 0..4), any::<bool>()).prop_map(
                |(args, optional)| e(ExprKind::Call {
                    callee: Box::new(Expr::ident("f", Span::DUMMY)),
                    args,
                    optional,
                })
            ),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| e(ExprKind::Array(items))),
            (
                prop::collection::vec(name_strategy(), 0..3),
                inner.clone(),
                any::<bool>()
            )
                .prop_map(|(params, body, is_async)| e(ExprKind::Lambda(Lambda {
                    params: params
                        .into_iter()
                        .map(|p| Param::simple(p, Span::DUMMY))
                        .collect(),
                    body: LambdaBody::Expr(Box::new(body)),
                    is_async,
                }))),
        ]
    })
}

fn stmt_strategy() -> impl Strategy<Value = Stmt> {
    let kind = prop_oneof![
        (name_strategy(), any::<bool>(), expr_strategy()).prop_map(|(name, mutable, init)| {
            StmtKind::Var(VarDecl {
                mutable,
                name: name.to_string(),
                ty: None,
                init: Some(init),
            })
        }),
        prop::collection::vec(expr_strategy(), 0..3).prop_map(|args| StmtKind::Scribe {
            level: ScribeLevel::Scribe,
            args,
        }),
        expr_strategy().prop_map(StmtKind::Expr),
    ];
    kind.prop_map(|kind| Stmt::new(kind, Span::DUMMY))
}

fn program_strategy() -> impl Strategy<Value = Program> {
    prop::collection::vec(stmt_strategy(), 1..4).prop_map(|body| Program {
        body,
        span: Span::DUMMY,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_trees_parse_back(program in program_strategy()) {
        let printed = print_program(&program, &FormatOptions::default());
        let reparsed = faber_parse::parse(&printed)
            .unwrap_or_else(|e| panic!("printed text does not parse: {e}\n{printed}"));
        prop_assert_eq!(strip_spans(reparsed), strip_spans(program), "{}", printed);
    }

    #[test]
    fn formatting_printed_trees_is_stable(program in program_strategy()) {
        let printed = print_program(&program, &FormatOptions::default());
        let formatted = format_source(&printed, &FormatOptions::default())
            .unwrap_or_else(|e| panic!("format failed: {e}\n{printed}"));
        prop_assert_eq!(formatted, printed);
    }

    #[test]
    fn narrow_widths_still_parse(program in program_strategy(), width in 10usize..40) {
        let options = FormatOptions::default().with_width(width);
        let printed = print_program(&program, &options);
        let reparsed = faber_parse::parse(&printed)
            .unwrap_or_else(|e| panic!("printed text does not parse: {e}\n{printed}"));
        prop_assert_eq!(strip_spans(reparsed), strip_spans(program), "{}", printed);
    }
}
