use super::*;
use faber_ir::{
    strip_spans, Access, BinaryOp, CaseBinding, Expr, ExprKind, LambdaBody, ReturnVerb, Stmt,
    StmtKind, TypeAnnotation,
};
use pretty_assertions::assert_eq;

fn parse_ok(src: &str) -> Vec<Stmt> {
    match parse(src) {
        Ok(program) => strip_spans(program).body,
        Err(e) => panic!("parse failed for {src:?}: {e}"),
    }
}

fn expr(src: &str) -> Expr {
    let mut body = parse_ok(src);
    assert_eq!(body.len(), 1, "expected one statement");
    match body.remove(0).kind {
        StmtKind::Expr(e) => e,
        other => panic!("expected expression statement, got {}", other.kind_name()),
    }
}

#[test]
fn var_decl_with_and_without_type() {
    let body = parse_ok("fixum numerus n = 1\nvaria x = 2\nvaria lista<textus> xs");
    assert_eq!(body.len(), 3);
    let StmtKind::Var(first) = &body[0].kind else {
        panic!("expected var");
    };
    assert_eq!(first.ty, Some(TypeAnnotation::named("numerus")));
    assert!(!first.mutable);
    let StmtKind::Var(second) = &body[1].kind else {
        panic!("expected var");
    };
    assert_eq!(second.ty, None);
    let StmtKind::Var(third) = &body[2].kind else {
        panic!("expected var");
    };
    assert_eq!(
        third.ty,
        Some(TypeAnnotation::generic(
            "lista",
            vec![TypeAnnotation::named("textus")]
        ))
    );
    assert!(third.init.is_none());
}

#[test]
fn fixum_requires_initializer() {
    assert!(parse("fixum x").is_err());
}

#[test]
fn precedence_of_arithmetic_and_logic() {
    let e = expr("a + b * c et non d");
    let ExprKind::Binary { op, left, .. } = e.kind else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::And);
    let ExprKind::Binary { op, right, .. } = left.kind else {
        panic!("expected sum");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn ranges_with_step() {
    let e = expr("0 usque 10 per 2");
    let ExprKind::Range {
        inclusive, step, ..
    } = e.kind
    else {
        panic!("expected range");
    };
    assert!(inclusive);
    assert_eq!(step.map(|s| s.kind), Some(ExprKind::Int(2)));

    let ExprKind::Range { inclusive, .. } = expr("0..n").kind else {
        panic!("expected range");
    };
    assert!(!inclusive);
}

#[test]
fn postfix_chain_with_optional_access() {
    let e = expr("a?.b![0]?(1)");
    let ExprKind::Call {
        callee, optional, ..
    } = e.kind
    else {
        panic!("expected call");
    };
    assert!(optional);
    let ExprKind::Index { object, access, .. } = callee.kind else {
        panic!("expected index");
    };
    assert_eq!(access, Access::NonNull);
    assert!(matches!(
        object.kind,
        ExprKind::Member {
            access: Access::Optional,
            ..
        }
    ));
}

#[test]
fn paren_on_new_line_starts_new_statement() {
    let body = parse_ok("f\n(x)");
    assert_eq!(body.len(), 2);
}

#[test]
fn conditional_expression() {
    let e = expr("x sic 1 secus 2");
    assert!(matches!(e.kind, ExprKind::Conditional { .. }));
}

#[test]
fn type_tests() {
    let e = expr("x non est textus");
    assert!(matches!(e.kind, ExprKind::TypeTest { negated: true, .. }));
}

#[test]
fn lambdas_with_expression_and_block_bodies() {
    let e = expr("f(pro a, b: a + b, pro x { redde x })");
    let ExprKind::Call { args, .. } = e.kind else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 2);
    let ExprKind::Lambda(first) = &args[0].kind else {
        panic!("expected lambda");
    };
    assert_eq!(first.params.len(), 2);
    assert!(matches!(first.body, LambdaBody::Expr(_)));
    let ExprKind::Lambda(second) = &args[1].kind else {
        panic!("expected lambda");
    };
    assert!(matches!(second.body, LambdaBody::Block(_)));
}

#[test]
fn spread_only_in_lists() {
    assert!(parse("f(...xs)").is_ok());
    assert!(parse("fixum y = [1, ...xs]").is_ok());
    let err = parse("fixum y = ...xs").err();
    assert_eq!(err.map(|e| e.kind), Some(ParseErrorKind::MisplacedSpread));
}

#[test]
fn function_with_verb_and_modifiers() {
    let body = parse_ok("futura functio f(numerus a, b = 2, ...textus rest) fiet numerus { redde a }");
    let StmtKind::Function(f) = &body[0].kind else {
        panic!("expected function");
    };
    assert!(f.modifiers.is_async);
    assert_eq!(f.verb, Some(ReturnVerb::Fiet));
    assert_eq!(f.params.len(), 3);
    assert_eq!(f.params[0].ty, Some(TypeAnnotation::named("numerus")));
    assert_eq!(f.params[1].ty, None);
    assert!(f.params[2].rest);
}

#[test]
fn arrow_return_has_no_verb() {
    let body = parse_ok("functio f() -> numerus { redde 1 }");
    let StmtKind::Function(f) = &body[0].kind else {
        panic!("expected function");
    };
    assert_eq!(f.verb, None);
    assert_eq!(f.ret, Some(TypeAnnotation::named("numerus")));
}

#[test]
fn discerne_binding_styles() {
    let src = "discerne e {\n  si Click pro a, b { scribe a }\n  si Key ut k { scribe k }\n  si Quit { rumpe }\n  ceterum { }\n}";
    let body = parse_ok(src);
    let StmtKind::Discerne(d) = &body[0].kind else {
        panic!("expected discerne");
    };
    assert_eq!(d.cases.len(), 3);
    assert_eq!(
        d.cases[0].binding,
        CaseBinding::Positional(vec!["a".into(), "b".into()])
    );
    assert_eq!(d.cases[1].binding, CaseBinding::Alias("k".into()));
    assert_eq!(d.cases[2].binding, CaseBinding::None);
    assert!(d.otherwise.is_some());
}

#[test]
fn declarations() {
    let src = "genus Persona sub Ens implet Nominatus {\n  textus nomen\n  numerus aetas = 0\n  functio saluta() -> textus { redde ego.nomen }\n}\npactum Nominatus { functio nomen() -> textus }\nordo Color { rubrum, viride = 2 }\ndiscretio Eventus { Click { numerus x, numerus y }, Quit }\ntypus Nomina = lista<textus>\nex \"norma\" importa a, b ut c";
    let body = parse_ok(src);
    let kinds: Vec<_> = body.iter().map(|s| s.kind.kind_name()).collect();
    assert_eq!(
        kinds,
        vec!["Genus", "Pactum", "Ordo", "Discretio", "TypeAlias", "Import"]
    );
    let StmtKind::Genus(g) = &body[0].kind else {
        panic!("expected genus");
    };
    assert_eq!(g.fields.len(), 2);
    assert_eq!(g.methods.len(), 1);
    let StmtKind::Pactum(p) = &body[1].kind else {
        panic!("expected pactum");
    };
    assert!(p.methods[0].body.is_none());
}

#[test]
fn control_flow_statements() {
    let src = "si a { } sin b { } secus { }\ndum verum { rumpe }\nex 0..3 pro i { perge }\nde obj pro k { }\nelige x { casu 1, 2 { } ceterum { } }\ntempta { iace \"x\" } cape e { } demum { }\nadfirma x > 0, \"positive\"\nscribe a, b";
    let kinds: Vec<_> = parse_ok(src).iter().map(|s| s.kind.kind_name()).collect();
    assert_eq!(
        kinds,
        vec!["If", "While", "ForOf", "ForIn", "Elige", "Try", "Assert", "Scribe"]
    );
}

#[test]
fn two_statements_on_one_line_need_separator() {
    assert!(parse("fixum a = 1 fixum b = 2").is_err());
    assert!(parse("fixum a = 1; fixum b = 2").is_ok());
}

#[test]
fn invalid_assignment_target() {
    let err = parse("1 = 2").err();
    assert_eq!(err.map(|e| e.kind), Some(ParseErrorKind::InvalidAssignTarget));
}

#[test]
fn error_context_is_reported() {
    let err = parse("dum x { fixum = }").err();
    let message = err.map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("while parsing"), "{message}");
}

#[test]
fn pathological_nesting_is_rejected() {
    let src = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    let err = parse(&src).err();
    assert!(matches!(err.map(|e| e.kind), Some(ParseErrorKind::TooDeep(_))));
}
