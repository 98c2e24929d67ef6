use super::annotate;
use faber_ir::{
    CaseBinding, Expr, ExprKind, Primitive, Program, ResolvedType, Stmt, StmtKind, Visitor,
};
use pretty_assertions::assert_eq;

fn annotated(src: &str) -> Program {
    match faber_parse::parse(src) {
        Ok(program) => annotate(program),
        Err(e) => panic!("parse failed for {src:?}: {e}"),
    }
}

/// Collect `(identifier, type)` pairs for every identifier use.
#[derive(Default)]
struct IdentTypes(Vec<(String, Option<ResolvedType>)>);

impl<'ast> Visitor<'ast> for IdentTypes {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let ExprKind::Ident(name) = &expr.kind {
            self.0.push((name.clone(), expr.ty.clone()));
        }
        faber_ir::visitor::walk_expr(self, expr);
    }
}

fn type_of_use(program: &Program, name: &str) -> Option<ResolvedType> {
    let mut collector = IdentTypes::default();
    collector.visit_program(program);
    collector
        .0
        .into_iter()
        .rev()
        .find(|(n, _)| n == name)
        .and_then(|(_, ty)| ty)
}

fn numerus() -> ResolvedType {
    ResolvedType::Primitive(Primitive::Numerus)
}

#[test]
fn declared_and_inferred_variables() {
    let program = annotated("fixum lista<numerus> xs = []\nfixum n = 1\nscribe xs, n");
    assert_eq!(
        type_of_use(&program, "xs"),
        Some(ResolvedType::generic("lista", vec![numerus()]))
    );
    assert_eq!(type_of_use(&program, "n"), Some(numerus()));
}

#[test]
fn empty_literal_takes_annotation() {
    let program = annotated("fixum tabula<textus, numerus> t = {}");
    let StmtKind::Var(decl) = &program.body[0].kind else {
        panic!("expected var");
    };
    let init_ty = decl.init.as_ref().and_then(|e| e.ty.clone());
    assert_eq!(init_ty.map(|t| t.head_name().to_string()), Some("tabula".into()));
}

#[test]
fn params_are_scoped_to_their_function() {
    let program = annotated(
        "functio f(textus s, ...numerus rest) { scribe s, rest }\nfixum s = 1\nscribe s",
    );
    let mut collector = IdentTypes::default();
    collector.visit_program(&program);
    let uses: Vec<_> = collector
        .0
        .iter()
        .map(|(n, t)| (n.as_str(), t.as_ref().map(ToString::to_string)))
        .collect();
    assert_eq!(
        uses,
        vec![
            ("s", Some("textus".to_string())),
            ("rest", Some("lista<numerus>".to_string())),
            ("s", Some("numerus".to_string())),
        ]
    );
}

#[test]
fn discretio_subject_and_positional_bindings() {
    let src = "discretio Eventus { Click { numerus x, numerus y }, Quit }\n\
               functio f(Eventus e) {\n  discerne e {\n    si Click pro a, b { scribe a, b }\n    si Quit { }\n  }\n}";
    let program = annotated(src);
    let StmtKind::Function(f) = &program.body[1].kind else {
        panic!("expected function");
    };
    let body = f.body.as_ref().map(|b| b.stmts.clone()).unwrap_or_default();
    let StmtKind::Discerne(d) = &body[0].kind else {
        panic!("expected discerne");
    };
    let union = d.subject.ty.as_ref().and_then(|t| t.as_union());
    let fields: Vec<_> = union
        .and_then(|u| u.variant("Click"))
        .map(|v| v.fields.iter().map(|(n, _)| n.clone()).collect())
        .unwrap_or_default();
    assert_eq!(fields, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(
        d.cases[0].binding,
        CaseBinding::Positional(vec!["a".into(), "b".into()])
    );
    assert_eq!(type_of_use(&program, "b"), Some(numerus()));
}

#[test]
fn finge_resolves_to_owning_union() {
    let program = annotated("discretio Forma { Circulus { fractus r } }\nfixum c = finge Circulus { r: 1.0 }\nscribe c");
    let ty = type_of_use(&program, "c");
    assert_eq!(ty.as_ref().map(ResolvedType::head_name), Some("Forma"));
}

#[test]
fn genus_fields_through_ego() {
    let src = "genus Acervus {\n  lista<textus> items\n  functio summa() { scribe ego.items.longitudo() }\n}";
    let program = annotated(src);
    let StmtKind::Genus(g) = &program.body[0].kind else {
        panic!("expected genus");
    };
    let stmts = g.methods[0].body.as_ref().map(|b| b.stmts.clone()).unwrap_or_default();
    let StmtKind::Scribe { args, .. } = &stmts[0].kind else {
        panic!("expected scribe");
    };
    let ExprKind::Call { callee, .. } = &args[0].kind else {
        panic!("expected call");
    };
    let ExprKind::Member { object, .. } = &callee.kind else {
        panic!("expected member");
    };
    assert_eq!(
        object.ty,
        Some(ResolvedType::generic(
            "lista",
            vec![ResolvedType::Primitive(Primitive::Textus)]
        ))
    );
    assert_eq!(args[0].ty, Some(numerus()));
}

#[test]
fn loop_bindings_take_element_types() {
    let program = annotated(
        "fixum lista<textus> nomina = []\nex nomina pro nomen { scribe nomen }\nex 0..3 pro i { scribe i }",
    );
    assert_eq!(
        type_of_use(&program, "nomen"),
        Some(ResolvedType::Primitive(Primitive::Textus))
    );
    assert_eq!(type_of_use(&program, "i"), Some(numerus()));
}

#[test]
fn untyped_lambda_params_shadow_outer_names() {
    let program = annotated("fixum x = 1\nfixum f = pro x: x");
    let uses: Vec<Stmt> = program.body;
    let StmtKind::Var(decl) = &uses[1].kind else {
        panic!("expected var");
    };
    let Some(ExprKind::Lambda(lambda)) = decl.init.as_ref().map(|e| &e.kind) else {
        panic!("expected lambda");
    };
    let faber_ir::LambdaBody::Expr(body) = &lambda.body else {
        panic!("expected expression body");
    };
    assert_eq!(body.ty, None);
}

#[test]
fn arithmetic_promotion() {
    let program = annotated("fixum a = 1 + 2.5\nfixum b = \"n\" + 1\nscribe a, b");
    assert_eq!(
        type_of_use(&program, "a"),
        Some(ResolvedType::Primitive(Primitive::Fractus))
    );
    assert_eq!(
        type_of_use(&program, "b"),
        Some(ResolvedType::Primitive(Primitive::Textus))
    );
}
