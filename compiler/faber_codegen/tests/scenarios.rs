//! Cross-target lowering scenarios.
//!
//! Unit tests next to each generator pin exact output for one target; these
//! check that the same source keeps its meaning across all of them.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use faber_codegen::{generate, CodegenError, CodegenOptions, Target};
use pretty_assertions::assert_eq;

fn program(src: &str) -> faber_ir::Program {
    faber_types::annotate(faber_parse::parse(src).unwrap_or_else(|e| panic!("{e}\n{src}")))
}

fn lower(src: &str, target: Target) -> String {
    generate(&program(src), &CodegenOptions::new(target))
        .unwrap_or_else(|e| panic!("{target}: {e}\n{src}"))
}

fn lower_err(src: &str, target: Target) -> CodegenError {
    match generate(&program(src), &CodegenOptions::new(target)) {
        Ok(text) => panic!("{target}: expected an error, got:\n{text}"),
        Err(e) => e,
    }
}

const GENERATORS: [Target; 3] = [Target::TypeScript, Target::Python, Target::Zig];

#[test]
fn append_lowers_to_the_native_mutating_call() {
    let src = "fixum lista<numerus> items = [1]\nitems.adde(7)";
    assert!(lower(src, Target::TypeScript).contains("items.push(7);"));
    assert!(lower(src, Target::Python).contains("items.append(7)"));
    assert!(lower(src, Target::Zig).contains("try items.append(7);"));
}

#[test]
fn exclusive_ranges_keep_their_end() {
    let src = "ex 0..10 pro i { scribe i }";
    assert!(lower(src, Target::TypeScript).contains("for (let i = 0; i < 10; i++) {"));
    assert!(lower(src, Target::Python).contains("for i in range(0, 10):"));
    assert!(lower(src, Target::Zig).contains("while (i < 10) : (i += 1) {"));
}

#[test]
fn inclusive_ranges_add_one_to_the_end() {
    let src = "ex 0 usque 10 pro i { scribe i }";
    assert!(lower(src, Target::TypeScript).contains("i < 11"));
    assert!(lower(src, Target::Python).contains("range(0, 11)"));
    assert!(lower(src, Target::Zig).contains("i < 11"));
}

#[test]
fn range_steps_are_threaded_through() {
    let src = "ex 0..10 per 2 pro i { scribe i }";
    assert!(lower(src, Target::TypeScript).contains("for (let i = 0; i < 10; i += 2) {"));
    assert!(lower(src, Target::Python).contains("for i in range(0, 10, 2):"));
    assert!(lower(src, Target::Zig).contains("while (i < 10) : (i += 2) {"));
}

#[test]
fn positional_bindings_follow_declared_field_order() {
    let src = "discretio Eventus { Click { numerus x, numerus y }, Clavis { textus k } }\n\
               functio tracta(Eventus e) {\n    discerne e {\n        si Click pro a, b { scribe a + b }\n        si Clavis pro c { scribe c }\n    }\n}";
    let ts = lower(src, Target::TypeScript);
    assert!(ts.contains("const a = e.x;\n"), "{ts}");
    assert!(ts.contains("const b = e.y;\n"), "{ts}");
    let py = lower(src, Target::Python);
    assert!(py.contains("case Click(x=a, y=b):"), "{py}");
    let zig = lower(src, Target::Zig);
    assert!(zig.contains("const a = _tmp0.x;"), "{zig}");
    assert!(zig.contains("const b = _tmp0.y;"), "{zig}");
}

#[test]
fn single_item_stream_yields_once_then_finishes() {
    let src = "functio unum() fiunt numerus {\n    cede 1\n}";
    let ts = lower(src, Target::TypeScript);
    assert_eq!(ts.matches("yield { op: \"item\", data: 1 };").count(), 1, "{ts}");
    let item = ts.find("op: \"item\"").unwrap();
    let done = ts.rfind("yield { op: \"done\" };").unwrap();
    assert!(item < done, "{ts}");

    let py = lower(src, Target::Python);
    assert_eq!(py.matches("yield {\"op\": \"item\", \"data\": 1}").count(), 1, "{py}");
    assert!(py.contains("yield {\"op\": \"done\"}"), "{py}");
    assert!(py.contains("return _fiunt(__corpus())"), "{py}");
}

#[test]
fn each_verb_pulls_in_only_its_own_helper() {
    let fiunt = lower("functio f() fiunt numerus { cede 1 }", Target::TypeScript);
    assert!(fiunt.contains("__fiunt") && !fiunt.contains("__fient"));
    let fient = lower("functio f() fient numerus { cede 1 }", Target::TypeScript);
    assert!(fient.contains("__fient") && !fient.contains("__fiunt"));
    let fiet = lower("functio f() fiet numerus { redde 1 }", Target::TypeScript);
    assert!(!fiet.contains("__fiunt") && !fiet.contains("__fient"));
    assert!(fiet.starts_with("async function f(): Promise<number>"));
}

#[test]
fn verbless_functions_never_get_wrapped() {
    let src = "cursor functio gradus() -> numerus {\n    cede 1\n}";
    let ts = lower(src, Target::TypeScript);
    assert!(!ts.contains("__fiunt"), "{ts}");
    let py = lower(src, Target::Python);
    assert!(!py.contains("_fiunt"), "{py}");
    assert!(py.contains("yield 1"), "{py}");
}

#[test]
fn plain_programs_have_no_preamble() {
    let src = "fixum x = 1 + 2\nscribe x";
    assert_eq!(lower(src, Target::TypeScript), "const x = 1 + 2;\nconsole.log(x);\n");
    assert_eq!(lower(src, Target::Python), "x = 1 + 2\nprint(x)\n");
    let zig = lower(src, Target::Zig);
    assert!(zig.starts_with("const std = @import(\"std\");\n\n"), "{zig}");
    assert!(!zig.contains("allocator"), "{zig}");

    let empty = lower("fixum lista<numerus> xs = []\nscribe xs.longitudo()", Target::Zig);
    assert!(empty.contains("std.ArrayList(i64).init(allocator)"), "{empty}");
    assert!(!empty.contains("faberLista"), "{empty}");
    let filled = lower("fixum lista<numerus> xs = [1]\nscribe xs.longitudo()", Target::Zig);
    assert_eq!(filled.matches("faberLista").count(), 2, "{filled}");
}

#[test]
fn empty_program_lowers_to_nothing() {
    for target in [Target::TypeScript, Target::Python, Target::Faber] {
        assert_eq!(lower("", target), "", "{target}");
    }
}

#[test]
fn control_words_outside_their_context_are_misplaced() {
    for target in GENERATORS {
        assert!(
            matches!(lower_err("redde 1", target), CodegenError::Misplaced { kind: "redde", .. }),
            "{target}"
        );
        assert!(
            matches!(lower_err("rumpe", target), CodegenError::Misplaced { kind: "rumpe", .. }),
            "{target}"
        );
    }
}

#[test]
fn unsupported_errors_point_at_the_construct() {
    let src = "fixum a = 1\nfixum f = pro x: x * 2";
    let err = lower_err(src, Target::Zig);
    let span = err.span();
    assert!(span.start >= 12, "{span:?}");
    assert!((span.end as usize) <= src.len(), "{span:?}");
    assert!(err.to_string().contains("Zig"), "{err}");
}

#[test]
fn python_rejects_object_spread_with_a_hint() {
    let err = lower_err("fixum a = { x: 1 }\nfixum b = { ...a, y: 2 }", Target::Python);
    assert!(matches!(err, CodegenError::Unsupported { target: Target::Python, .. }));
    assert_eq!(err.suggestion(), Some("merge maps with `conflata`"));
}

#[test]
fn faber_target_round_trips() {
    let src = "functio f(numerus n) fit numerus {\n    redde n + 1\n}\n\nscribe f(1)\n";
    assert_eq!(lower(src, Target::Faber), src);
}

#[test]
fn indentation_option_applies_to_every_target() {
    let src = "si verum {\n    scribe 1\n}";
    for target in Target::ALL {
        let out = generate(&program(src), &CodegenOptions::new(target).with_indent("\t"))
            .unwrap_or_else(|e| panic!("{target}: {e}"));
        assert!(out.contains("\n\t"), "{target}:\n{out}");
        assert!(!out.contains("\n    "), "{target}:\n{out}");
    }
}
