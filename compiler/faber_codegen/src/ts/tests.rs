use pretty_assertions::assert_eq;

use crate::{generate, CodegenError, CodegenOptions, Target};

fn program(src: &str) -> faber_ir::Program {
    match faber_parse::parse(src) {
        Ok(program) => faber_types::annotate(program),
        Err(e) => panic!("parse failed for {src:?}: {e}"),
    }
}

fn lower(src: &str) -> String {
    match generate(&program(src), &CodegenOptions::new(Target::TypeScript)) {
        Ok(text) => text,
        Err(e) => panic!("lowering failed for {src:?}: {e}"),
    }
}

fn lower_err(src: &str) -> CodegenError {
    match generate(&program(src), &CodegenOptions::new(Target::TypeScript)) {
        Ok(text) => panic!("expected an error, got:\n{text}"),
        Err(e) => e,
    }
}

#[test]
fn plain_function() {
    assert_eq!(
        lower("functio iunge(numerus a, numerus b) -> numerus {\n    redde a + b\n}"),
        "function iunge(a: number, b: number): number {\n    return a + b;\n}\n"
    );
}

#[test]
fn semicolons_can_be_disabled() {
    let options = CodegenOptions::new(Target::TypeScript).with_semicolons(false);
    let out = generate(&program("fixum x = 1\nscribe x"), &options);
    assert_eq!(out.as_deref(), Ok("const x = 1\nconsole.log(x)\n"));
}

#[test]
fn fiunt_wraps_an_item_generator() {
    let out = lower("functio numera(numerus n) fiunt numerus {\n    ex 0..n pro i {\n        cede i\n    }\n}");
    let expected_body = "function numera(n: number): Generator<number> {\n    \
         return __fiunt((function* () {\n        \
         for (let i = 0; i < n; i++) {\n            \
         yield { op: \"item\", data: i };\n        \
         }\n        \
         yield { op: \"done\" };\n    \
         }).call(this));\n\
         }\n";
    assert!(out.ends_with(expected_body), "got:\n{out}");
    assert!(out.starts_with("type Responsum<T> ="));
    assert!(out.contains("function* __fiunt<T>"));
    assert!(!out.contains("__fient"));
}

#[test]
fn fiunt_return_and_throw_become_records() {
    let out = lower(
        "functio primi() fiunt numerus {\n    si falsum { iace \"vacua\" }\n    redde 1\n}",
    );
    assert!(out.contains("yield { op: \"error\", message: \"vacua\" };\n            return;"));
    assert!(out.contains("yield { op: \"item\", data: 1 };\n        return;"));
}

#[test]
fn fiet_is_an_async_function() {
    let out = lower("functio lege(textus via) fiet textus {\n    fixum t = cede via\n    redde t\n}");
    assert_eq!(
        out,
        "async function lege(via: string): Promise<string> {\n    const t = await via;\n    return t;\n}\n"
    );
}

#[test]
fn fient_uses_the_async_helper() {
    let out = lower("functio fluxus() fient numerus {\n    cede 1\n}");
    assert!(out.contains("return __fient((async function* () {"));
    assert!(out.contains("async function* __fient<T>"));
    assert!(!out.contains("function* __fiunt"));
}

#[test]
fn verbless_generator_stays_native() {
    let out = lower("cursor functio gradus() -> numerus {\n    cede 1\n}");
    assert_eq!(
        out,
        "function* gradus(): Generator<number> {\n    yield 1;\n}\n"
    );
}

#[test]
fn discerne_maps_positions_to_fields() {
    let src = "discretio Forma { Circulus { fractus r }, Quadratum { fractus latus } }\n\
               functio area(Forma f) -> fractus {\n    discerne f {\n        si Circulus pro radius { redde radius * radius }\n        si Quadratum ut q { redde q.latus * q.latus }\n    }\n    redde 0.0\n}";
    let out = lower(src);
    assert!(out.starts_with(
        "type Forma =\n    | { tag: \"Circulus\"; r: number }\n    | { tag: \"Quadratum\"; latus: number };\n"
    ));
    assert!(out.contains(
        "    if (f.tag === \"Circulus\") {\n        const radius = f.r;\n        return radius * radius;\n    } else if (f.tag === \"Quadratum\") {\n        const q = f;\n"
    ));
}

#[test]
fn discerne_without_union_type_binds_by_name() {
    let out = lower("discerne eventus() {\n    si Click pro x, y { scribe x }\n    ceterum { scribe 0 }\n}");
    assert!(out.starts_with("const _tmp0 = eventus();\nif (_tmp0.tag === \"Click\") {\n"));
    assert!(out.contains("    const { x, y } = _tmp0;\n"));
    assert!(out.contains("} else {\n    console.log(0);\n}\n"));
}

#[test]
fn inclusive_range_folds_literal_end() {
    assert_eq!(
        lower("ex 0 usque 10 pro i { scribe i }"),
        "for (let i = 0; i < 11; i++) {\n    console.log(i);\n}\n"
    );
    assert_eq!(
        lower("ex 10..0 per -2 pro i { scribe i }"),
        "for (let i = 10; i > 0; i -= 2) {\n    console.log(i);\n}\n"
    );
}

#[test]
fn runtime_inclusive_end_adds_one() {
    let out = lower("fixum n = 3\nex 1 usque n * 2 pro i { scribe i }");
    assert!(out.contains("for (let i = 1; i < (n * 2) + 1; i++) {"));
}

#[test]
fn slices_and_negative_indices() {
    let out = lower("fixum lista<numerus> xs = [1, 2, 3]\nscribe xs[-1], xs[1..3], xs[1 usque -1]");
    assert_eq!(
        out,
        "const xs: number[] = [1, 2, 3];\nconsole.log(xs.at(-1), xs.slice(1, 3), xs.slice(1));\n"
    );
}

#[test]
fn negative_index_targets_stay_assignable() {
    let out = lower("fixum lista<numerus> xs = [1, 2, 3]\nxs[-1] = 5\nxs[-2] += 1");
    assert!(out.contains("xs[xs.length - 1] = 5;\n"), "{out}");
    assert!(out.contains("xs[xs.length - 2] += 1;\n"), "{out}");
    assert!(!out.contains(".at("), "{out}");
}

#[test]
fn collection_methods_follow_the_receiver() {
    let out = lower(
        "fixum lista<numerus> xs = []\nxs.adde(1)\nscribe xs.primus()\n\
         fixum tabula<textus, numerus> m = {}\nm.pone(\"a\", 1)\nm[\"b\"] = 2\nscribe m[\"a\"]",
    );
    assert_eq!(
        out,
        "const xs: number[] = [];\nxs.push(1);\nconsole.log(xs[0]);\n\
         const m: Map<string, number> = new Map();\nm.set(\"a\", 1);\nm.set(\"b\", 2);\nconsole.log(m.get(\"a\"));\n"
    );
}

#[test]
fn helpers_are_emitted_only_when_used() {
    let out = lower("fixum lista<numerus> xs = [3, 1]\nscribe xs.miscita()");
    assert!(out.starts_with("function __miscita<T>"));
    assert!(out.ends_with("console.log(__miscita(xs));\n"));
    assert!(!out.contains("__fragmenta"));
    assert!(!out.contains("Responsum"));
}

#[test]
fn optional_chain_guards_translated_links_once() {
    let out = lower("varia lista<numerus>? xs = nihil\nscribe xs?.primus()\nscribe p?.nomen");
    assert_eq!(
        out,
        "let xs: number[] | null = null;\nconsole.log((xs == null ? undefined : xs[0]));\nconsole.log(p?.nomen);\n"
    );
}

#[test]
fn praefixum_folds_or_defers() {
    assert_eq!(lower("fixum n = praefixum(2 * 3 + 1)"), "const n = 7;\n");
    let out = lower("fixum n = praefixum(7 / 2)");
    assert!(out.ends_with("const n = __praefixum(() => 7 / 2);\n"), "{out}");
    let out = lower("fixum n = praefixum(f())");
    assert!(out.starts_with("function __praefixum<T>"));
    assert!(out.ends_with("const n = __praefixum(() => f());\n"));
}

#[test]
fn genus_lowers_to_a_class() {
    let src = "genus Persona {\n    textus nomen\n    numerus aetas = 0\n    functio saluta() -> textus { redde ego.nomen }\n}\n\
               fixum p = novum Persona { nomen: \"Marcus\" }";
    let out = lower(src);
    assert_eq!(
        out,
        "class Persona {\n    nomen!: string;\n    aetas: number = 0;\n\n    \
         constructor(init: Partial<Persona> = {}) {\n        Object.assign(this, init);\n    }\n\n    \
         saluta(): string {\n        return this.nomen;\n    }\n}\n\n\
         const p = new Persona({ nomen: \"Marcus\" });\n"
    );
}

#[test]
fn finge_and_type_tests() {
    let out = lower(
        "discretio Forma { Circulus { fractus r }, Punctum }\nfixum c = finge Circulus { r: 1.5 }\nscribe c est Circulus, c non est Punctum, 1 est numerus",
    );
    assert!(out.contains("const c = { tag: \"Circulus\", r: 1.5 };\n"));
    assert!(out.contains(
        "console.log(c.tag === \"Circulus\", !(c.tag === \"Punctum\"), typeof 1 === \"number\");"
    ));
}

#[test]
fn control_flow() {
    let out = lower(
        "elige x {\n    casu 1, 2 { scribe \"parvus\" }\n    ceterum { mone \"magnus\" }\n}\n\
         tempta { iace \"x\" } cape e { vide e }\nadfirma x > 0, \"positivus\"",
    );
    assert_eq!(
        out,
        "if (x === 1 || x === 2) {\n    console.log(\"parvus\");\n} else {\n    console.warn(\"magnus\");\n}\n\
         try {\n    throw new Error(\"x\");\n} catch (e) {\n    console.debug(e);\n}\n\
         if (!(x > 0)) throw new Error(\"positivus\");\n"
    );
}

#[test]
fn misplaced_nodes_fail() {
    assert!(matches!(
        lower_err("rumpe"),
        CodegenError::Misplaced { kind: "rumpe", .. }
    ));
    assert!(matches!(
        lower_err("redde 1"),
        CodegenError::Misplaced { kind: "redde", .. }
    ));
    assert!(matches!(
        lower_err("functio f() fit numerus { cede 1 }"),
        CodegenError::Misplaced { kind: "cede", .. }
    ));
}

#[test]
fn imports_enums_and_interfaces() {
    let out = lower(
        "ex \"norma/textus\" importa a, b ut c\nordo Color { rubrum, viride = 2 }\npactum Nominatus { functio nomen() -> textus }",
    );
    assert_eq!(
        out,
        "import { a, b as c } from \"norma/textus\";\n\n\
         enum Color {\n    rubrum,\n    viride = 2,\n}\n\n\
         interface Nominatus {\n    nomen(): string;\n}\n"
    );
}
