use pretty_assertions::assert_eq;

use crate::{generate, CodegenError, CodegenOptions, Target};

fn program(src: &str) -> faber_ir::Program {
    match faber_parse::parse(src) {
        Ok(program) => faber_types::annotate(program),
        Err(e) => panic!("parse failed for {src:?}: {e}"),
    }
}

fn lower(src: &str) -> String {
    match generate(&program(src), &CodegenOptions::new(Target::Python)) {
        Ok(text) => text,
        Err(e) => panic!("lowering failed for {src:?}: {e}"),
    }
}

fn lower_err(src: &str) -> CodegenError {
    match generate(&program(src), &CodegenOptions::new(Target::Python)) {
        Ok(text) => panic!("expected an error, got:\n{text}"),
        Err(e) => e,
    }
}

#[test]
fn plain_function() {
    assert_eq!(
        lower("functio iunge(numerus a, numerus b) -> numerus {\n    redde a + b\n}"),
        "def iunge(a: int, b: int) -> int:\n    return a + b\n"
    );
}

#[test]
fn indent_unit_is_configurable() {
    let options = CodegenOptions::new(Target::Python).with_indent("  ");
    let out = generate(&program("si verum { scribe 1 }"), &options);
    assert_eq!(out.as_deref(), Ok("if True:\n  print(1)\n"));
}

#[test]
fn fiunt_wraps_an_item_generator() {
    let out = lower("functio numera(numerus n) fiunt numerus {\n    ex 0..n pro i {\n        cede i\n    }\n}");
    assert!(out.starts_with("def _fiunt(gen):\n"), "got:\n{out}");
    assert!(out.ends_with(
        "def numera(n: int):\n    \
         def __corpus():\n        \
         for i in range(0, n):\n            \
         yield {\"op\": \"item\", \"data\": i}\n        \
         yield {\"op\": \"done\"}\n    \
         return _fiunt(__corpus())\n"
    ));
    assert!(!out.contains("_fient"));
}

#[test]
fn fiunt_return_and_throw_become_records() {
    let out = lower(
        "functio primi() fiunt numerus {\n    si falsum { iace \"vacua\" }\n    redde 1\n}",
    );
    assert!(out.contains(
        "            yield {\"op\": \"error\", \"message\": \"vacua\"}\n            return\n"
    ));
    assert!(out.contains("        yield {\"op\": \"item\", \"data\": 1}\n        return\n"));
}

#[test]
fn fiet_is_an_async_function() {
    assert_eq!(
        lower("functio lege(textus via) fiet textus {\n    fixum t = cede via\n    redde t\n}"),
        "async def lege(via: str) -> str:\n    t = await via\n    return t\n"
    );
}

#[test]
fn fient_uses_the_async_helper() {
    let out = lower("functio fluxus() fient numerus {\n    cede 1\n}");
    assert!(out.contains("    async def __corpus():\n"));
    assert!(out.contains("    return _fient(__corpus())\n"));
    assert!(out.starts_with("async def _fient(gen):\n"));
}

#[test]
fn discerne_becomes_match() {
    let src = "discretio Forma { Circulus { fractus r }, Quadratum { fractus latus } }\n\
               functio area(Forma f) -> fractus {\n    discerne f {\n        si Circulus pro radius { redde radius * radius }\n        si Quadratum ut q { redde q.latus * q.latus }\n    }\n    redde 0.0\n}";
    let out = lower(src);
    assert!(out.starts_with(
        "from dataclasses import dataclass\n\n\
         @dataclass\nclass Circulus:\n    r: float\n\n\
         @dataclass\nclass Quadratum:\n    latus: float\n\n\
         Forma = Circulus | Quadratum\n"
    ));
    assert!(out.ends_with(
        "def area(f: Forma) -> float:\n    \
         match f:\n        \
         case Circulus(r=radius):\n            \
         return radius * radius\n        \
         case Quadratum() as q:\n            \
         return q.latus * q.latus\n    \
         return 0.0\n"
    ));
}

#[test]
fn discerne_without_union_type_binds_by_name() {
    assert_eq!(
        lower("discerne eventus() {\n    si Click pro x, y { scribe x }\n    ceterum { scribe 0 }\n}"),
        "match eventus():\n    case Click(x=x, y=y):\n        print(x)\n    case _:\n        print(0)\n"
    );
}

#[test]
fn ranges_lower_to_range_calls() {
    assert_eq!(
        lower("ex 0 usque 10 pro i { scribe i }"),
        "for i in range(0, 11):\n    print(i)\n"
    );
    assert_eq!(
        lower("ex 10..0 per -2 pro i { scribe i }"),
        "for i in range(10, 0, -2):\n    print(i)\n"
    );
    assert_eq!(
        lower("fixum n = 3\nex 1 usque n * 2 pro i { scribe i }"),
        "n = 3\nfor i in range(1, (n * 2) + 1):\n    print(i)\n"
    );
}

#[test]
fn slices_and_negative_indices_are_native() {
    assert_eq!(
        lower("fixum lista<numerus> xs = [1, 2, 3]\nscribe xs[-1], xs[1..3], xs[1 usque -1]"),
        "xs: list[int] = [1, 2, 3]\nprint(xs[-1], xs[1:3], xs[1:])\n"
    );
}

#[test]
fn collection_methods_follow_the_receiver() {
    let out = lower(
        "fixum lista<numerus> xs = []\nxs.adde(1)\nscribe xs.primus()\n\
         fixum tabula<textus, numerus> m = {}\nm.pone(\"a\", 1)\nm[\"b\"] = 2\nscribe m[\"a\"]",
    );
    assert_eq!(
        out,
        "xs: list[int] = []\nxs.append(1)\nprint(xs[0])\n\
         m: dict[str, int] = {}\nm[\"a\"] = 1\nm[\"b\"] = 2\nprint(m[\"a\"])\n"
    );
}

#[test]
fn statement_only_rewrites_reject_value_position() {
    let err = lower_err("fixum tabula<textus, numerus> m = {}\nscribe m.pone(\"a\", 1)");
    assert!(
        matches!(err, CodegenError::Unsupported { target: Target::Python, .. }),
        "{err}"
    );
    assert_eq!(err.suggestion(), Some("call it as its own statement"));

    let err = lower_err("fixum lista<numerus> xs = [1]\nfixum ys = xs.filtra(pro x: x > 0)");
    assert!(err.to_string().contains("filtra"), "{err}");

    let out = lower("fixum lista<numerus> xs = [1]\nxs.filtra(pro x: x > 0)");
    assert!(out.contains("xs[:] = [x for x in xs if (lambda x: x > 0)(x)]\n"), "{out}");
}

#[test]
fn imports_are_emitted_only_when_used() {
    assert_eq!(
        lower("fixum lista<numerus> xs = [3, 1]\nscribe xs.miscita()"),
        "import random\n\nxs: list[int] = [3, 1]\nprint(random.sample(xs, len(xs)))\n"
    );
    assert!(!lower("scribe 1").contains("import"));
}

#[test]
fn optional_chains_are_always_guarded() {
    assert_eq!(
        lower("varia lista<numerus>? xs = nihil\nscribe xs?.primus()\nscribe p?.nomen"),
        "xs: list[int] | None = None\n\
         print((None if xs is None else xs[0]))\n\
         print((None if p is None else p.nomen))\n"
    );
}

#[test]
fn coalesce_evaluates_its_left_side_once() {
    assert_eq!(
        lower("fixum v = a vel 0\nfixum w = f() vel 1"),
        "v = (a if a is not None else 0)\nw = (_tmp0 if (_tmp0 := f()) is not None else 1)\n"
    );
}

#[test]
fn praefixum_folds_or_defers() {
    assert_eq!(lower("fixum n = praefixum(2 * 3 + 1)"), "n = 7\n");
    let out = lower("fixum n = praefixum(-7 % 2)");
    assert!(!out.contains("n = -1"), "{out}");
    assert!(out.ends_with("n = _praefixum(lambda: -7 % 2)\n"), "{out}");
    let out = lower("fixum n = praefixum(f())");
    assert!(out.starts_with("def _praefixum(compute):"));
    assert!(out.ends_with("n = _praefixum(lambda: f())\n"));
}

#[test]
fn genus_lowers_to_a_dataclass() {
    let src = "genus Persona {\n    textus nomen\n    numerus aetas = 0\n    functio saluta() -> textus { redde ego.nomen }\n}\n\
               fixum p = novum Persona { nomen: \"Marcus\" }";
    assert_eq!(
        lower(src),
        "from dataclasses import dataclass\n\n\
         @dataclass\nclass Persona:\n    nomen: str = \"\"\n    aetas: int = 0\n\n    \
         def saluta(self) -> str:\n        return self.nomen\n\n\
         p = Persona(nomen=\"Marcus\")\n"
    );
}

#[test]
fn finge_and_type_tests() {
    let out = lower(
        "discretio Forma { Circulus { fractus r }, Punctum }\nfixum c = finge Circulus { r: 1.5 }\nscribe c est Circulus, c non est Punctum, 1 est numerus",
    );
    assert!(out.contains("@dataclass\nclass Punctum:\n    pass\n"));
    assert!(out.contains("c = Circulus(r=1.5)\n"));
    assert!(out.contains(
        "print(isinstance(c, Circulus), not isinstance(c, Punctum), isinstance(1, int))\n"
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
        "import sys\n\n\
         match x:\n    case 1 | 2:\n        print(\"parvus\")\n    case _:\n        print(\"magnus\", file=sys.stderr)\n\
         try:\n    raise Exception(\"x\")\nexcept Exception as e:\n    print(e, file=sys.stderr)\n\
         assert x > 0, \"positivus\"\n"
    );
}

#[test]
fn elige_on_computed_values_uses_equality() {
    assert_eq!(
        lower("elige f() {\n    casu a { scribe 1 }\n}"),
        "_tmp0 = f()\nif _tmp0 == a:\n    print(1)\n"
    );
}

#[test]
fn block_lambdas_are_hoisted() {
    assert_eq!(
        lower("fixum lista<numerus> xs = [1, 2]\nfixum ys = xs.mappata(pro x { redde x * 2 })"),
        "xs: list[int] = [1, 2]\ndef _lambda0(x):\n    return x * 2\nys = [(_lambda0)(x) for x in xs]\n"
    );
    assert_eq!(
        lower("fixum lista<numerus> xs = [1, 2]\nscribe xs.filtrata(pro x: x > 1)"),
        "xs: list[int] = [1, 2]\nprint([x for x in xs if (lambda x: x > 1)(x)])\n"
    );
}

#[test]
fn templates_become_f_strings() {
    assert_eq!(
        lower("fixum nomen = \"Marcus\"\nscribe `Salve ${nomen}`"),
        "nomen = \"Marcus\"\nprint(f\"Salve {nomen}\")\n"
    );
}

#[test]
fn imports_enums_and_protocols() {
    let out = lower(
        "ex \"norma/textus\" importa a, b ut c\nordo Color { rubrum, viride = 2, caeruleum }\npactum Nominatus { functio nomen() -> textus }",
    );
    assert_eq!(
        out,
        "from enum import Enum\nfrom typing import Protocol, runtime_checkable\n\n\
         from norma.textus import a, b as c\n\n\
         class Color(Enum):\n    rubrum = 0\n    viride = 2\n    caeruleum = 3\n\n\
         @runtime_checkable\nclass Nominatus(Protocol):\n    def nomen(self) -> str: ...\n"
    );
}

#[test]
fn unsupported_constructs_name_python() {
    assert!(matches!(
        lower_err("ordo Gradus { primus = \"a\", secundus }"),
        CodegenError::Unsupported {
            target: Target::Python,
            ..
        }
    ));
    let err = lower_err("fixum a = { x: 1 }\nfixum b = { ...a, y: 2 }");
    assert_eq!(err.suggestion(), Some("merge maps with `conflata`"));
}

#[test]
fn misplaced_nodes_fail() {
    assert!(matches!(
        lower_err("perge"),
        CodegenError::Misplaced { kind: "perge", .. }
    ));
    assert!(matches!(
        lower_err("redde 1"),
        CodegenError::Misplaced { kind: "redde", .. }
    ));
    assert!(matches!(
        lower_err("cede 1"),
        CodegenError::Misplaced { kind: "cede", .. }
    ));
    assert!(matches!(
        lower_err("functio f() fit numerus { cede 1 }"),
        CodegenError::Misplaced { kind: "cede", .. }
    ));
}
