use pretty_assertions::assert_eq;

use crate::{format_source, print_program, FormatOptions};

fn fmt_with(src: &str, options: &FormatOptions) -> String {
    match format_source(src, options) {
        Ok(out) => out,
        Err(e) => panic!("format failed: {e}\n{src}"),
    }
}

fn fmt(src: &str) -> String {
    fmt_with(src, &FormatOptions::default())
}

/// `src` is already canonical.
fn assert_stable(src: &str) {
    assert_eq!(fmt(src), src);
}

// Spacing and layout

#[test]
fn normalizes_spacing() {
    assert_eq!(fmt("fixum   x=1+2*3"), "fixum x = 1 + 2 * 3\n");
    assert_eq!(fmt("scribe a,b;scribe c"), "scribe a, b\nscribe c\n");
}

#[test]
fn empty_program_prints_nothing() {
    assert_eq!(fmt(""), "");
    assert_eq!(fmt("\n\n"), "");
}

#[test]
fn blocks_go_one_statement_per_line() {
    assert_eq!(
        fmt("si x { scribe 1 } sin y { scribe 2 } secus { scribe 3 }"),
        "si x {\n    scribe 1\n} sin y {\n    scribe 2\n} secus {\n    scribe 3\n}\n"
    );
    assert_eq!(fmt("dum verum {}"), "dum verum {}\n");
}

#[test]
fn long_lists_always_break() {
    assert_eq!(
        fmt("fixum a = [1, 2, 3, 4, 5, 6]"),
        "fixum a = [\n    1,\n    2,\n    3,\n    4,\n    5,\n    6\n]\n"
    );
    assert_stable("fixum b = [1, 2, 3, 4, 5]\n");
}

#[test]
fn lists_break_past_the_width() {
    let options = FormatOptions::default().with_width(20);
    assert_eq!(
        fmt_with("scribe f(alpha, beta, gamma)", &options),
        "scribe f(\n    alpha,\n    beta,\n    gamma\n)\n"
    );
}

#[test]
fn indent_unit_is_configurable() {
    let options = FormatOptions::default().with_indent("\t");
    assert_eq!(
        fmt_with("si a { scribe a }", &options),
        "si a {\n\tscribe a\n}\n"
    );
}

#[test]
fn lambda_block_argument_breaks_the_call() {
    assert_eq!(
        fmt("f(pro x { scribe x })"),
        "f(\n    pro x {\n        scribe x\n    }\n)\n"
    );
    assert_stable("fixum g = pro a, b: a + b\n");
}

// Parentheses

#[test]
fn parentheses_follow_precedence() {
    assert_eq!(fmt("fixum a = (1 + 2) * 3"), "fixum a = (1 + 2) * 3\n");
    assert_eq!(fmt("fixum b = (1 * 2) + 3"), "fixum b = 1 * 2 + 3\n");
    assert_eq!(fmt("fixum c = a - (b - c)"), "fixum c = a - (b - c)\n");
    assert_eq!(fmt("fixum d = (a - b) - c"), "fixum d = a - b - c\n");
    assert_eq!(fmt("fixum e = (a vel b) et c"), "fixum e = (a vel b) et c\n");
    assert_eq!(fmt("fixum f = ((x))"), "fixum f = x\n");
}

#[test]
fn unary_operands() {
    assert_stable("fixum a = -(-b)\n");
    assert_stable("fixum c = non (a et b)\n");
    assert_stable("fixum d = -(x qua numerus)\n");
    assert_eq!(fmt("fixum e = (-x).y"), "fixum e = (-x).y\n");
}

#[test]
fn casts_tests_and_ranges() {
    assert_stable("fixum a = (a + b) qua numerus\n");
    assert_stable("fixum b = x est textus et y non est numerus\n");
    assert_stable("fixum c = (0..10).longitudo\n");
    assert_stable("fixum d = 0 usque 10 per 2\n");
    assert_stable("fixum e = (a sic b secus c) + 1\n");
    assert_stable("x = a sic b secus c\n");
}

#[test]
fn postfix_access_markers() {
    assert_stable("scribe a?.b!.c?[0]![1]\n");
    assert_stable("f?(1)\n");
    assert_stable("fixum p = novum Punctum()\n");
    assert_eq!(fmt("fixum q = novum Punctum"), "fixum q = novum Punctum()\n");
}

#[test]
fn object_keys() {
    assert_stable("fixum o = { a: 1, \"b-c\": 2, ...p }\n");
    assert_stable("fixum n = novum Punctum { x: 1, y: 2 }\n");
    assert_stable("fixum v = finge Circulus { r: 2.5 }\n");
}

#[test]
fn ambiguous_statement_starts_are_wrapped() {
    assert_eq!(fmt("({ a: 1 })"), "({ a: 1 })\n");
    assert_eq!(fmt("(futura pro: 1)"), "(futura pro: 1)\n");
    assert_eq!(fmt("scribe a\n(-b)"), "scribe a\n(-b)\n");
}

// Declarations

#[test]
fn functions() {
    assert_stable("functio f(numerus a, b = 2) fit numerus {\n    redde a + b\n}\n");
    assert_stable("futura cursor functio g(...lista<textus> r) fiunt textus {}\n");
    assert_stable("functio h((numerus) -> numerus cb) -> textus? {\n    redde nihil\n}\n");
}

#[test]
fn pactum_methods_may_omit_bodies() {
    assert_stable(
        "pactum Sonans {\n    functio sonus() fit textus\n    futura functio lege(textus via) fiet textus\n}\n",
    );
}

#[test]
fn ordo_stays_inline_without_comments() {
    assert_eq!(
        fmt("ordo Color {\n    rubrum,\n    viride = 2\n}"),
        "ordo Color { rubrum, viride = 2 }\n"
    );
}

#[test]
fn ordo_with_comments_breaks() {
    assert_stable("ordo Color {\n    rubrum, # ruber\n    viride,\n}\n");
}

#[test]
fn discretio_variants() {
    assert_stable(
        "discretio Forma {\n    Circulus { numerus r }\n    Rectangulum { numerus w, numerus h }\n    Punctum\n}\n",
    );
}

#[test]
fn imports_and_aliases() {
    assert_eq!(
        fmt("ex \"util\" importa summa,medium ut med"),
        "ex \"util\" importa summa, medium ut med\n"
    );
    assert_stable("typus Numeri = lista<numerus>\n");
}

// Comments and blank lines

#[test]
fn comments_survive() {
    assert_stable("# caput\nfixum a = 1 # unum\nscribe a\n");
    assert_stable("si verum {\n    scribe 1\n\n    # finis\n}\n");
    assert_stable("# solus\n");
}

#[test]
fn blank_line_after_leading_comment_survives() {
    assert_stable("# caput\n\nfixum a = 1\n");
}

#[test]
fn runs_of_blank_lines_collapse() {
    assert_eq!(fmt("scribe 1\n\n\n\nscribe 2\n"), "scribe 1\n\nscribe 2\n");
}

#[test]
fn whole_program_is_stable() {
    assert_stable(
        r#"ex "util" importa summa, medium ut med

# Forma geometrica
discretio Forma {
    Circulus { numerus r }
    Rectangulum { numerus w, numerus h }
    Punctum
}

functio area(Forma f) fit numerus {
    discerne f {
        si Circulus ut c {
            redde 3.14 * c.r * c.r
        }
        si Rectangulum pro w, h {
            redde w * h
        }
        ceterum {
            redde 0
        }
    }
}

genus Animal implet Sonans {
    textus nomen
    numerus aetas = 0

    functio sonus() fit textus {
        redde "..."
    }
}

varia i = 0
dum i < 10 {
    i += 1 # incrementum
    si i % 2 == 0 {
        perge
    }
}
elige i {
    casu 1, 2 {
        scribe "parvum"
    }
    ceterum {
        mone "magnum"
    }
}
tempta {
    iace "error"
} cape e {
    vide e
} demum {
    scribe "finis"
}
"#,
    );
}

// Printing trees

#[test]
fn trees_print_with_blank_lines_around_declarations() {
    let program = match faber_parse::parse("fixum a = 1\nfunctio f() {}\nscribe a\nscribe 2") {
        Ok(program) => program,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(
        print_program(&program, &FormatOptions::default()),
        "fixum a = 1\n\nfunctio f() {}\n\nscribe a\nscribe 2\n"
    );
}

#[test]
fn tree_printing_ignores_source_blank_lines() {
    let program = match faber_parse::parse("scribe 1\n\n\nscribe 2\n") {
        Ok(program) => program,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(
        print_program(&program, &FormatOptions::default()),
        "scribe 1\nscribe 2\n"
    );
}
