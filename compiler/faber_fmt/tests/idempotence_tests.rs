//! Formatting is idempotent and meaning-preserving on hand-written sources,
//! including ones with comments in places the printer has to move.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use faber_fmt::{format_source, FormatOptions};
use faber_ir::strip_spans;
use pretty_assertions::assert_eq;

const SOURCES: &[(&str, &str)] = &[
    (
        "messy spacing",
        "fixum   a=1\nvaria b   = a+2*  3\n\n\n\nsi a>b{scribe a}secus{scribe b}\n",
    ),
    (
        "comment inside an array",
        "fixum a = [\n    1, # unus\n    2\n]\nscribe a\n",
    ),
    (
        "comment after the last statement",
        "scribe 1\n\n# finis\n",
    ),
    (
        "comments in members",
        "genus P {\n    # nomen\n    textus nomen # textus\n\n    functio dic() {\n        scribe nomen\n        # nihil plus\n    }\n}\n",
    ),
    (
        "nested lambdas",
        "fixum f = pro a: pro b: a + b\nfixum g = futura pro { redde cede h() }\n",
    ),
    (
        "long call",
        "scribe computa(primum_argumentum, secundum_argumentum, tertium_argumentum, quartum_argumentum)\n",
    ),
    (
        "ranges and loops",
        "ex 0..10 per 2 pro i {\n    scribe i\n}\nex 1 usque 3 pro j {\n    scribe j\n}\nde obj pro k {\n    scribe k\n}\n",
    ),
    (
        "assertions and logs",
        "adfirma a > 0, \"positivum\"\nvide a\nmone\n",
    ),
    (
        "templates and strings",
        "fixum s = `salve ${nomen} # non commentarium`\nfixum t = \"linea\\nsecunda\" # vere\n",
    ),
    (
        "mixed declarations",
        "typus Id = numerus\nordo Dies { lunae, martis, mercurii, iovis, veneris, saturni, solis }\npactum Clavis {\n    functio clavis() fit Id\n}\n",
    ),
];

fn format(src: &str) -> String {
    format_source(src, &FormatOptions::default())
        .unwrap_or_else(|e| panic!("format failed: {e}\n{src}"))
}

#[test]
fn formatting_twice_changes_nothing() {
    for (name, src) in SOURCES {
        let once = format(src);
        let twice = format(&once);
        assert_eq!(once, twice, "{name}");
    }
}

#[test]
fn formatting_keeps_the_tree() {
    for (name, src) in SOURCES {
        let before = faber_parse::parse(src).unwrap_or_else(|e| panic!("{name}: {e}"));
        let after = faber_parse::parse(&format(src)).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(strip_spans(before), strip_spans(after), "{name}");
    }
}

#[test]
fn comments_are_never_dropped() {
    for (name, src) in SOURCES {
        let before = faber_lexer::scan_comments(src).len();
        let after = faber_lexer::scan_comments(&format(src)).len();
        assert_eq!(before, after, "{name}");
    }
}

#[test]
fn long_ordo_breaks_one_member_per_line() {
    let out = format("ordo Dies { lunae, martis, mercurii, iovis, veneris, saturni, solis }\n");
    assert_eq!(
        out,
        "ordo Dies {\n    lunae,\n    martis,\n    mercurii,\n    iovis,\n    veneris,\n    saturni,\n    solis,\n}\n"
    );
}
