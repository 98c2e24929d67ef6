use faber_ir::{Primitive, ResolvedType};
use pretty_assertions::assert_eq;

use super::*;
use crate::features::{PyFeatures, TsFeatures};

fn lista() -> ResolvedType {
    ResolvedType::generic("lista", vec![ResolvedType::Primitive(Primitive::Numerus)])
}

fn tabula() -> ResolvedType {
    ResolvedType::generic(
        "tabula",
        vec![
            ResolvedType::Primitive(Primitive::Textus),
            ResolvedType::Primitive(Primitive::Numerus),
        ],
    )
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn assert_covers<F>(label: &str, table: &[MethodDef<F>], vocabulary: &[&str]) {
    for name in vocabulary {
        assert!(
            table.iter().any(|def| def.name == *name),
            "{label} registry is missing `{name}`"
        );
    }
    for def in table {
        assert!(
            vocabulary.contains(&def.name),
            "{label} registry has `{}` outside the vocabulary",
            def.name
        );
    }
}

#[test]
fn dynamic_targets_cover_the_whole_vocabulary() {
    assert_covers("ts lista", ts::REGISTRY.lista, LISTA_METHODS);
    assert_covers("ts tabula", ts::REGISTRY.tabula, TABULA_METHODS);
    assert_covers("ts copia", ts::REGISTRY.copia, COPIA_METHODS);
    assert_covers("ts textus", ts::REGISTRY.textus, TEXTUS_METHODS);
    assert_covers("ts intrinsics", ts::REGISTRY.intrinsics, INTRINSICS);
    assert_covers("py lista", py::REGISTRY.lista, LISTA_METHODS);
    assert_covers("py tabula", py::REGISTRY.tabula, TABULA_METHODS);
    assert_covers("py copia", py::REGISTRY.copia, COPIA_METHODS);
    assert_covers("py textus", py::REGISTRY.textus, TEXTUS_METHODS);
    assert_covers("py intrinsics", py::REGISTRY.intrinsics, INTRINSICS);
}

#[test]
fn zig_entries_stay_within_the_vocabulary() {
    for def in zig::REGISTRY.lista {
        assert!(LISTA_METHODS.contains(&def.name), "{}", def.name);
    }
    for def in zig::REGISTRY.tabula {
        assert!(TABULA_METHODS.contains(&def.name), "{}", def.name);
    }
    for def in zig::REGISTRY.copia {
        assert!(COPIA_METHODS.contains(&def.name), "{}", def.name);
    }
    for def in zig::REGISTRY.textus {
        assert!(TEXTUS_METHODS.contains(&def.name), "{}", def.name);
    }
    for def in zig::REGISTRY.intrinsics {
        assert!(INTRINSICS.contains(&def.name), "{}", def.name);
    }
}

#[test]
fn every_entry_renders_with_or_without_arguments() {
    let registries_ts = [
        ts::REGISTRY.lista,
        ts::REGISTRY.tabula,
        ts::REGISTRY.copia,
        ts::REGISTRY.textus,
    ];
    for table in registries_ts {
        for def in table {
            assert!(!def.render("items", &[]).is_empty(), "{}", def.name);
            assert!(
                def.render("items", &args(&["x", "y"])).contains("items"),
                "ts `{}` drops its receiver",
                def.name
            );
        }
    }
    let registries_py = [
        py::REGISTRY.lista,
        py::REGISTRY.tabula,
        py::REGISTRY.copia,
        py::REGISTRY.textus,
    ];
    for table in registries_py {
        for def in table {
            assert!(
                def.render("items", &args(&["x", "y"])).contains("items"),
                "py `{}` drops its receiver",
                def.name
            );
        }
    }
}

#[test]
fn append_is_a_mutating_call_in_every_target() {
    let ts_adde = ts::REGISTRY.method(Some(&lista()), "adde");
    let py_adde = py::REGISTRY.method(Some(&lista()), "adde");
    let zig_adde = zig::REGISTRY.method(Some(&lista()), "adde");
    assert!(ts_adde.is_some_and(|d| d.mutates));
    assert!(py_adde.is_some_and(|d| d.mutates));
    assert!(zig_adde.is_some_and(|d| d.mutates));
    let x = args(&["x"]);
    assert_eq!(ts_adde.map(|d| d.render("items", &x)).as_deref(), Some("items.push(x)"));
    assert_eq!(py_adde.map(|d| d.render("items", &x)).as_deref(), Some("items.append(x)"));
    assert_eq!(zig_adde.map(|d| d.render("items", &x)).as_deref(), Some("try items.append(x)"));
}

#[test]
fn first_element_in_every_target() {
    let render = |def: Option<String>| def.unwrap_or_default();
    assert_eq!(
        render(ts::REGISTRY.method(Some(&lista()), "primus").map(|d| d.render("items", &[]))),
        "items[0]"
    );
    assert_eq!(
        render(py::REGISTRY.method(Some(&lista()), "primus").map(|d| d.render("items", &[]))),
        "items[0]"
    );
    assert_eq!(
        render(zig::REGISTRY.method(Some(&lista()), "primus").map(|d| d.render("items", &[]))),
        "items.items[0]"
    );
}

#[test]
fn reduce_swaps_seed_and_callback() {
    let a = args(&["0", "(acc, x) => acc + x"]);
    let ts = ts::REGISTRY.method(Some(&lista()), "reducta").map(|d| d.render("xs", &a));
    assert_eq!(ts.as_deref(), Some("xs.reduce((acc, x) => acc + x, 0)"));

    let a = args(&["0", "lambda acc, x: acc + x"]);
    let py = py::REGISTRY.method(Some(&lista()), "reducta");
    assert_eq!(
        py.map(|d| d.render("xs", &a)).as_deref(),
        Some("reduce(lambda acc, x: acc + x, xs, 0)")
    );
    assert_eq!(py.map(|d| d.requires), Some(PyFeatures::REDUCE));
}

#[test]
fn receiver_type_selects_the_table() {
    let ts_get = ts::REGISTRY.method(Some(&tabula()), "accipe");
    assert_eq!(ts_get.map(|d| d.render("m", &args(&["k"]))).as_deref(), Some("m.get(k)"));
    let ts_at = ts::REGISTRY.method(Some(&lista()), "accipe");
    assert_eq!(ts_at.map(|d| d.render("m", &args(&["1"]))).as_deref(), Some("m.at(1)"));
    let text = ResolvedType::Primitive(Primitive::Textus);
    assert_eq!(receiver_kind(Some(&text)), Some(ReceiverKind::Textus));
    assert_eq!(
        receiver_kind(Some(&ResolvedType::named("Persona"))),
        None
    );
}

#[test]
fn untyped_receivers_fall_back_to_lista() {
    assert_eq!(receiver_kind(None), Some(ReceiverKind::Lista));
    let ignotum = ResolvedType::Primitive(Primitive::Ignotum);
    assert_eq!(receiver_kind(Some(&ignotum)), Some(ReceiverKind::Lista));
    // `pone` only exists on maps; an untyped receiver misses it.
    assert!(ts::REGISTRY.method(None, "pone").is_none());
}

#[test]
fn feature_requirements_are_declared() {
    let shuffle = ts::REGISTRY.method(Some(&lista()), "miscita");
    assert_eq!(shuffle.map(|d| d.requires), Some(TsFeatures::SHUFFLE));
    let push = ts::REGISTRY.method(Some(&lista()), "adde");
    assert_eq!(push.map(|d| d.requires), Some(TsFeatures::empty()));
}

#[test]
fn intrinsics_render_as_free_calls() {
    let floor = ts::REGISTRY.intrinsic("pavimentum");
    assert_eq!(
        floor.map(|d| d.render_intrinsic(&args(&["x"]))).as_deref(),
        Some("Math.floor(x)")
    );
    let len = py::REGISTRY.intrinsic("longitudo");
    assert_eq!(
        len.map(|d| d.render_intrinsic(&args(&["s"]))).as_deref(),
        Some("len(s)")
    );
    let ts_len = ts::REGISTRY.intrinsic("longitudo");
    assert_eq!(
        ts_len.map(|d| d.render_intrinsic(&args(&["s"]))).as_deref(),
        Some("s.length")
    );
}

#[test]
fn atomic_text_needs_no_parentheses() {
    for text in ["n", "xs.length", "f(a + b)", "xs[i - 1]", "\"a b\"", "@min(a, b)", "3.5"] {
        assert!(is_atomic(text), "{text}");
    }
    for text in ["n + 1", "-1", "a or False", "not x", "(x) => x", "a ? b : c", ""] {
        assert!(!is_atomic(text), "{text}");
    }
}

#[test]
fn compound_arguments_keep_their_grouping() {
    let n1 = args(&["n + 1"]);
    let ts_last = ts::REGISTRY.method(Some(&lista()), "ultima");
    assert_eq!(
        ts_last.map(|d| d.render("xs", &n1)).as_deref(),
        Some("xs.slice(Math.max(xs.length - (n + 1), 0))")
    );
    let py_last = py::REGISTRY.method(Some(&lista()), "ultima");
    assert_eq!(
        py_last.map(|d| d.render("xs", &n1)).as_deref(),
        Some("xs[max(len(xs) - (n + 1), 0):]")
    );

    let pow = args(&["a + 1", "2"]);
    let ts_pow = ts::REGISTRY.intrinsic("potentia");
    assert_eq!(ts_pow.map(|d| d.render_intrinsic(&pow)).as_deref(), Some("((a + 1) ** 2)"));
    let py_pow = py::REGISTRY.intrinsic("potentia");
    assert_eq!(py_pow.map(|d| d.render_intrinsic(&pow)).as_deref(), Some("((a + 1) ** 2)"));

    let py_in = py::REGISTRY.method(Some(&lista()), "continet");
    assert_eq!(
        py_in.map(|d| d.render("xs", &args(&["a or False"]))).as_deref(),
        Some("((a or False) in xs)")
    );
    let py_sign = py::REGISTRY.intrinsic("signum");
    assert_eq!(
        py_sign.map(|d| d.render_intrinsic(&args(&["a - b"]))).as_deref(),
        Some("(((a - b) > 0) - ((a - b) < 0))")
    );

    let ts_len = ts::REGISTRY.intrinsic("longitudo");
    assert_eq!(
        ts_len.map(|d| d.render_intrinsic(&args(&["a + b"]))).as_deref(),
        Some("(a + b).length")
    );
}

#[test]
fn atomic_arguments_are_left_alone() {
    let py_last = py::REGISTRY.method(Some(&lista()), "ultima");
    assert_eq!(
        py_last.map(|d| d.render("xs", &args(&["n"]))).as_deref(),
        Some("xs[max(len(xs) - n, 0):]")
    );
    let ts_pow = ts::REGISTRY.intrinsic("potentia");
    assert_eq!(
        ts_pow.map(|d| d.render_intrinsic(&args(&["a", "2"]))).as_deref(),
        Some("(a ** 2)")
    );
}

#[test]
fn partition_binds_its_callback_once() {
    let cb = "(x) => x > 1";
    let ts_split = ts::REGISTRY.method(Some(&lista()), "partire");
    let out = ts_split.map(|d| d.render("xs", &args(&[cb]))).unwrap_or_default();
    assert_eq!(out.matches(cb).count(), 1, "{out}");
    assert_eq!(out.matches("xs").count(), 4, "{out}");

    let cb = "lambda x: x > 1";
    let py_split = py::REGISTRY.method(Some(&lista()), "partire");
    let out = py_split.map(|d| d.render("items", &args(&[cb]))).unwrap_or_default();
    assert_eq!(out.matches(cb).count(), 1, "{out}");
    assert_eq!(out.matches("items").count(), 1, "{out}");
}
