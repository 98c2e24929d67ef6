//! Python registry. Lists lower to `list`, `tabula` to `dict`, `copia` to
//! `set`. Callbacks arrive as `lambda` text and are applied in parentheses.

use super::{arg, operand, Emission, MethodDef, Registry};
use crate::features::PyFeatures;

type Def = MethodDef<PyFeatures>;

const NONE: PyFeatures = PyFeatures::empty();

const fn method(name: &'static str, target: &'static str) -> Def {
    MethodDef {
        name,
        mutates: false,
        emission: Emission::Method(target),
        requires: NONE,
    }
}

const fn mutating(name: &'static str, target: &'static str) -> Def {
    MethodDef {
        name,
        mutates: true,
        emission: Emission::Method(target),
        requires: NONE,
    }
}

const fn custom(name: &'static str, f: fn(&str, &[String]) -> String) -> Def {
    MethodDef {
        name,
        mutates: false,
        emission: Emission::Custom(f),
        requires: NONE,
    }
}

const fn custom_mut(name: &'static str, f: fn(&str, &[String]) -> String) -> Def {
    MethodDef {
        name,
        mutates: true,
        emission: Emission::Custom(f),
        requires: NONE,
    }
}

const fn needs(def: Def, requires: PyFeatures) -> Def {
    MethodDef { requires, ..def }
}

/// Entries that render as assignments and are only valid as statements.
pub const STATEMENT_ONLY: &[&str] = &["filtra", "pone"];

fn callback(args: &[String]) -> &str {
    arg(args, 0, "bool")
}

static LISTA: &[Def] = &[
    mutating("adde", "append"),
    custom_mut("praepone", |o, a| format!("{o}.insert(0, {})", arg(a, 0, "None"))),
    custom("addita", |o, a| format!("[*{o}, {}]", arg(a, 0, "None"))),
    custom("praeposita", |o, a| format!("[{}, *{o}]", arg(a, 0, "None"))),
    mutating("remove", "pop"),
    custom_mut("decapita", |o, _| format!("{o}.pop(0)")),
    custom("primus", |o, _| format!("{o}[0]")),
    custom("ultimus", |o, _| format!("{o}[-1]")),
    custom("accipe", |o, a| format!("{o}[{}]", arg(a, 0, "0"))),
    custom("longitudo", |o, _| format!("len({o})")),
    custom("vacua", |o, _| format!("(len({o}) == 0)")),
    custom("continet", |o, a| format!("({} in {o})", operand(a, 0, "None"))),
    custom("indiceDe", |o, a| {
        let x = operand(a, 0, "None");
        format!("({o}.index({x}) if {x} in {o} else -1)")
    }),
    custom("inveni", |o, a| {
        format!("next((x for x in {o} if ({})(x)), None)", callback(a))
    }),
    custom("inveniIndicem", |o, a| {
        format!(
            "next((i for i, x in enumerate({o}) if ({})(x)), -1)",
            callback(a)
        )
    }),
    custom("filtrata", |o, a| {
        format!("[x for x in {o} if ({})(x)]", callback(a))
    }),
    custom_mut("filtra", |o, a| {
        format!("{o}[:] = [x for x in {o} if ({})(x)]", callback(a))
    }),
    custom("mappata", |o, a| {
        format!("[({})(x) for x in {o}]", arg(a, 0, "lambda x: x"))
    }),
    // Source order is (seed, fn); functools.reduce takes (fn, iterable, seed).
    needs(
        custom("reducta", |o, a| {
            format!(
                "reduce({}, {o}, {})",
                arg(a, 1, "lambda a, b: b"),
                arg(a, 0, "None")
            )
        }),
        PyFeatures::REDUCE,
    ),
    needs(
        custom("ordinata", |o, a| match a.first() {
            Some(cmp) => format!("sorted({o}, key=cmp_to_key({cmp}))"),
            None => format!("sorted({o})"),
        }),
        PyFeatures::REDUCE,
    ),
    needs(
        custom_mut("ordina", |o, a| match a.first() {
            Some(cmp) => format!("{o}.sort(key=cmp_to_key({cmp}))"),
            None => format!("{o}.sort()"),
        }),
        PyFeatures::REDUCE,
    ),
    custom("inversa", |o, _| format!("list(reversed({o}))")),
    mutating("inverte", "reverse"),
    custom("unica", |o, _| format!("list(dict.fromkeys({o}))")),
    custom("sectio", |o, a| match a.get(1) {
        Some(end) => format!("{o}[{}:{end}]", arg(a, 0, "")),
        None => format!("{o}[{}:]", arg(a, 0, "")),
    }),
    custom("prima", |o, a| format!("{o}[:{}]", arg(a, 0, "1"))),
    custom("ultima", |o, a| {
        format!("{o}[max(len({o}) - {}, 0):]", operand(a, 0, "1"))
    }),
    custom("omitte", |o, a| format!("{o}[{}:]", arg(a, 0, "1"))),
    custom("coniunge", |o, a| {
        format!("{}.join(str(x) for x in {o})", operand(a, 0, "\"\""))
    }),
    needs(
        custom("congrega", |o, a| {
            format!("_congrega({o}, {})", arg(a, 0, "lambda x: x"))
        }),
        PyFeatures::GROUP_BY,
    ),
    // Receiver and callback are each evaluated once.
    custom("partire", |o, a| {
        format!(
            "(lambda xs, p: [[x for x in xs if p(x)], [x for x in xs if not p(x)]])({o}, {})",
            callback(a)
        )
    }),
    needs(
        custom("miscita", |o, _| format!("random.sample({o}, len({o}))")),
        PyFeatures::RANDOM,
    ),
    needs(
        custom("specimen", |o, _| format!("random.choice({o})")),
        PyFeatures::RANDOM,
    ),
    needs(
        custom("specimina", |o, a| {
            format!("random.sample({o}, {})", arg(a, 0, "1"))
        }),
        PyFeatures::RANDOM,
    ),
    custom("fragmenta", |o, a| {
        let n = operand(a, 0, "1");
        format!("[{o}[i:i + {n}] for i in range(0, len({o}), {n})]")
    }),
    custom("omnes", |o, a| format!("all(({})(x) for x in {o})", callback(a))),
    custom("aliquis", |o, a| format!("any(({})(x) for x in {o})", callback(a))),
    custom("summa", |o, _| format!("sum({o})")),
    mutating("purga", "clear"),
    custom("perambula", |o, a| {
        format!("[({})(x) for x in {o}]", arg(a, 0, "print"))
    }),
];

static TABULA: &[Def] = &[
    custom_mut("pone", |o, a| {
        format!("{o}[{}] = {}", arg(a, 0, "None"), arg(a, 1, "None"))
    }),
    method("accipe", "get"),
    custom("habet", |o, a| format!("({} in {o})", operand(a, 0, "None"))),
    custom_mut("dele", |o, a| format!("{o}.pop({}, None)", arg(a, 0, "None"))),
    custom("claves", |o, _| format!("list({o}.keys())")),
    custom("valores", |o, _| format!("list({o}.values())")),
    custom("paria", |o, _| format!("list({o}.items())")),
    custom("longitudo", |o, _| format!("len({o})")),
    custom("vacua", |o, _| format!("(len({o}) == 0)")),
    mutating("purga", "clear"),
    custom("conflata", |o, a| format!("{{**{o}, **{}}}", arg(a, 0, "{}"))),
    custom("inversa", |o, _| format!("{{v: k for k, v in {o}.items()}}")),
    custom("selecta", |o, a| {
        format!(
            "{{k: v for k, v in {o}.items() if k in [{}]}}",
            a.join(", ")
        )
    }),
    custom("omissa", |o, a| {
        format!(
            "{{k: v for k, v in {o}.items() if k not in [{}]}}",
            a.join(", ")
        )
    }),
    custom("inLista", |o, _| format!("list({o}.items())")),
];

static COPIA: &[Def] = &[
    mutating("adde", "add"),
    custom("habet", |o, a| format!("({} in {o})", operand(a, 0, "None"))),
    mutating("dele", "discard"),
    custom("longitudo", |o, _| format!("len({o})")),
    custom("vacua", |o, _| format!("(len({o}) == 0)")),
    mutating("purga", "clear"),
    custom("unio", |o, a| format!("({o} | {})", operand(a, 0, "set()"))),
    custom("intersectio", |o, a| format!("({o} & {})", operand(a, 0, "set()"))),
    custom("differentia", |o, a| format!("({o} - {})", operand(a, 0, "set()"))),
    custom("symmetrica", |o, a| format!("({o} ^ {})", operand(a, 0, "set()"))),
    method("subcopia", "issubset"),
    method("supercopia", "issuperset"),
    custom("inLista", |o, _| format!("list({o})")),
];

static TEXTUS: &[Def] = &[
    custom("longitudo", |o, _| format!("len({o})")),
    method("maiuscula", "upper"),
    method("minuscula", "lower"),
    custom("continet", |o, a| format!("({} in {o})", operand(a, 0, "\"\""))),
    method("incipit", "startswith"),
    method("desinit", "endswith"),
    method("divide", "split"),
    method("recide", "strip"),
    method("substitue", "replace"),
];

static INTRINSICS: &[Def] = &[
    needs(method("pavimentum", "math.floor"), PyFeatures::MATH),
    needs(method("tectum", "math.ceil"), PyFeatures::MATH),
    needs(method("radix", "math.sqrt"), PyFeatures::MATH),
    method("absolutum", "abs"),
    method("minimus", "min"),
    method("maximus", "max"),
    needs(method("aleatorium", "random.random"), PyFeatures::RANDOM),
    method("textum", "str"),
    method("numerum", "int"),
    method("longitudo", "len"),
    custom("signum", |_, a| {
        let x = operand(a, 0, "0");
        format!("(({x} > 0) - ({x} < 0))")
    }),
    custom("potentia", |_, a| {
        format!("({} ** {})", operand(a, 0, "0"), operand(a, 1, "1"))
    }),
];

pub static REGISTRY: Registry<PyFeatures> = Registry {
    lista: LISTA,
    tabula: TABULA,
    copia: COPIA,
    textus: TEXTUS,
    intrinsics: INTRINSICS,
};
