//! TypeScript registry. Lists lower to arrays, `tabula` to `Map`, `copia`
//! to `Set`.

use super::{arg, operand, Emission, MethodDef, Registry};
use crate::features::TsFeatures;

type Def = MethodDef<TsFeatures>;

const NONE: TsFeatures = TsFeatures::empty();

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

const fn property(name: &'static str, target: &'static str) -> Def {
    MethodDef {
        name,
        mutates: false,
        emission: Emission::Property(target),
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

const fn needs(def: Def, requires: TsFeatures) -> Def {
    MethodDef { requires, ..def }
}

/// Key list for `selecta` / `omissa`, which take the keys as arguments.
fn key_list(args: &[String]) -> String {
    format!("[{}]", args.join(", "))
}

static LISTA: &[Def] = &[
    mutating("adde", "push"),
    mutating("praepone", "unshift"),
    custom("addita", |o, a| format!("[...{o}, {}]", arg(a, 0, "undefined"))),
    custom("praeposita", |o, a| format!("[{}, ...{o}]", arg(a, 0, "undefined"))),
    mutating("remove", "pop"),
    mutating("decapita", "shift"),
    custom("primus", |o, _| format!("{o}[0]")),
    custom("ultimus", |o, _| format!("{o}.at(-1)")),
    custom("accipe", |o, a| format!("{o}.at({})", arg(a, 0, "0"))),
    property("longitudo", "length"),
    custom("vacua", |o, _| format!("({o}.length === 0)")),
    method("continet", "includes"),
    method("indiceDe", "indexOf"),
    method("inveni", "find"),
    method("inveniIndicem", "findIndex"),
    method("filtrata", "filter"),
    custom_mut("filtra", |o, a| {
        format!("{o}.splice(0, {o}.length, ...{o}.filter({}))", arg(a, 0, "Boolean"))
    }),
    method("mappata", "map"),
    // Source order is (seed, fn).
    custom("reducta", |o, a| {
        format!("{o}.reduce({}, {})", arg(a, 1, "(a, b) => b"), arg(a, 0, "undefined"))
    }),
    custom("ordinata", |o, a| match a.first() {
        Some(cmp) => format!("[...{o}].sort({cmp})"),
        None => format!("[...{o}].sort()"),
    }),
    mutating("ordina", "sort"),
    custom("inversa", |o, _| format!("[...{o}].reverse()")),
    mutating("inverte", "reverse"),
    custom("unica", |o, _| format!("[...new Set({o})]")),
    method("sectio", "slice"),
    custom("prima", |o, a| format!("{o}.slice(0, {})", arg(a, 0, "1"))),
    custom("ultima", |o, a| {
        format!("{o}.slice(Math.max({o}.length - {}, 0))", operand(a, 0, "1"))
    }),
    custom("omitte", |o, a| format!("{o}.slice({})", arg(a, 0, "1"))),
    custom("coniunge", |o, a| format!("{o}.join({})", arg(a, 0, "\"\""))),
    needs(
        custom("congrega", |o, a| format!("__congrega({o}, {})", arg(a, 0, "(x) => x"))),
        TsFeatures::GROUP_BY,
    ),
    // Receiver and callback are each evaluated once.
    custom("partire", |o, a| {
        format!(
            "((xs, p) => [xs.filter(p), xs.filter((x) => !p(x))])({o}, {})",
            arg(a, 0, "Boolean")
        )
    }),
    needs(
        custom("miscita", |o, _| format!("__miscita({o})")),
        TsFeatures::SHUFFLE,
    ),
    custom("specimen", |o, _| {
        format!("{o}[Math.floor(Math.random() * {o}.length)]")
    }),
    needs(
        custom("specimina", |o, a| {
            format!("__miscita({o}).slice(0, {})", arg(a, 0, "1"))
        }),
        TsFeatures::SHUFFLE,
    ),
    needs(
        custom("fragmenta", |o, a| format!("__fragmenta({o}, {})", arg(a, 0, "1"))),
        TsFeatures::CHUNK,
    ),
    method("omnes", "every"),
    method("aliquis", "some"),
    custom("summa", |o, _| format!("{o}.reduce((a, b) => a + b, 0)")),
    custom_mut("purga", |o, _| format!("{o}.splice(0, {o}.length)")),
    method("perambula", "forEach"),
];

static TABULA: &[Def] = &[
    mutating("pone", "set"),
    method("accipe", "get"),
    method("habet", "has"),
    mutating("dele", "delete"),
    custom("claves", |o, _| format!("[...{o}.keys()]")),
    custom("valores", |o, _| format!("[...{o}.values()]")),
    custom("paria", |o, _| format!("[...{o}.entries()]")),
    property("longitudo", "size"),
    custom("vacua", |o, _| format!("({o}.size === 0)")),
    mutating("purga", "clear"),
    custom("conflata", |o, a| {
        format!("new Map([...{o}, ...{}])", arg(a, 0, "new Map()"))
    }),
    custom("inversa", |o, _| {
        format!("new Map([...{o}].map(([k, v]) => [v, k]))")
    }),
    custom("selecta", |o, a| {
        format!(
            "new Map([...{o}].filter(([k]) => {}.includes(k)))",
            key_list(a)
        )
    }),
    custom("omissa", |o, a| {
        format!(
            "new Map([...{o}].filter(([k]) => !{}.includes(k)))",
            key_list(a)
        )
    }),
    custom("inLista", |o, _| format!("[...{o}.entries()]")),
];

static COPIA: &[Def] = &[
    mutating("adde", "add"),
    method("habet", "has"),
    mutating("dele", "delete"),
    property("longitudo", "size"),
    custom("vacua", |o, _| format!("({o}.size === 0)")),
    mutating("purga", "clear"),
    custom("unio", |o, a| format!("new Set([...{o}, ...{}])", arg(a, 0, "[]"))),
    custom("intersectio", |o, a| {
        format!("new Set([...{o}].filter((x) => {}.has(x)))", operand(a, 0, "new Set()"))
    }),
    custom("differentia", |o, a| {
        format!("new Set([...{o}].filter((x) => !{}.has(x)))", operand(a, 0, "new Set()"))
    }),
    custom("symmetrica", |o, a| {
        let other = operand(a, 0, "new Set()");
        format!(
            "new Set([...[...{o}].filter((x) => !{other}.has(x)), ...[...{other}].filter((x) => !{o}.has(x))])"
        )
    }),
    custom("subcopia", |o, a| {
        format!("[...{o}].every((x) => {}.has(x))", operand(a, 0, "new Set()"))
    }),
    custom("supercopia", |o, a| {
        format!("[...{}].every((x) => {o}.has(x))", arg(a, 0, "[]"))
    }),
    custom("inLista", |o, _| format!("[...{o}]")),
];

static TEXTUS: &[Def] = &[
    property("longitudo", "length"),
    method("maiuscula", "toUpperCase"),
    method("minuscula", "toLowerCase"),
    method("continet", "includes"),
    method("incipit", "startsWith"),
    method("desinit", "endsWith"),
    method("divide", "split"),
    method("recide", "trim"),
    method("substitue", "replaceAll"),
];

static INTRINSICS: &[Def] = &[
    method("pavimentum", "Math.floor"),
    method("tectum", "Math.ceil"),
    method("radix", "Math.sqrt"),
    method("absolutum", "Math.abs"),
    method("minimus", "Math.min"),
    method("maximus", "Math.max"),
    custom("aleatorium", |_, _| "Math.random()".to_string()),
    method("textum", "String"),
    method("numerum", "Number"),
    property("longitudo", "length"),
    method("signum", "Math.sign"),
    custom("potentia", |_, a| {
        format!("({} ** {})", operand(a, 0, "0"), operand(a, 1, "1"))
    }),
];

pub static REGISTRY: Registry<TsFeatures> = Registry {
    lista: LISTA,
    tabula: TABULA,
    copia: COPIA,
    textus: TEXTUS,
    intrinsics: INTRINSICS,
};
