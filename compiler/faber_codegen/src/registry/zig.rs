//! Zig registry. `lista` is `std.ArrayList(T)`, `tabula` a hash map and
//! `copia` a hash map with `void` values; strings are `[]const u8`.
//!
//! The vocabulary is smaller than the dynamic targets': methods that need
//! allocation of a fresh collection or a callback are absent and lower as
//! ordinary calls.

use super::{arg, operand, Emission, MethodDef, Registry};
use crate::features::ZigFeatures;

type Def = MethodDef<ZigFeatures>;

const NONE: ZigFeatures = ZigFeatures::empty();

const fn method(name: &'static str, target: &'static str) -> Def {
    MethodDef {
        name,
        mutates: false,
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

const fn needs(def: Def, requires: ZigFeatures) -> Def {
    MethodDef { requires, ..def }
}

static LISTA: &[Def] = &[
    custom_mut("adde", |o, a| format!("try {o}.append({})", arg(a, 0, "undefined"))),
    custom_mut("praepone", |o, a| {
        format!("try {o}.insert(0, {})", arg(a, 0, "undefined"))
    }),
    custom_mut("remove", |o, _| format!("{o}.pop()")),
    custom_mut("decapita", |o, _| format!("{o}.orderedRemove(0)")),
    custom("primus", |o, _| format!("{o}.items[0]")),
    custom("ultimus", |o, _| format!("{o}.items[{o}.items.len - 1]")),
    custom("accipe", |o, a| format!("{o}.items[{}]", arg(a, 0, "0"))),
    custom("longitudo", |o, _| format!("{o}.items.len")),
    custom("vacua", |o, _| format!("({o}.items.len == 0)")),
    custom("sectio", |o, a| match a.get(1) {
        Some(end) => format!("{o}.items[{}..{end}]", arg(a, 0, "0")),
        None => format!("{o}.items[{}..]", arg(a, 0, "0")),
    }),
    custom("prima", |o, a| format!("{o}.items[0..{}]", arg(a, 0, "1"))),
    custom("omitte", |o, a| format!("{o}.items[{}..]", arg(a, 0, "1"))),
    needs(
        custom_mut("inverte", |o, _| {
            format!("std.mem.reverse(@TypeOf({o}.items[0]), {o}.items)")
        }),
        ZigFeatures::STD,
    ),
    custom_mut("purga", |o, _| format!("{o}.clearRetainingCapacity()")),
];

static TABULA: &[Def] = &[
    custom_mut("pone", |o, a| {
        format!(
            "try {o}.put({}, {})",
            arg(a, 0, "undefined"),
            arg(a, 1, "undefined")
        )
    }),
    method("accipe", "get"),
    method("habet", "contains"),
    custom_mut("dele", |o, a| format!("{o}.remove({})", arg(a, 0, "undefined"))),
    custom("longitudo", |o, _| format!("{o}.count()")),
    custom("vacua", |o, _| format!("({o}.count() == 0)")),
    custom_mut("purga", |o, _| format!("{o}.clearRetainingCapacity()")),
];

static COPIA: &[Def] = &[
    custom_mut("adde", |o, a| format!("try {o}.put({}, {{}})", arg(a, 0, "undefined"))),
    method("habet", "contains"),
    custom_mut("dele", |o, a| format!("{o}.remove({})", arg(a, 0, "undefined"))),
    custom("longitudo", |o, _| format!("{o}.count()")),
    custom("vacua", |o, _| format!("({o}.count() == 0)")),
    custom_mut("purga", |o, _| format!("{o}.clearRetainingCapacity()")),
];

static TEXTUS: &[Def] = &[
    custom("longitudo", |o, _| format!("{o}.len")),
    needs(
        custom("continet", |o, a| {
            format!("(std.mem.indexOf(u8, {o}, {}) != null)", arg(a, 0, "\"\""))
        }),
        ZigFeatures::STD,
    ),
    needs(
        custom("incipit", |o, a| {
            format!("std.mem.startsWith(u8, {o}, {})", arg(a, 0, "\"\""))
        }),
        ZigFeatures::STD,
    ),
    needs(
        custom("desinit", |o, a| {
            format!("std.mem.endsWith(u8, {o}, {})", arg(a, 0, "\"\""))
        }),
        ZigFeatures::STD,
    ),
    needs(
        custom("recide", |o, _| format!("std.mem.trim(u8, {o}, \" \\t\\r\\n\")")),
        ZigFeatures::STD,
    ),
];

static INTRINSICS: &[Def] = &[
    method("pavimentum", "@floor"),
    method("tectum", "@ceil"),
    method("radix", "@sqrt"),
    method("absolutum", "@abs"),
    method("minimus", "@min"),
    method("maximus", "@max"),
    custom("longitudo", |_, a| format!("{}.len", operand(a, 0, "\"\""))),
    needs(method("signum", "std.math.sign"), ZigFeatures::STD),
    needs(
        custom("potentia", |_, a| {
            format!(
                "std.math.pow(f64, {}, {})",
                arg(a, 0, "0"),
                arg(a, 1, "1")
            )
        }),
        ZigFeatures::STD,
    ),
];

pub static REGISTRY: Registry<ZigFeatures> = Registry {
    lista: LISTA,
    tabula: TABULA,
    copia: COPIA,
    textus: TEXTUS,
    intrinsics: INTRINSICS,
};
