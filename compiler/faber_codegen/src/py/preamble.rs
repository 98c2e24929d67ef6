//! Imports and helpers prepended to Python output.

use tracing::debug;

use crate::emit::reindent;
use crate::features::PyFeatures;

const PRAEFIXUM: &str = r"def _praefixum(compute):
    return compute()";

const GROUP_BY: &str = r"def _congrega(items, key):
    groups = {}
    for item in items:
        groups.setdefault(key(item), []).append(item)
    return groups";

const FIUNT: &str = r#"def _fiunt(gen):
    for resp in gen:
        if resp["op"] == "done":
            return
        if resp["op"] == "error":
            raise Exception(resp["message"])
        yield resp["data"]"#;

const FIENT: &str = r#"async def _fient(gen):
    async for resp in gen:
        if resp["op"] == "done":
            return
        if resp["op"] == "error":
            raise Exception(resp["message"])
        yield resp["data"]"#;

const HELPERS: &[(PyFeatures, &str)] = &[
    (PyFeatures::PRAEFIXUM, PRAEFIXUM),
    (PyFeatures::GROUP_BY, GROUP_BY),
    (PyFeatures::FIUNT, FIUNT),
    (PyFeatures::FIENT, FIENT),
];

fn names(features: PyFeatures, table: &[(PyFeatures, &'static str)]) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(flag, _)| features.contains(*flag))
        .map(|(_, name)| *name)
        .collect()
}

fn imports(features: PyFeatures) -> Vec<String> {
    let mut out = Vec::new();
    for (flag, module) in [
        (PyFeatures::MATH, "math"),
        (PyFeatures::RANDOM, "random"),
        (PyFeatures::SYS, "sys"),
    ] {
        if features.contains(flag) {
            out.push(format!("import {module}"));
        }
    }
    let from: [(&str, Vec<&str>); 5] = [
        (
            "dataclasses",
            names(
                features,
                &[(PyFeatures::DATACLASS, "dataclass"), (PyFeatures::FIELD, "field")],
            ),
        ),
        ("decimal", names(features, &[(PyFeatures::DECIMAL, "Decimal")])),
        ("enum", names(features, &[(PyFeatures::ENUM, "Enum")])),
        (
            "functools",
            names(features, &[(PyFeatures::REDUCE, "cmp_to_key, reduce")]),
        ),
        (
            "typing",
            names(
                features,
                &[
                    (PyFeatures::ANY, "Any"),
                    (PyFeatures::PROTOCOL, "Protocol, runtime_checkable"),
                ],
            ),
        ),
    ];
    for (module, items) in from {
        if !items.is_empty() {
            out.push(format!("from {module} import {}", items.join(", ")));
        }
    }
    out
}

pub(super) fn render(features: PyFeatures, unit: &str) -> String {
    debug!(?features, "python preamble");
    let mut chunks = Vec::new();
    let imports = imports(features);
    if !imports.is_empty() {
        let mut text = imports.join("\n");
        text.push('\n');
        chunks.push(text);
    }
    chunks.extend(
        HELPERS
            .iter()
            .filter(|(flag, _)| features.contains(*flag))
            .map(|(_, text)| reindent(text, unit)),
    );
    chunks.join("\n")
}
