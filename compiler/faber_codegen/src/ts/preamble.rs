//! Helpers prepended to TypeScript output, chosen from the final feature set.

use tracing::debug;

use crate::emit::reindent;
use crate::features::TsFeatures;

const RESPONSUM: &str = r#"type Responsum<T> =
    | { op: "item"; data: T }
    | { op: "error"; message: string }
    | { op: "done" };"#;

const FIUNT: &str = r#"function* __fiunt<T>(gen: Generator<Responsum<T>>): Generator<T> {
    for (const resp of gen) {
        if (resp.op === "done") return;
        if (resp.op === "error") throw new Error(resp.message);
        yield resp.data;
    }
}"#;

const FIENT: &str = r#"async function* __fient<T>(gen: AsyncGenerator<Responsum<T>>): AsyncGenerator<T> {
    for await (const resp of gen) {
        if (resp.op === "done") return;
        if (resp.op === "error") throw new Error(resp.message);
        yield resp.data;
    }
}"#;

const PRAEFIXUM: &str = r"function __praefixum<T>(compute: () => T): T {
    return compute();
}";

const RANGE: &str = r"function __range(start: number, end: number, step = 1): number[] {
    const out: number[] = [];
    if (step > 0) {
        for (let i = start; i < end; i += step) out.push(i);
    } else if (step < 0) {
        for (let i = start; i > end; i += step) out.push(i);
    }
    return out;
}";

const SHUFFLE: &str = r"function __miscita<T>(items: T[]): T[] {
    const out = items.slice();
    for (let i = out.length - 1; i > 0; i--) {
        const j = Math.floor(Math.random() * (i + 1));
        [out[i], out[j]] = [out[j], out[i]];
    }
    return out;
}";

const GROUP_BY: &str = r"function __congrega<T, K>(items: T[], key: (item: T) => K): Map<K, T[]> {
    const groups = new Map<K, T[]>();
    for (const item of items) {
        const k = key(item);
        const group = groups.get(k);
        if (group) group.push(item);
        else groups.set(k, [item]);
    }
    return groups;
}";

const CHUNK: &str = r"function __fragmenta<T>(items: T[], size: number): T[][] {
    const out: T[][] = [];
    for (let i = 0; i < items.length; i += size) out.push(items.slice(i, i + size));
    return out;
}";

/// Chunks in output order, each tied to the flag that selects it.
const CHUNKS: &[(TsFeatures, &str)] = &[
    (TsFeatures::RESPONSUM, RESPONSUM),
    (TsFeatures::FIUNT, FIUNT),
    (TsFeatures::FIENT, FIENT),
    (TsFeatures::PRAEFIXUM, PRAEFIXUM),
    (TsFeatures::RANGE, RANGE),
    (TsFeatures::SHUFFLE, SHUFFLE),
    (TsFeatures::GROUP_BY, GROUP_BY),
    (TsFeatures::CHUNK, CHUNK),
];

pub(super) fn render(features: TsFeatures, unit: &str) -> String {
    debug!(?features, "typescript preamble");
    let chunks: Vec<String> = CHUNKS
        .iter()
        .filter(|(flag, _)| features.contains(*flag))
        .map(|(_, text)| reindent(text, unit))
        .collect();
    chunks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_renders_nothing() {
        assert_eq!(render(TsFeatures::empty(), "    "), "");
    }

    #[test]
    fn only_requested_helpers_appear() {
        let text = render(TsFeatures::RESPONSUM | TsFeatures::FIUNT, "  ");
        assert!(text.starts_with("type Responsum<T> ="));
        assert!(text.contains("function* __fiunt"));
        assert!(!text.contains("__fient"));
        assert!(!text.contains("__range"));
        assert!(text.contains("\n  | { op: \"done\" };"));
    }
}
