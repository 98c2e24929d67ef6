//! Container-level declarations prepended to Zig output.

use tracing::debug;

use crate::emit::reindent;
use crate::features::ZigFeatures;

const STD: &str = "const std = @import(\"std\");";

const ALLOCATOR: &str = "const allocator = std.heap.page_allocator;";

const FABER_LISTA: &str = r"fn faberLista(comptime T: type, items: []const T) !std.ArrayList(T) {
    var list = std.ArrayList(T).init(allocator);
    try list.appendSlice(items);
    return list;
}";

pub(super) fn render(features: ZigFeatures, unit: &str) -> String {
    debug!(?features, "zig preamble");
    if features.is_empty() {
        return String::new();
    }
    let mut out = format!("{STD}\n");
    if features.contains(ZigFeatures::ALLOCATOR) {
        out.push_str(ALLOCATOR);
        out.push('\n');
    }
    if features.contains(ZigFeatures::LIST_LITERAL) {
        out.push('\n');
        out.push_str(&reindent(FABER_LISTA, unit));
    }
    out
}
