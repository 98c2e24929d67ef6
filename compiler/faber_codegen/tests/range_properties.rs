//! Range bounds across targets, checked over random literal ranges.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use faber_codegen::{generate, CodegenOptions, Target};
use proptest::prelude::*;

fn lower(src: &str, target: Target) -> String {
    let program = faber_types::annotate(faber_parse::parse(src).unwrap());
    generate(&program, &CodegenOptions::new(target)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exclusive_end_is_used_as_written(start in 0i64..500, len in 0i64..500) {
        let end = start + len;
        let src = format!("ex {start}..{end} pro i {{ scribe i }}");
        let ts = lower(&src, Target::TypeScript);
        prop_assert!(ts.contains(&format!("for (let i = {start}; i < {end}; i++)")), "{}", ts);
        let py = lower(&src, Target::Python);
        prop_assert!(py.contains(&format!("for i in range({start}, {end}):")), "{}", py);
    }

    #[test]
    fn inclusive_end_is_folded_one_past(start in 0i64..500, len in 0i64..500) {
        let end = start + len;
        let src = format!("ex {start} usque {end} pro i {{ scribe i }}");
        let past = end + 1;
        let ts = lower(&src, Target::TypeScript);
        prop_assert!(ts.contains(&format!("i < {past};")), "{}", ts);
        let py = lower(&src, Target::Python);
        prop_assert!(py.contains(&format!("range({start}, {past})")), "{}", py);
        let zig = lower(&src, Target::Zig);
        prop_assert!(zig.contains(&format!("while (i < {past})")), "{}", zig);
    }

    #[test]
    fn scribe_prints_the_literal(n in 0i64..1_000_000) {
        let src = format!("scribe {n}");
        prop_assert_eq!(lower(&src, Target::TypeScript), format!("console.log({n});\n"));
        prop_assert_eq!(lower(&src, Target::Python), format!("print({n})\n"));
    }
}
