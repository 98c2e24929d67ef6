//! Cross-cutting lowering protocols.
//!
//! Each protocol decides *what* must happen once, in target-neutral terms;
//! the backends only decide how the decision is spelled.
//!
//! - [`verbs`]: return-verb unification (`fit`/`fiunt`/`fiet`/`fient`)
//! - [`union`]: `discerne` case planning over discriminated unions
//! - [`range`]: range bounds, steps, negative indices and slices
//! - [`optional`]: one null guard per optional chain

pub mod optional;
pub mod range;
pub mod union;
pub mod verbs;
