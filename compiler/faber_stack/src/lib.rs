//! Stack growth for deep recursion.
//!
//! The parser, the tree folder, every code generator and the canonical printer
//! recurse once per nesting level of the input. Wrapping each recursive step in
//! [`ensure_sufficient_stack`] moves the failure mode for pathological input
//! from a stack overflow to ordinary memory pressure, and [`MAX_NESTING_DEPTH`]
//! turns it into a reported error before that.
//!
//! On `wasm32` the guard is a passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Deepest syntactic nesting the front end accepts.
///
/// Input nested deeper than this is rejected as a resource-exhaustion error
/// instead of being handed to the recursive passes.
pub const MAX_NESTING_DEPTH: usize = 4096;

/// Run `f`, first growing the stack if fewer than `RED_ZONE` bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
