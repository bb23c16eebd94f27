//! Stack growth for deep recursion.
//!
//! Values, types and type expressions nest without a fixed bound: an array
//! of arrays of arrays, a struct type whose entries are struct types, or a
//! type expression with thousands of parentheses. Every recursive walk over
//! those structures (parsing, structural equality, assignability, rendering)
//! wraps its recursive step in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand through `stacker`. On
//! WASM the closure is simply called.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
