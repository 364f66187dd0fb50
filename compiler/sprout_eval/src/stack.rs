//! Stack growth for deeply nested rule applications.
//!
//! Rule application recurses once per grammar level and once per growth
//! round, so long inputs against right-recursive or deeply nested grammars
//! can exhaust the native stack. Wrapping each application in
//! [`ensure_sufficient_stack`] grows the stack on demand instead.
//!
//! - **Red zone**: 100KB. Below this, the stack is grown.
//! - **Growth size**: 1MB per extension.

const RED_ZONE: usize = 100 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
