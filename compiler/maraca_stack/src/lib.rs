//! Stack growth for recursive tree walks.
//!
//! The parser, the node compiler and the document validator all recurse once
//! per level of nesting. Deeply nested blocks (machine-generated input, long
//! right-leaning operator chains) would otherwise overflow the native stack.
//!
//! Wrap the body of any function that recurses on nesting depth:
//!
//! ```text
//! fn compile_node(&mut self, id: NodeId) -> Result<Doc, FormatError> {
//!     ensure_sufficient_stack(|| self.compile_node_inner(id))
//! }
//! ```

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
