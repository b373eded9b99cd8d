//! Stack growth for deep recursion
//!
//! Evaluation, traversal and JSON conversion all recurse once per tree
//! level. Wrapping each level in [`ensure_sufficient_stack`] lets deep but
//! legal trees run on small thread stacks.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// On wasm the stack cannot be grown; `f` runs as is.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Run `f` on a stack with at least `bytes` available.
///
/// Used where the recursion happens inside a third-party call that cannot
/// be wrapped level by level.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn with_stack_of<R>(bytes: usize, f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(bytes, bytes, f)
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn with_stack_of<R>(_bytes: usize, f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            ensure_sufficient_stack(|| 1 + depth(n - 1))
        }
    }

    #[test]
    fn test_deep_recursion_completes() {
        assert_eq!(depth(100_000), 100_000);
    }

    #[test]
    fn test_with_stack_of_returns_value() {
        assert_eq!(with_stack_of(64 * 1024, || 7), 7);
    }
}
