//! Evaluation and traversal context configuration

use std::cell::Cell;

/// Default nesting limit for both evaluation and traversal.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for evaluation and traversal.
///
/// This is plain configuration: every `evaluate` or `visit` call starts
/// its own [`DepthCounter`] from it, so calls never share nesting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum nesting depth of nodes entered at once
    pub max_depth: usize,

    /// Emit a `trace` event for every node dispatched or evaluated
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Enable or disable per-node tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// A fresh depth counter bounded by `max_depth`.
    pub fn depth_counter(&self) -> DepthCounter {
        DepthCounter::new(self.max_depth)
    }
}

/// Nesting depth of a single evaluation or traversal.
///
/// Every nested node entered takes a [`DepthGuard`]; entering beyond the
/// limit fails instead of recursing further.
#[derive(Debug)]
pub struct DepthCounter {
    limit: usize,
    current: Cell<usize>,
}

impl DepthCounter {
    /// Create a counter at depth zero.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            current: Cell::new(0),
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.current.get()
    }

    /// The configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Enter one level of nesting.
    ///
    /// Returns the limit as the error when it would be exceeded.
    pub fn enter(&self) -> Result<DepthGuard<'_>, usize> {
        let depth = self.current.get();
        if depth >= self.limit {
            return Err(self.limit);
        }
        self.current.set(depth + 1);
        Ok(DepthGuard {
            current: &self.current,
        })
    }
}

/// RAII guard that leaves one level of nesting when dropped.
#[derive(Debug)]
pub struct DepthGuard<'a> {
    current: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.current.set(self.current.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_depth() {
        let depth = EvalContext::new().depth_counter();
        {
            let _outer = depth.enter().unwrap();
            let _inner = depth.enter().unwrap();
            assert_eq!(depth.depth(), 2);
        }
        assert_eq!(depth.depth(), 0);
    }

    #[test]
    fn test_enter_past_limit_fails() {
        let depth = EvalContext::with_max_depth(1).depth_counter();
        let _guard = depth.enter().unwrap();
        assert_eq!(depth.enter().unwrap_err(), 1);
        assert_eq!(depth.depth(), 1);
    }

    #[test]
    fn test_counters_are_independent() {
        let ctx = EvalContext::with_max_depth(1).with_trace(true);
        let first = ctx.depth_counter();
        let _guard = first.enter().unwrap();

        let second = ctx.depth_counter();
        assert_eq!(second.depth(), 0);
        assert!(second.enter().is_ok());
        assert_eq!(second.limit(), 1);
    }
}
