//! Expression evaluation
//!
//! Only a narrow subset of expressions has a value outside the runtime:
//! literals, identifiers, member chains, unary `-` and binary `+`/`-`.
//! Everything else fails with [`EvalError::UnevaluableNodeKind`].

pub mod binary;
pub mod identifier;
pub mod literal;
pub mod member;
pub mod unary;

use tracing::trace;

use crate::context::DepthCounter;
use crate::stack::ensure_sufficient_stack;
use crate::{EvalContext, EvalError, Namespace, Node, Value};

/// Trait for evaluating syntax nodes to values.
///
/// Each evaluable record type implements this trait; [`Node`] dispatches on
/// its kind.
pub trait Evaluate {
    /// Evaluate this node against the given namespace.
    ///
    /// `depth` tracks nesting for this one evaluation.
    fn eval(
        &self,
        ns: &Namespace,
        ctx: &EvalContext,
        depth: &DepthCounter,
    ) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Node {
    fn eval(
        &self,
        ns: &Namespace,
        ctx: &EvalContext,
        depth: &DepthCounter,
    ) -> Result<Value, EvalError> {
        let _guard = depth
            .enter()
            .map_err(|limit| EvalError::DepthLimitExceeded { limit })?;

        if ctx.trace {
            trace!(kind = self.kind_name(), depth = depth.depth(), "evaluate");
        }

        ensure_sufficient_stack(|| match self {
            Node::Literal(lit) => lit.eval(ns, ctx, depth),
            Node::Identifier(ident) => ident.eval(ns, ctx, depth),
            Node::MemberExpression(expr) => expr.eval(ns, ctx, depth),
            Node::UnaryExpression(expr) => expr.eval(ns, ctx, depth),
            Node::BinaryExpression(expr) => expr.eval(ns, ctx, depth),

            // Everything else
            other => Err(EvalError::UnevaluableNodeKind {
                kind: other.kind_name().to_string(),
            }),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression with a default context.
///
/// A missing namespace behaves as an empty one.
///
/// # Errors
///
/// Returns the first [`EvalError`] raised anywhere in the expression; no
/// partial value is produced.
#[tracing::instrument(level = "trace", skip_all, fields(kind = node.kind_name()))]
pub fn evaluate(node: &Node, ns: Option<&Namespace>) -> Result<Value, EvalError> {
    eval_with(node, ns, &EvalContext::default())
}

/// Evaluate an expression with an explicit context.
///
/// Each call counts nesting from zero, including calls made from inside a
/// visitor callback.
pub fn eval_with(
    node: &Node,
    ns: Option<&Namespace>,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let depth = ctx.depth_counter();
    match ns {
        Some(ns) => node.eval(ns, ctx, &depth),
        None => node.eval(&Namespace::new(), ctx, &depth),
    }
}

// Re-export for use by other modules
pub use member::resolve_member;
