//! Member expression evaluation
//!
//! A chain such as `a.b.c` is resolved from the inside out: each level
//! resolves its object to a container, then looks up its own field in that
//! container. Every recursive call handles a strictly shorter chain.

use crate::ast::MemberExpression;
use crate::context::DepthCounter;
use crate::error::type_name;
use crate::stack::ensure_sufficient_stack;
use crate::{EvalContext, EvalError, Namespace, Node, Value};

use super::Evaluate;

impl Evaluate for MemberExpression {
    fn eval(
        &self,
        ns: &Namespace,
        ctx: &EvalContext,
        depth: &DepthCounter,
    ) -> Result<Value, EvalError> {
        let field = field_name(self, ns, ctx, depth)?;
        let container = container_of(&self.object, &field, ns, ctx, depth)?;
        lookup(container, field).cloned()
    }
}

/// Resolve an identifier or member chain to the value it names.
///
/// Unlike identifier evaluation, a missing root name is reported as
/// [`EvalError::UnboundField`]: at this position the namespace is just the
/// outermost container.
///
/// # Errors
///
/// - `UnboundField` if any link of the chain is missing.
/// - `NotANamespace` if a link other than the last is not a namespace.
/// - `UnsupportedMemberTarget` if the chain passes through any node other
///   than an identifier or member expression.
pub fn resolve_member<'a>(
    node: &Node,
    ns: &'a Namespace,
    ctx: &EvalContext,
) -> Result<&'a Value, EvalError> {
    resolve(node, ns, ctx, &ctx.depth_counter())
}

fn resolve<'a>(
    node: &Node,
    ns: &'a Namespace,
    ctx: &EvalContext,
    depth: &DepthCounter,
) -> Result<&'a Value, EvalError> {
    let _guard = depth
        .enter()
        .map_err(|limit| EvalError::DepthLimitExceeded { limit })?;

    ensure_sufficient_stack(|| match node {
        Node::Identifier(ident) => lookup(ns, ident.name.clone()),
        Node::MemberExpression(expr) => {
            let field = field_name(expr, ns, ctx, depth)?;
            let container = container_of(&expr.object, &field, ns, ctx, depth)?;
            lookup(container, field)
        }
        other => Err(EvalError::UnsupportedMemberTarget {
            kind: other.kind_name().to_string(),
        }),
    })
}

/// The field a member expression names: the evaluated property when
/// computed, the property identifier's name otherwise.
fn field_name(
    expr: &MemberExpression,
    ns: &Namespace,
    ctx: &EvalContext,
    depth: &DepthCounter,
) -> Result<String, EvalError> {
    if expr.computed {
        return expr.property.eval(ns, ctx, depth)?.to_property_key();
    }
    match expr.property.as_ref() {
        Node::Identifier(ident) => Ok(ident.name.clone()),
        other => Err(EvalError::UnsupportedMemberTarget {
            kind: other.kind_name().to_string(),
        }),
    }
}

/// Resolve `object` and require it to be a namespace.
fn container_of<'a>(
    object: &Node,
    field: &str,
    ns: &'a Namespace,
    ctx: &EvalContext,
    depth: &DepthCounter,
) -> Result<&'a Namespace, EvalError> {
    match resolve(object, ns, ctx, depth)? {
        Value::Namespace(inner) => Ok(inner),
        other => Err(EvalError::NotANamespace {
            field: field.to_string(),
            found: type_name(other),
        }),
    }
}

fn lookup(container: &Namespace, field: String) -> Result<&Value, EvalError> {
    container
        .get(&field)
        .ok_or(EvalError::UnboundField { field })
}
