//! Callback tables for the visitor

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use super::shapes::{Shape, ShapeKind, VariableBinding};
use crate::{Ast, Node, Result};

/// What a callback asks the visitor to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep going: offer the node to further callbacks and visit its
    /// children
    #[default]
    Continue,

    /// The node is handled: do not descend into its children. Siblings
    /// are still visited.
    Handled,
}

impl Flow {
    /// Check if the callback signalled handled.
    pub fn is_handled(self) -> bool {
        self == Flow::Handled
    }
}

impl From<bool> for Flow {
    fn from(handled: bool) -> Self {
        if handled {
            Flow::Handled
        } else {
            Flow::Continue
        }
    }
}

/// Handler invoked with a raw node.
pub type NodeHandler<'cb> = Box<dyn FnMut(&Ast, &Node) -> Result<Flow> + 'cb>;

/// Handler invoked with one reshaped view of a node.
pub type ShapeHandler<'cb> = Box<dyn FnMut(&Ast, &Shape<'_>) -> Result<Flow> + 'cb>;

/// A table of callbacks keyed by raw node kind or special shape.
///
/// Handlers may borrow caller state for `'cb`. The table is lent to
/// [`Ast::visit`] and can be reused; drop it to release those borrows.
///
/// # Example
///
/// ```
/// use esreflect::{Ast, Callbacks, Flow};
///
/// let ast = Ast::from_estree(r#"{
///     "type": "Program",
///     "body": [{
///         "type": "ExpressionStatement",
///         "expression": {
///             "type": "CallExpression",
///             "callee": {"type": "Identifier", "name": "g"},
///             "arguments": []
///         }
///     }]
/// }"#).unwrap();
///
/// let mut callees = Vec::new();
/// let mut callbacks = Callbacks::new();
/// callbacks.on("CallExpression", |_, node| {
///     if let esreflect::Node::CallExpression(call) = node {
///         callees.extend(call.callee.as_identifier().map(String::from));
///     }
///     Ok(Flow::Continue)
/// });
/// ast.visit(&mut callbacks).unwrap();
/// drop(callbacks);
/// assert_eq!(callees, vec!["g".to_string()]);
/// ```
#[derive(Default)]
pub struct Callbacks<'cb> {
    nodes: HashMap<String, NodeHandler<'cb>>,
    shapes: HashMap<ShapeKind, ShapeHandler<'cb>>,
}

impl<'cb> Callbacks<'cb> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Registration
    // ═══════════════════════════════════════════════════════════════════

    /// Register a handler for a raw node kind.
    ///
    /// `kind` is the ESTree `type` string; a [`NodeKind`](crate::NodeKind)
    /// works too. Kinds outside the closed set are allowed and fire for
    /// [`Node::Unknown`] nodes the walk reaches. Registering the same kind
    /// twice replaces the earlier handler.
    pub fn on<F>(&mut self, kind: impl fmt::Display, handler: F) -> &mut Self
    where
        F: FnMut(&Ast, &Node) -> Result<Flow> + 'cb,
    {
        self.nodes.insert(kind.to_string(), Box::new(handler));
        self
    }

    /// Register a handler for every view of a special shape.
    pub fn on_shape<F>(&mut self, shape: ShapeKind, handler: F) -> &mut Self
    where
        F: FnMut(&Ast, &Shape<'_>) -> Result<Flow> + 'cb,
    {
        self.shapes.insert(shape, Box::new(handler));
        self
    }

    /// Register for [`ShapeKind::ObjectLiteral`]: called once per object
    /// expression with its properties as an ordered map.
    pub fn on_object_literal<F>(&mut self, mut handler: F) -> &mut Self
    where
        F: FnMut(&Ast, &IndexMap<String, &Node>) -> Result<Flow> + 'cb,
    {
        self.on_shape(ShapeKind::ObjectLiteral, move |ast, shape| match shape {
            Shape::ObjectLiteral(entries) => handler(ast, entries),
            _ => Ok(Flow::Continue),
        })
    }

    /// Register for [`ShapeKind::KeyValuePair`]: called once per property,
    /// in source order.
    pub fn on_key_value_pair<F>(&mut self, mut handler: F) -> &mut Self
    where
        F: FnMut(&Ast, &str, &Node) -> Result<Flow> + 'cb,
    {
        self.on_shape(ShapeKind::KeyValuePair, move |ast, shape| match shape {
            Shape::KeyValuePair { key, value } => handler(ast, key, *value),
            _ => Ok(Flow::Continue),
        })
    }

    /// Register for [`ShapeKind::Variable`]: called once per declarator
    /// that binds a plain identifier.
    pub fn on_variable<F>(&mut self, mut handler: F) -> &mut Self
    where
        F: FnMut(&Ast, VariableBinding<'_>) -> Result<Flow> + 'cb,
    {
        self.on_shape(ShapeKind::Variable, move |ast, shape| match shape {
            Shape::Variable(binding) => handler(ast, *binding),
            _ => Ok(Flow::Continue),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Check whether a raw-kind handler is registered.
    pub fn has_node(&self, kind: &str) -> bool {
        self.nodes.contains_key(kind)
    }

    /// Check whether a shape handler is registered.
    pub fn has_shape(&self, shape: ShapeKind) -> bool {
        self.shapes.contains_key(&shape)
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.shapes.is_empty()
    }

    pub(crate) fn node_handler(&mut self, kind: &str) -> Option<&mut NodeHandler<'cb>> {
        self.nodes.get_mut(kind)
    }

    pub(crate) fn shape_handler(&mut self, shape: ShapeKind) -> Option<&mut ShapeHandler<'cb>> {
        self.shapes.get_mut(&shape)
    }
}

impl fmt::Debug for Callbacks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<_> = self.nodes.keys().collect();
        nodes.sort();
        let mut shapes: Vec<_> = self.shapes.keys().map(|s| s.as_str()).collect();
        shapes.sort_unstable();
        f.debug_struct("Callbacks")
            .field("nodes", &nodes)
            .field("shapes", &shapes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;

    #[test]
    fn test_flow_from_bool() {
        assert_eq!(Flow::from(true), Flow::Handled);
        assert_eq!(Flow::from(false), Flow::Continue);
        assert!(Flow::Handled.is_handled());
        assert!(!Flow::default().is_handled());
    }

    #[test]
    fn test_registration() {
        let mut callbacks = Callbacks::new();
        assert!(callbacks.is_empty());

        callbacks
            .on(NodeKind::CallExpression, |_, _| Ok(Flow::Continue))
            .on("ThisExpression", |_, _| Ok(Flow::Continue))
            .on_key_value_pair(|_, _, _| Ok(Flow::Handled));

        assert!(callbacks.has_node("CallExpression"));
        assert!(callbacks.has_node("ThisExpression"));
        assert!(!callbacks.has_node("Literal"));
        assert!(callbacks.has_shape(ShapeKind::KeyValuePair));
        assert!(!callbacks.has_shape(ShapeKind::ObjectLiteral));
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut callbacks = Callbacks::new();
        callbacks
            .on("Literal", |_, _| Ok(Flow::Continue))
            .on_variable(|_, _| Ok(Flow::Continue));
        let debug = format!("{:?}", callbacks);
        assert!(debug.contains("Literal"));
        assert!(debug.contains("Variable"));
    }
}
