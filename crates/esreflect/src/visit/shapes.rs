//! Special shapes: alternate views of raw syntax kinds
//!
//! A raw kind may present itself to callbacks under one or more
//! higher-level identities. The registry below is the single place that
//! knows which kinds have which shapes; the visitor only consults it.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::trace;

use crate::ast::{DeclarationKind, Node, NodeKind, UnknownKind};

/// Names of the special shapes callbacks can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// An object expression seen as one ordered key-to-value map
    ObjectLiteral,
    /// An object expression seen as a sequence of key/value pairs
    KeyValuePair,
    /// A variable declaration seen as one binding per declarator
    Variable,
}

impl ShapeKind {
    /// All shapes, in registry order.
    pub const ALL: [ShapeKind; 3] = [
        ShapeKind::ObjectLiteral,
        ShapeKind::KeyValuePair,
        ShapeKind::Variable,
    ];

    /// The shape's callback name.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::ObjectLiteral => "ObjectLiteral",
            ShapeKind::KeyValuePair => "KeyValuePair",
            ShapeKind::Variable => "Variable",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A bound name introduced by a variable declarator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBinding<'n> {
    /// The declared name
    pub name: &'n str,
    /// The unevaluated initializer, if any
    pub init: Option<&'n Node>,
    /// `var`, `let` or `const`
    pub kind: DeclarationKind,
}

/// One reshaped view of a node, as handed to a shape callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'n> {
    /// Every property of an object expression, keyed in source order
    ObjectLiteral(IndexMap<String, &'n Node>),

    /// A single property of an object expression
    KeyValuePair {
        /// Property name
        key: String,
        /// Unevaluated value
        value: &'n Node,
    },

    /// A single declarator of a variable declaration
    Variable(VariableBinding<'n>),
}

impl Shape<'_> {
    /// Which shape this view belongs to.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::ObjectLiteral(_) => ShapeKind::ObjectLiteral,
            Shape::KeyValuePair { .. } => ShapeKind::KeyValuePair,
            Shape::Variable(_) => ShapeKind::Variable,
        }
    }
}

/// Registry entry: a shape, the raw kind it is derived from, and the
/// function that produces its views.
pub struct SpecialShape {
    /// The shape's name
    pub shape: ShapeKind,
    /// Raw kind the shape is derived from
    pub source: NodeKind,
    reshape: fn(&Node) -> Vec<Shape<'_>>,
}

impl fmt::Debug for SpecialShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecialShape")
            .field("shape", &self.shape)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl SpecialShape {
    /// Views of `node` under this shape. Each view is offered to the
    /// shape's callback separately.
    pub fn reshape<'n>(&self, node: &'n Node) -> Vec<Shape<'n>> {
        (self.reshape)(node)
    }
}

/// Every special shape, in the order callbacks are offered them.
pub static SHAPES: &[SpecialShape] = &[
    SpecialShape {
        shape: ShapeKind::ObjectLiteral,
        source: NodeKind::ObjectExpression,
        reshape: object_literal,
    },
    SpecialShape {
        shape: ShapeKind::KeyValuePair,
        source: NodeKind::ObjectExpression,
        reshape: key_value_pairs,
    },
    SpecialShape {
        shape: ShapeKind::Variable,
        source: NodeKind::VariableDeclaration,
        reshape: variables,
    },
];

/// The shapes registered against `node`'s kind.
pub fn shapes_for(node: &Node) -> impl Iterator<Item = &'static SpecialShape> {
    let kind = node.kind();
    SHAPES
        .iter()
        .filter(move |special| Some(special.source) == kind)
}

fn object_literal(node: &Node) -> Vec<Shape<'_>> {
    match node {
        Node::ObjectExpression(object) => vec![Shape::ObjectLiteral(object.entries().collect())],
        _ => Vec::new(),
    }
}

fn key_value_pairs(node: &Node) -> Vec<Shape<'_>> {
    match node {
        Node::ObjectExpression(object) => object
            .entries()
            .map(|(key, value)| Shape::KeyValuePair { key, value })
            .collect(),
        _ => Vec::new(),
    }
}

fn variables(node: &Node) -> Vec<Shape<'_>> {
    let Node::VariableDeclaration(decl) = node else {
        return Vec::new();
    };

    decl.declarations
        .iter()
        .filter_map(|declarator| match declarator.id.as_identifier() {
            Some(name) => Some(Shape::Variable(VariableBinding {
                name,
                init: declarator.init.as_deref(),
                kind: decl.kind,
            })),
            None => {
                trace!(
                    pattern = declarator.id.kind_name(),
                    "skipping destructuring declarator"
                );
                None
            }
        })
        .collect()
}
