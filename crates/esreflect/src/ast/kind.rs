//! Node kind names

use std::fmt;
use std::str::FromStr;

/// Every node kind the engine understands, spelled as in ESTree.
///
/// Kinds outside this set still deserialize (as
/// [`Node::Unknown`](super::Node::Unknown)) and still dispatch to callbacks
/// registered under their name; they are simply traversal leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // Expressions
    Literal,
    Identifier,
    MemberExpression,
    UnaryExpression,
    BinaryExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    AssignmentExpression,
    CallExpression,
    FunctionExpression,
    ArrowFunctionExpression,

    // Statements
    ExpressionStatement,
    BlockStatement,
    IfStatement,
    LabeledStatement,
    WithStatement,
    ReturnStatement,
    TryStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    VariableDeclaration,
    FunctionDeclaration,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [NodeKind; 26] = [
        NodeKind::Literal,
        NodeKind::Identifier,
        NodeKind::MemberExpression,
        NodeKind::UnaryExpression,
        NodeKind::BinaryExpression,
        NodeKind::ArrayExpression,
        NodeKind::ObjectExpression,
        NodeKind::Property,
        NodeKind::AssignmentExpression,
        NodeKind::CallExpression,
        NodeKind::FunctionExpression,
        NodeKind::ArrowFunctionExpression,
        NodeKind::ExpressionStatement,
        NodeKind::BlockStatement,
        NodeKind::IfStatement,
        NodeKind::LabeledStatement,
        NodeKind::WithStatement,
        NodeKind::ReturnStatement,
        NodeKind::TryStatement,
        NodeKind::WhileStatement,
        NodeKind::DoWhileStatement,
        NodeKind::ForStatement,
        NodeKind::ForInStatement,
        NodeKind::ForOfStatement,
        NodeKind::VariableDeclaration,
        NodeKind::FunctionDeclaration,
    ];

    /// The ESTree `type` string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Literal => "Literal",
            NodeKind::Identifier => "Identifier",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::LabeledStatement => "LabeledStatement",
            NodeKind::WithStatement => "WithStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::DoWhileStatement => "DoWhileStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::ForOfStatement => "ForOfStatement",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
        }
    }

    /// Whether nodes of this kind appear in statement position.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::ExpressionStatement
                | NodeKind::BlockStatement
                | NodeKind::IfStatement
                | NodeKind::LabeledStatement
                | NodeKind::WithStatement
                | NodeKind::ReturnStatement
                | NodeKind::TryStatement
                | NodeKind::WhileStatement
                | NodeKind::DoWhileStatement
                | NodeKind::ForStatement
                | NodeKind::ForInStatement
                | NodeKind::ForOfStatement
                | NodeKind::VariableDeclaration
                | NodeKind::FunctionDeclaration
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
