//! Syntax tree consumed by the evaluator and the visitor
//!
//! The tree is produced by an external parser (see
//! [`Frontend`](crate::Frontend)) and is immutable once built. Each supported
//! ESTree kind has its own record type; everything else is kept as
//! [`Node::Unknown`] so that unfamiliar syntax never makes a whole file
//! unusable.

pub mod build;
mod json;
mod kind;

pub use kind::{NodeKind, UnknownKind};

use serde::Deserialize;

use crate::value::Value;

/// Root of a syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Node>,
}

/// A syntax tree node, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // ═══════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════
    /// `1`, `"s"`, `true`, `null`, `/re/`
    Literal(Literal),
    /// `name`
    Identifier(Identifier),
    /// `object.property` or `object[property]`
    MemberExpression(MemberExpression),
    /// `-argument`
    UnaryExpression(UnaryExpression),
    /// `left + right`
    BinaryExpression(BinaryExpression),
    /// `[a, , b]`
    ArrayExpression(ArrayExpression),
    /// `{ key: value }`
    ObjectExpression(ObjectExpression),
    /// One `key: value` entry of an object expression
    Property(Property),
    /// `left = right`
    AssignmentExpression(AssignmentExpression),
    /// `callee(arguments)`
    CallExpression(CallExpression),
    /// `function () { ... }`
    FunctionExpression(Function),
    /// `() => ...`
    ArrowFunctionExpression(Function),

    // ═══════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════
    /// `expression;`
    ExpressionStatement(ExpressionStatement),
    /// `{ body }`
    BlockStatement(BlockStatement),
    /// `if (test) consequent else alternate`
    IfStatement(IfStatement),
    /// `label: body`
    LabeledStatement(LabeledStatement),
    /// `with (object) body`
    WithStatement(WithStatement),
    /// `return argument;`
    ReturnStatement(ReturnStatement),
    /// `try block catch ... finally ...`
    TryStatement(TryStatement),
    /// `while (test) body`
    WhileStatement(WhileStatement),
    /// `do body while (test)`
    DoWhileStatement(WhileStatement),
    /// `for (init; test; update) body`
    ForStatement(LoopStatement),
    /// `for (left in right) body`
    ForInStatement(LoopStatement),
    /// `for (left of right) body`
    ForOfStatement(LoopStatement),
    /// `var a = 1, b;`
    VariableDeclaration(VariableDeclaration),
    /// `function name() { ... }`
    FunctionDeclaration(Function),

    /// Any kind this crate has no record type for
    Unknown(UnknownNode),
}

impl Node {
    /// The node's kind, or `None` for [`Node::Unknown`].
    pub fn kind(&self) -> Option<NodeKind> {
        let kind = match self {
            Node::Literal(_) => NodeKind::Literal,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::MemberExpression(_) => NodeKind::MemberExpression,
            Node::UnaryExpression(_) => NodeKind::UnaryExpression,
            Node::BinaryExpression(_) => NodeKind::BinaryExpression,
            Node::ArrayExpression(_) => NodeKind::ArrayExpression,
            Node::ObjectExpression(_) => NodeKind::ObjectExpression,
            Node::Property(_) => NodeKind::Property,
            Node::AssignmentExpression(_) => NodeKind::AssignmentExpression,
            Node::CallExpression(_) => NodeKind::CallExpression,
            Node::FunctionExpression(_) => NodeKind::FunctionExpression,
            Node::ArrowFunctionExpression(_) => NodeKind::ArrowFunctionExpression,
            Node::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            Node::BlockStatement(_) => NodeKind::BlockStatement,
            Node::IfStatement(_) => NodeKind::IfStatement,
            Node::LabeledStatement(_) => NodeKind::LabeledStatement,
            Node::WithStatement(_) => NodeKind::WithStatement,
            Node::ReturnStatement(_) => NodeKind::ReturnStatement,
            Node::TryStatement(_) => NodeKind::TryStatement,
            Node::WhileStatement(_) => NodeKind::WhileStatement,
            Node::DoWhileStatement(_) => NodeKind::DoWhileStatement,
            Node::ForStatement(_) => NodeKind::ForStatement,
            Node::ForInStatement(_) => NodeKind::ForInStatement,
            Node::ForOfStatement(_) => NodeKind::ForOfStatement,
            Node::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            Node::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            Node::Unknown(_) => return None,
        };
        Some(kind)
    }

    /// The ESTree `type` string, including for unknown kinds.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Unknown(unknown) => &unknown.kind,
            other => other.kind().map_or("", NodeKind::as_str),
        }
    }

    /// The identifier's name, if this is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Node::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Expression Records
// ═══════════════════════════════════════════════════════════════════════

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The literal's value
    pub value: Value,

    /// Source text of the literal, when the parser records it
    pub raw: Option<String>,

    /// Pattern and flags of a regular-expression literal
    pub regex: Option<RegexLiteral>,
}

/// Pattern and flags of a regular-expression literal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegexLiteral {
    /// Pattern between the slashes
    pub pattern: String,
    /// Flags after the closing slash
    #[serde(default)]
    pub flags: String,
}

/// An identifier reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The identifier's name
    pub name: String,
}

/// A member access.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// Expression being accessed
    pub object: Box<Node>,
    /// Identifier when not computed, any expression when computed
    pub property: Box<Node>,
    /// `true` for `object[property]`
    pub computed: bool,
}

/// A prefix operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// Operator as written
    pub operator: String,
    /// Operand
    pub argument: Box<Node>,
}

/// An infix operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// Operator as written
    pub operator: String,
    /// Left operand
    pub left: Box<Node>,
    /// Right operand
    pub right: Box<Node>,
}

/// An array literal. Holes are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    /// Elements in source order
    pub elements: Vec<Option<Node>>,
}

/// An object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    /// Usually [`Node::Property`]; spreads and other members arrive as
    /// [`Node::Unknown`]
    pub properties: Vec<Node>,
}

impl ObjectExpression {
    /// `(key, value)` for every property with a static key, in source order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &Node)> {
        self.properties.iter().filter_map(|member| match member {
            Node::Property(property) => property.key_name().map(|key| (key, &*property.value)),
            _ => None,
        })
    }
}

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Literal or identifier naming the property
    pub key: Box<Node>,
    /// The unevaluated value
    pub value: Box<Node>,
    /// `true` for `[key]: value`
    pub computed: bool,
}

impl Property {
    /// Static name of the property.
    ///
    /// A literal key is rendered as a property key (`{1: x}` names `"1"`),
    /// a non-computed identifier key gives its name. Computed keys other
    /// than literals have no static name.
    pub fn key_name(&self) -> Option<String> {
        match self.key.as_ref() {
            Node::Literal(lit) => lit.value.to_property_key().ok(),
            Node::Identifier(ident) if !self.computed => Some(ident.name.clone()),
            _ => None,
        }
    }
}

/// An assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// `=`, `+=`, ...
    pub operator: String,
    /// Assignment target
    pub left: Box<Node>,
    /// Assigned value
    pub right: Box<Node>,
}

/// A call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// Function being called
    pub callee: Box<Node>,
    /// Arguments in source order
    pub arguments: Vec<Node>,
}

/// A function declaration, function expression or arrow function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name, if any
    pub id: Option<Box<Node>>,
    /// A block statement, or a single expression for expression-bodied
    /// functions
    pub body: Box<Node>,
}

// ═══════════════════════════════════════════════════════════════════════
// Statement Records
// ═══════════════════════════════════════════════════════════════════════

/// An expression in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Box<Node>,
}

/// A braced list of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements in source order
    pub body: Vec<Node>,
}

/// A conditional.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// Condition
    pub test: Box<Node>,
    /// Taken branch
    pub consequent: Box<Node>,
    /// `else` branch
    pub alternate: Option<Box<Node>>,
}

/// A labelled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    /// The label
    pub label: Box<Node>,
    /// The labelled statement
    pub body: Box<Node>,
}

/// A `with` statement. Only the object is traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    /// Scope object
    pub object: Box<Node>,
    /// Body
    pub body: Box<Node>,
}

/// A `return` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// Returned expression
    pub argument: Option<Box<Node>>,
}

/// A `try` statement. Handlers are not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// The guarded block
    pub block: Box<Node>,
}

/// `while` and `do ... while` loops.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// Loop condition
    pub test: Box<Node>,
    /// Loop body
    pub body: Box<Node>,
}

/// `for`, `for-in` and `for-of` loops. The loop head is not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopStatement {
    /// Loop body
    pub body: Box<Node>,
}

/// `var`, `let` or `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
    /// Any newer declaration keyword
    #[serde(other)]
    Other,
}

impl DeclarationKind {
    /// Keyword as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
            DeclarationKind::Other => "other",
        }
    }
}

/// A variable declaration statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Declarators in source order
    pub declarations: Vec<VariableDeclarator>,
    /// Declaration keyword
    pub kind: DeclarationKind,
}

/// One `id = init` entry of a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Bound name or destructuring pattern
    pub id: Box<Node>,
    /// Initializer
    pub init: Option<Box<Node>>,
}

/// A node whose kind has no record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNode {
    /// The ESTree `type` string
    pub kind: String,
}
