//! Shorthand constructors for building trees by hand
//!
//! Mostly useful in tests and for callers that synthesize small
//! expressions instead of parsing them.
//!
//! ```
//! use esreflect::ast::build::{binary, ident, num};
//! use esreflect::{evaluate, Namespace, Value};
//!
//! let ns = Namespace::new().with("x", 40);
//! let expr = binary("+", ident("x"), num(2.0));
//! assert_eq!(evaluate(&expr, Some(&ns)).unwrap(), Value::Number(42.0));
//! ```

use super::*;

/// A literal holding `value`.
pub fn lit(value: impl Into<Value>) -> Node {
    Node::Literal(Literal {
        value: value.into(),
        raw: None,
        regex: None,
    })
}

/// A number literal.
pub fn num(n: f64) -> Node {
    lit(n)
}

/// A string literal.
pub fn str_lit(s: &str) -> Node {
    lit(s)
}

/// An identifier.
pub fn ident(name: &str) -> Node {
    Node::Identifier(Identifier {
        name: name.to_string(),
    })
}

/// `object.property`
pub fn member(object: Node, property: &str) -> Node {
    Node::MemberExpression(MemberExpression {
        object: Box::new(object),
        property: Box::new(ident(property)),
        computed: false,
    })
}

/// `object[property]`
pub fn computed(object: Node, property: Node) -> Node {
    Node::MemberExpression(MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed: true,
    })
}

/// `operator argument`
pub fn unary(operator: &str, argument: Node) -> Node {
    Node::UnaryExpression(UnaryExpression {
        operator: operator.to_string(),
        argument: Box::new(argument),
    })
}

/// `left operator right`
pub fn binary(operator: &str, left: Node, right: Node) -> Node {
    Node::BinaryExpression(BinaryExpression {
        operator: operator.to_string(),
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// `callee(arguments...)`
pub fn call(callee: Node, arguments: Vec<Node>) -> Node {
    Node::CallExpression(CallExpression {
        callee: Box::new(callee),
        arguments,
    })
}

/// `{ key: value, ... }` with identifier keys
pub fn object(entries: Vec<(&str, Node)>) -> Node {
    Node::ObjectExpression(ObjectExpression {
        properties: entries
            .into_iter()
            .map(|(key, value)| {
                Node::Property(Property {
                    key: Box::new(ident(key)),
                    value: Box::new(value),
                    computed: false,
                })
            })
            .collect(),
    })
}

/// `expression;`
pub fn expr_stmt(expression: Node) -> Node {
    Node::ExpressionStatement(ExpressionStatement {
        expression: Box::new(expression),
    })
}

/// A program of `statements`.
pub fn program(statements: Vec<Node>) -> Program {
    Program { body: statements }
}
