//! Error types for esreflect evaluation and traversal

use std::fmt;

use thiserror::Error;

use crate::frontend::ParseError;
use crate::value::Value;

/// Which operator table an operator was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Prefix operators such as `-x`
    Unary,
    /// Infix operators such as `a + b`
    Binary,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Unary => write!(f, "unary"),
            Arity::Binary => write!(f, "binary"),
        }
    }
}

/// Errors raised by the expression evaluator.
///
/// Every variant carries the offending name or kind as data so callers can
/// react to it without parsing the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// An identifier was not present in the namespace
    #[error("identifier `{name}` is not bound in the namespace")]
    UnboundIdentifier {
        /// The identifier's name
        name: String,
    },

    /// A member access named a field the container does not have
    #[error("field `{field}` not found")]
    UnboundField {
        /// The missing field
        field: String,
    },

    /// A member chain passes through a node that cannot name a container
    #[error("cannot resolve a member through a `{kind}` node")]
    UnsupportedMemberTarget {
        /// Kind of the offending node
        kind: String,
    },

    /// The operator has no evaluation rule
    #[error("unsupported {arity} operator `{operator}`")]
    UnsupportedOperator {
        /// Operator as written in the source
        operator: String,
        /// Whether the operator was used as a prefix or infix operator
        arity: Arity,
    },

    /// The node kind has no evaluation rule
    #[error("cannot evaluate a `{kind}` node")]
    UnevaluableNodeKind {
        /// Kind of the offending node
        kind: String,
    },

    /// A member chain resolved to a scalar before reaching its last field
    #[error("cannot look up field `{field}` on a {found}")]
    NotANamespace {
        /// The field that was being looked up
        field: String,
        /// Type of the value found instead of a namespace
        found: &'static str,
    },

    /// An operand has a type the operator cannot coerce
    #[error("operator `{operator}` cannot be applied to a {operand_type}")]
    InvalidOperand {
        /// Operator as written in the source
        operator: String,
        /// Type of the rejected operand
        operand_type: &'static str,
    },

    /// The expression nests deeper than the context allows
    #[error("evaluation exceeded the maximum depth of {limit}")]
    DepthLimitExceeded {
        /// The configured limit
        limit: usize,
    },
}

/// Errors raised while converting host data into a [`Namespace`](crate::Namespace).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// The root of the document is not an object
    #[error("namespace source must be an object, got {found}")]
    NotAnObject {
        /// JSON type of the root
        found: &'static str,
    },

    /// A binding holds a value with no namespace representation
    #[error("binding `{name}` holds an unsupported {found}")]
    UnsupportedJsonValue {
        /// Dotted path of the binding
        name: String,
        /// JSON type of the value
        found: &'static str,
    },
}

/// Main error type for esreflect operations.
///
/// This is what [`Ast::visit`](crate::Ast::visit) and visitor callbacks
/// return. Evaluator, parse and namespace errors convert into it with `?`.
#[derive(Error, Debug)]
pub enum Error {
    /// Evaluation failed
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// The frontend rejected the source
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Namespace construction failed
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    /// The syntax tree nests deeper than the context allows
    #[error("traversal exceeded the maximum depth of {limit}")]
    DepthLimitExceeded {
        /// The configured limit
        limit: usize,
    },

    /// A caller-defined failure raised from inside a callback
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

/// Result type alias for esreflect operations
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable type name of a value, as used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Namespace(_) => "namespace",
    }
}

/// Human-readable type name of a JSON value.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_messages_carry_data() {
        let err = EvalError::UnboundIdentifier {
            name: "x".to_string(),
        };
        assert_eq!(err.to_string(), "identifier `x` is not bound in the namespace");

        let err = EvalError::UnsupportedOperator {
            operator: "*".to_string(),
            arity: Arity::Binary,
        };
        assert_eq!(err.to_string(), "unsupported binary operator `*`");
    }

    #[test]
    fn test_eval_error_converts_into_error() {
        let err: Error = EvalError::UnboundField {
            field: "b".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Eval(EvalError::UnboundField { .. })));
        assert_eq!(err.to_string(), "field `b` not found");
    }

    #[test]
    fn test_callback_error_is_transparent() {
        let err: Error = anyhow::anyhow!("refused").into();
        assert_eq!(err.to_string(), "refused");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&Value::Null), "null");
        assert_eq!(type_name(&Value::Number(1.0)), "number");
        assert_eq!(type_name(&Value::Namespace(Default::default())), "namespace");
        assert_eq!(json_type_name(&serde_json::json!([1])), "array");
    }
}
