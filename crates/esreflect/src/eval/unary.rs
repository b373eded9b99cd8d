//! Unary operation evaluation

use crate::ast::UnaryExpression;
use crate::error::Arity;
use crate::context::DepthCounter;
use crate::{EvalContext, EvalError, Namespace, Value};

use super::Evaluate;

impl Evaluate for UnaryExpression {
    fn eval(
        &self,
        ns: &Namespace,
        ctx: &EvalContext,
        depth: &DepthCounter,
    ) -> Result<Value, EvalError> {
        // The operator is checked before the operand is evaluated.
        match self.operator.as_str() {
            "-" => {
                let operand = self.argument.eval(ns, ctx, depth)?;
                eval_neg(&operand)
            }
            other => Err(EvalError::UnsupportedOperator {
                operator: other.to_string(),
                arity: Arity::Unary,
            }),
        }
    }
}

/// Evaluate unary negation (`-x`).
pub(crate) fn eval_neg(operand: &Value) -> Result<Value, EvalError> {
    operand.to_number("-").map(|n| Value::Number(-n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::{ident, lit, num, unary};
    use crate::evaluate;

    #[test]
    fn test_neg_number() {
        assert_eq!(eval_neg(&Value::Number(42.0)).unwrap(), Value::Number(-42.0));
        assert_eq!(
            evaluate(&unary("-", num(3.5)), None).unwrap(),
            Value::Number(-3.5)
        );
    }

    #[test]
    fn test_neg_threads_namespace() {
        let ns = Namespace::new().with("x", 7);
        assert_eq!(
            evaluate(&unary("-", ident("x")), Some(&ns)).unwrap(),
            Value::Number(-7.0)
        );
    }

    #[test]
    fn test_neg_coerces() {
        assert_eq!(eval_neg(&Value::string("2")).unwrap(), Value::Number(-2.0));
        assert_eq!(eval_neg(&Value::Bool(true)).unwrap(), Value::Number(-1.0));
        assert!(eval_neg(&Value::string("x"))
            .unwrap()
            .as_number()
            .is_some_and(f64::is_nan));
    }

    #[test]
    fn test_neg_namespace_fails() {
        let err = eval_neg(&Value::Namespace(Namespace::new())).unwrap_err();
        assert!(matches!(err, EvalError::InvalidOperand { .. }));
    }

    #[test]
    fn test_unsupported_unary_operators() {
        for op in ["!", "+", "~", "typeof", "void", "delete"] {
            assert_eq!(
                evaluate(&unary(op, lit(true)), None).unwrap_err(),
                EvalError::UnsupportedOperator {
                    operator: op.to_string(),
                    arity: Arity::Unary,
                }
            );
        }
    }

    #[test]
    fn test_unsupported_operator_wins_over_unbound_operand() {
        let err = evaluate(&unary("!", ident("missing")), None).unwrap_err();
        assert!(matches!(err, EvalError::UnsupportedOperator { .. }));
    }
}
