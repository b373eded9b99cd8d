//! Binary operation evaluation

use crate::ast::BinaryExpression;
use crate::error::{type_name, Arity};
use crate::context::DepthCounter;
use crate::{EvalContext, EvalError, Namespace, Value};

use super::Evaluate;

/// The binary operators with an evaluation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
}

impl BinaryOp {
    fn parse(operator: &str) -> Result<Self, EvalError> {
        match operator {
            "+" => Ok(BinaryOp::Add),
            "-" => Ok(BinaryOp::Sub),
            other => Err(EvalError::UnsupportedOperator {
                operator: other.to_string(),
                arity: Arity::Binary,
            }),
        }
    }
}

impl Evaluate for BinaryExpression {
    fn eval(
        &self,
        ns: &Namespace,
        ctx: &EvalContext,
        depth: &DepthCounter,
    ) -> Result<Value, EvalError> {
        let op = BinaryOp::parse(&self.operator)?;

        // Evaluate both operands, left first
        let left = self.left.eval(ns, ctx, depth)?;
        let right = self.right.eval(ns, ctx, depth)?;

        match op {
            BinaryOp::Add => eval_add(&left, &right),
            BinaryOp::Sub => eval_sub(&left, &right),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operations
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate `+`: concatenation when either side is a string, numeric
/// addition otherwise.
pub(crate) fn eval_add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    for operand in [left, right] {
        if let Value::Namespace(_) = operand {
            return Err(EvalError::InvalidOperand {
                operator: "+".to_string(),
                operand_type: type_name(operand),
            });
        }
    }

    match (left, right) {
        (Value::String(_), _) | (_, Value::String(_)) => {
            Ok(Value::String(format!("{}{}", left, right)))
        }
        _ => Ok(Value::Number(left.to_number("+")? + right.to_number("+")?)),
    }
}

/// Evaluate `-`: always numeric.
pub(crate) fn eval_sub(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Number(left.to_number("-")? - right.to_number("-")?))
}
