//! Literal evaluation

use crate::ast::Literal;
use crate::context::DepthCounter;
use crate::{EvalContext, EvalError, Namespace, Value};

use super::Evaluate;

impl Evaluate for Literal {
    /// A literal evaluates to its stored value verbatim, whatever the
    /// namespace holds.
    fn eval(
        &self,
        _ns: &Namespace,
        _ctx: &EvalContext,
        _depth: &DepthCounter,
    ) -> Result<Value, EvalError> {
        Ok(self.value.clone())
    }
}
