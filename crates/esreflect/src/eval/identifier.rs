//! Identifier evaluation (namespace lookup)

use crate::ast::Identifier;
use crate::context::DepthCounter;
use crate::{EvalContext, EvalError, Namespace, Value};

use super::Evaluate;

impl Evaluate for Identifier {
    fn eval(
        &self,
        ns: &Namespace,
        _ctx: &EvalContext,
        _depth: &DepthCounter,
    ) -> Result<Value, EvalError> {
        ns.get(&self.name)
            .cloned()
            .ok_or_else(|| EvalError::UnboundIdentifier {
                name: self.name.clone(),
            })
    }
}
