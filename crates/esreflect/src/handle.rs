//! The `Ast` handle: a parsed program plus the context it is walked with

use tracing::debug;

use crate::ast::{Node, Program};
use crate::frontend::{Frontend, ParseError};
use crate::frontends::EstreeFrontend;
use crate::visit::{self, Callbacks};
use crate::{eval, EvalContext, EvalError, Namespace, Result, Value};

/// A parsed program, ready to be evaluated against or visited.
///
/// The tree is never mutated after construction, so one handle can be
/// visited any number of times.
///
/// # Example
///
/// ```
/// use esreflect::{Ast, Callbacks, Flow, Namespace, Value};
///
/// let ast = Ast::from_estree(r#"{
///     "type": "Program",
///     "body": [{
///         "type": "VariableDeclaration",
///         "kind": "const",
///         "declarations": [{
///             "type": "VariableDeclarator",
///             "id": {"type": "Identifier", "name": "size"},
///             "init": {
///                 "type": "BinaryExpression",
///                 "operator": "+",
///                 "left": {"type": "Identifier", "name": "base"},
///                 "right": {"type": "Literal", "value": 2}
///             }
///         }]
///     }]
/// }"#).unwrap();
///
/// let ns = Namespace::new().with("base", 40);
/// let mut sizes = Vec::new();
/// let mut callbacks = Callbacks::new();
/// callbacks.on_variable(|ast, binding| {
///     if let Some(init) = binding.init {
///         sizes.push((binding.name.to_string(), ast.evaluate(init, Some(&ns))?));
///     }
///     Ok(true.into())
/// });
/// ast.visit(&mut callbacks).unwrap();
/// drop(callbacks);
///
/// assert_eq!(sizes, vec![("size".to_string(), Value::Number(42.0))]);
/// ```
#[derive(Debug, Clone)]
pub struct Ast {
    program: Program,
    context: EvalContext,
}

impl Ast {
    /// Wrap an already-built program with a default context.
    pub fn new(program: Program) -> Self {
        Self {
            program,
            context: EvalContext::default(),
        }
    }

    /// Parse `source` with `frontend`.
    ///
    /// # Errors
    ///
    /// The frontend's [`ParseError`] is returned unchanged.
    pub fn create<F: Frontend + ?Sized>(
        frontend: &F,
        source: &str,
    ) -> std::result::Result<Self, ParseError> {
        let program = frontend.parse(source)?;
        debug!(
            frontend = frontend.name(),
            statements = program.body.len(),
            "created ast"
        );
        Ok(Self::new(program))
    }

    /// Parse an ESTree JSON document.
    pub fn from_estree(source: &str) -> std::result::Result<Self, ParseError> {
        Self::create(&EstreeFrontend::new(), source)
    }

    /// Replace the evaluation and traversal context.
    pub fn with_context(mut self, context: EvalContext) -> Self {
        self.context = context;
        self
    }

    /// The parsed program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The context used by [`evaluate`](Self::evaluate) and
    /// [`visit`](Self::visit).
    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    /// Evaluate `node` against `ns` with this handle's context.
    ///
    /// `node` is usually a subtree handed to a callback. A missing
    /// namespace behaves as an empty one.
    pub fn evaluate(
        &self,
        node: &Node,
        ns: Option<&Namespace>,
    ) -> std::result::Result<Value, EvalError> {
        eval::eval_with(node, ns, &self.context)
    }

    /// Evaluate `node` with an explicit context instead of this handle's.
    pub fn evaluate_with(
        &self,
        node: &Node,
        ns: Option<&Namespace>,
        ctx: &EvalContext,
    ) -> std::result::Result<Value, EvalError> {
        eval::eval_with(node, ns, ctx)
    }

    /// Walk the program, offering each node to `callbacks`.
    ///
    /// # Errors
    ///
    /// The first error returned by a callback aborts the walk and is
    /// returned as is. Effects of callbacks that already ran are kept.
    /// Nesting beyond the context's depth limit fails with
    /// [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded).
    pub fn visit(&self, callbacks: &mut Callbacks<'_>) -> Result<()> {
        visit::visit_program(self, callbacks)
    }
}

impl From<Program> for Ast {
    fn from(program: Program) -> Self {
        Self::new(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::{binary, expr_stmt, ident, num, program};
    use crate::Flow;

    #[test]
    fn test_from_estree() {
        let ast = Ast::from_estree(r#"{"type": "Program", "body": []}"#).unwrap();
        assert!(ast.program().body.is_empty());
    }

    #[test]
    fn test_create_propagates_parse_errors() {
        let err = Ast::from_estree("not json").unwrap_err();
        assert!(err.message.contains("malformed"));
    }

    #[test]
    fn test_evaluate_uses_own_context() {
        let expr = binary("+", ident("a"), num(1.0));
        let ast = Ast::new(program(vec![])).with_context(EvalContext::with_max_depth(1));
        let ns = Namespace::new().with("a", 1);
        assert_eq!(
            ast.evaluate(&expr, Some(&ns)),
            Err(EvalError::DepthLimitExceeded { limit: 1 })
        );
        assert_eq!(
            ast.evaluate_with(&expr, Some(&ns), &EvalContext::default()),
            Ok(Value::Number(2.0))
        );
    }

    #[test]
    fn test_visit_is_repeatable() {
        let ast = Ast::from(program(vec![expr_stmt(ident("a")), expr_stmt(ident("b"))]));

        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut names = Vec::new();
            let mut callbacks = Callbacks::new();
            callbacks.on("Identifier", |_, node| {
                names.extend(node.as_identifier().map(String::from));
                Ok(Flow::Continue)
            });
            ast.visit(&mut callbacks).unwrap();
            drop(callbacks);
            runs.push(names);
        }
        assert_eq!(runs[0], vec!["a", "b"]);
        assert_eq!(runs[0], runs[1]);
    }
}
