//! Callback-driven traversal of a syntax tree
//!
//! The walk is depth-first and pre-order. Each node is first offered to
//! the callback registered for its raw kind, then to the callbacks of the
//! special shapes derived from that kind (see [`shapes`]). Only if nobody
//! signalled [`Flow::Handled`] does the walk descend into its children.

pub mod callbacks;
pub mod shapes;

pub use callbacks::{Callbacks, Flow, NodeHandler, ShapeHandler};
pub use shapes::{shapes_for, Shape, ShapeKind, SpecialShape, VariableBinding, SHAPES};

use tracing::{debug, trace};

use crate::ast::Node;
use crate::context::DepthCounter;
use crate::stack::ensure_sufficient_stack;
use crate::{Ast, Error, Result};

/// Walk every top-level statement of `ast`'s program.
///
/// The program root itself is never offered to callbacks.
pub(crate) fn visit_program(ast: &Ast, callbacks: &mut Callbacks<'_>) -> Result<()> {
    let body = &ast.program().body;
    debug!(statements = body.len(), "visit started");

    let depth = ast.context().depth_counter();
    let mut walker = Walker {
        ast,
        callbacks,
        depth: &depth,
    };
    for statement in body {
        walker.walk(statement)?;
    }

    debug!("visit finished");
    Ok(())
}

struct Walker<'a, 'cb> {
    ast: &'a Ast,
    callbacks: &'a mut Callbacks<'cb>,
    /// Nesting of this walk only; evaluations started by callbacks count
    /// their own depth.
    depth: &'a DepthCounter,
}

impl Walker<'_, '_> {
    fn walk(&mut self, node: &Node) -> Result<()> {
        let depth = self.depth;
        let _guard = depth
            .enter()
            .map_err(|limit| Error::DepthLimitExceeded { limit })?;

        if self.ast.context().trace {
            trace!(kind = node.kind_name(), depth = depth.depth(), "dispatch");
        }

        ensure_sufficient_stack(|| {
            if self.dispatch(node)?.is_handled() {
                return Ok(());
            }
            self.descend(node)
        })
    }

    /// Offer `node` to its raw callback, then to its shape callbacks.
    fn dispatch(&mut self, node: &Node) -> Result<Flow> {
        let ast = self.ast;

        if let Some(handler) = self.callbacks.node_handler(node.kind_name()) {
            if handler(ast, node)?.is_handled() {
                return Ok(Flow::Handled);
            }
        }

        let mut handled = false;
        for special in shapes_for(node) {
            let Some(handler) = self.callbacks.shape_handler(special.shape) else {
                continue;
            };
            for view in special.reshape(node) {
                if ast.context().trace {
                    trace!(shape = special.shape.as_str(), "shape");
                }
                // Every view is delivered, even after one reports handled.
                handled |= handler(ast, &view)?.is_handled();
            }
        }
        Ok(handled.into())
    }

    fn descend(&mut self, node: &Node) -> Result<()> {
        match node {
            // ═══════════════════════════════════════════════════════════
            // Statements
            // ═══════════════════════════════════════════════════════════
            Node::BlockStatement(block) => self.walk_all(&block.body),
            Node::ExpressionStatement(stmt) => self.walk(&stmt.expression),
            Node::IfStatement(stmt) => {
                self.walk(&stmt.test)?;
                self.walk(&stmt.consequent)?;
                self.walk_opt(stmt.alternate.as_deref())
            }
            Node::LabeledStatement(stmt) => self.walk(&stmt.body),
            Node::WithStatement(stmt) => self.walk(&stmt.object),
            Node::ReturnStatement(stmt) => self.walk_opt(stmt.argument.as_deref()),
            Node::TryStatement(stmt) => self.walk(&stmt.block),
            Node::WhileStatement(stmt) => {
                self.walk(&stmt.test)?;
                self.walk(&stmt.body)
            }
            Node::DoWhileStatement(stmt) => {
                self.walk(&stmt.body)?;
                self.walk(&stmt.test)
            }
            Node::ForStatement(stmt) | Node::ForInStatement(stmt) | Node::ForOfStatement(stmt) => {
                self.walk(&stmt.body)
            }
            Node::VariableDeclaration(decl) => {
                for declarator in &decl.declarations {
                    self.walk_opt(declarator.init.as_deref())?;
                }
                Ok(())
            }
            Node::FunctionDeclaration(func) => self.walk(&func.body),

            // ═══════════════════════════════════════════════════════════
            // Expressions
            // ═══════════════════════════════════════════════════════════
            Node::ArrayExpression(array) => {
                for element in array.elements.iter().flatten() {
                    self.walk(element)?;
                }
                Ok(())
            }
            Node::ObjectExpression(object) => {
                for property in &object.properties {
                    if let Node::Property(property) = property {
                        self.walk(&property.value)?;
                    }
                }
                Ok(())
            }
            Node::FunctionExpression(func) | Node::ArrowFunctionExpression(func) => {
                self.walk(&func.body)
            }
            Node::AssignmentExpression(expr) => self.walk(&expr.right),
            Node::CallExpression(call) => {
                self.walk(&call.callee)?;
                self.walk_all(&call.arguments)
            }

            // Leaves
            Node::Literal(_)
            | Node::Identifier(_)
            | Node::MemberExpression(_)
            | Node::UnaryExpression(_)
            | Node::BinaryExpression(_)
            | Node::Property(_)
            | Node::Unknown(_) => Ok(()),
        }
    }

    fn walk_all(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.walk(node)?;
        }
        Ok(())
    }

    fn walk_opt(&mut self, node: Option<&Node>) -> Result<()> {
        match node {
            Some(node) => self.walk(node),
            None => Ok(()),
        }
    }
}
